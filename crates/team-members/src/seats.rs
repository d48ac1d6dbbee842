//! Seat accounting
//!
//! Seat usage lives in a global store, separate from memberships. Every
//! adjustment is a read-then-write inside one transaction so that concurrent
//! adjustments of the same row cannot lose updates.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use team_org::usage::seat_after_removal;
use team_org::{SeatKey, SeatUsage};
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Seat store error types.
#[derive(Debug, Error)]
pub enum SeatError {
    /// No usage row for the key
    #[error("Seat usage not found: {0}")]
    NotFound(SeatKey),

    /// The backing store could not serve the request
    #[error("Seat store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for seat store operations.
pub type SeatResult<T> = Result<T, SeatError>;

/// Transactional seat usage store.
#[async_trait]
pub trait SeatStore: Send + Sync {
    /// Start a transaction.
    ///
    /// Reads and writes made through the transaction are isolated from other
    /// transactions until [`SeatTransaction::commit`].
    async fn begin(&self) -> SeatResult<Box<dyn SeatTransaction>>;
}

/// An open seat store transaction.
///
/// Dropping the transaction without committing discards its writes.
#[async_trait]
pub trait SeatTransaction: Send {
    /// Read a usage row.
    async fn get_seat(&mut self, key: &SeatKey) -> SeatResult<Option<SeatUsage>>;

    /// Write the seat count of an existing usage row.
    async fn set_seat(&mut self, key: &SeatKey, seat: u32) -> SeatResult<()>;

    /// Commit all writes.
    async fn commit(self: Box<Self>) -> SeatResult<()>;
}

/// Result of the seat step of a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeatAdjustment {
    /// The removed membership did not hold a seat
    NotApplicable,

    /// The usage row was updated
    Adjusted {
        /// Seat count before the removal
        previous: u32,
        /// Seat count after the removal
        current: u32,
    },

    /// No usage row exists; the workspace was deleted concurrently
    UsageMissing,

    /// The adjustment failed; the membership is removed regardless
    Failed {
        /// Error description
        reason: String,
    },
}

impl SeatAdjustment {
    /// Whether the seat step failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Release the seat of one active member.
///
/// Decrements the owner's seat count for the workspace by one, floored at
/// [`team_org::SEAT_FLOOR`]. A missing usage row commits an empty
/// transaction and reports [`SeatAdjustment::UsageMissing`].
pub async fn release_seat(store: &dyn SeatStore, key: SeatKey) -> SeatResult<SeatAdjustment> {
    let mut tx = store.begin().await?;

    let Some(usage) = tx.get_seat(&key).await? else {
        tx.commit().await?;
        debug!(seat_key = %key, "No seat usage row, nothing to release");
        return Ok(SeatAdjustment::UsageMissing);
    };

    let current = seat_after_removal(usage.seat);
    tx.set_seat(&key, current).await?;
    tx.commit().await?;

    debug!(seat_key = %key, previous = usage.seat, current, "Seat released");

    Ok(SeatAdjustment::Adjusted {
        previous: usage.seat,
        current,
    })
}

/// In-memory seat store.
///
/// Transactions hold the store lock from `begin` until commit or drop, so
/// they are serializable.
#[derive(Clone, Default)]
pub struct MemorySeatStore {
    rows: Arc<Mutex<HashMap<SeatKey, SeatUsage>>>,
}

impl std::fmt::Debug for MemorySeatStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySeatStore").finish_non_exhaustive()
    }
}

impl MemorySeatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a usage row.
    pub async fn insert(&self, usage: SeatUsage) {
        self.rows.lock().await.insert(usage.key, usage);
    }

    /// Get a usage row outside of any transaction.
    pub async fn get(&self, key: &SeatKey) -> Option<SeatUsage> {
        self.rows.lock().await.get(key).cloned()
    }

    /// Remove a usage row.
    pub async fn remove(&self, key: &SeatKey) -> Option<SeatUsage> {
        self.rows.lock().await.remove(key)
    }
}

#[async_trait]
impl SeatStore for MemorySeatStore {
    async fn begin(&self) -> SeatResult<Box<dyn SeatTransaction>> {
        let rows = self.rows.clone().lock_owned().await;

        Ok(Box::new(MemorySeatTransaction {
            rows,
            staged: HashMap::new(),
        }))
    }
}

/// Transaction over a [`MemorySeatStore`].
pub struct MemorySeatTransaction {
    rows: OwnedMutexGuard<HashMap<SeatKey, SeatUsage>>,
    staged: HashMap<SeatKey, u32>,
}

#[async_trait]
impl SeatTransaction for MemorySeatTransaction {
    async fn get_seat(&mut self, key: &SeatKey) -> SeatResult<Option<SeatUsage>> {
        let mut usage = self.rows.get(key).cloned();
        if let (Some(usage), Some(seat)) = (usage.as_mut(), self.staged.get(key)) {
            usage.seat = *seat;
        }
        Ok(usage)
    }

    async fn set_seat(&mut self, key: &SeatKey, seat: u32) -> SeatResult<()> {
        if !self.rows.contains_key(key) {
            return Err(SeatError::NotFound(*key));
        }
        self.staged.insert(*key, seat);
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> SeatResult<()> {
        let now = Utc::now();
        let staged = std::mem::take(&mut self.staged);

        for (key, seat) in staged {
            if let Some(usage) = self.rows.get_mut(&key) {
                usage.seat = seat;
                usage.updated_at = now;
            }
        }

        Ok(())
    }
}
