//! Membership store
//!
//! This module provides the membership store abstraction and an in-memory
//! implementation. Stores are region scoped: one store holds the memberships
//! of every workspace in its region.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use team_org::{JoinStatus, MembershipRow, TeamRole, UserCr, Workspace};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Membership store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No membership row for the given workspace and user
    #[error("Membership not found: workspace {workspace_uid}, user {user_cr_uid}")]
    NotFound {
        /// Workspace UUID
        workspace_uid: Uuid,
        /// Regional user UUID
        user_cr_uid: Uuid,
    },

    /// A persisted row holds a value outside the domain model
    #[error("Invalid membership row: {0}")]
    InvalidRow(String),

    /// The backing store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for membership store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Region-scoped membership store.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Load membership rows of a workspace in one read.
    ///
    /// Returns the rows of the listed users, plus the workspace Owner's row
    /// when `include_owner` is set. Users without a row are simply absent.
    async fn find_members(
        &self,
        workspace_uid: Uuid,
        user_cr_uids: &[Uuid],
        include_owner: bool,
    ) -> StoreResult<Vec<MembershipRow>>;

    /// Delete one membership row.
    ///
    /// Fails with [`StoreError::NotFound`] when no row was deleted.
    async fn delete_member(&self, workspace_uid: Uuid, user_cr_uid: Uuid) -> StoreResult<()>;
}

/// Flat, persisted form of a membership row.
///
/// Role and status are kept as the strings the store holds; converting to a
/// [`MembershipRow`] rejects values outside the closed enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRecord {
    pub workspace_uid: Uuid,
    pub workspace_id: String,
    pub workspace_display_name: String,
    pub workspace_created_at: DateTime<Utc>,
    pub user_cr_uid: Uuid,
    pub cr_name: String,
    pub user_uid: Uuid,
    pub role: String,
    pub status: String,
    pub invited_at: Option<DateTime<Utc>>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl TryFrom<MembershipRecord> for MembershipRow {
    type Error = StoreError;

    fn try_from(record: MembershipRecord) -> StoreResult<Self> {
        let role = TeamRole::parse(&record.role)
            .ok_or_else(|| StoreError::InvalidRow(format!("unknown role '{}'", record.role)))?;
        let status = JoinStatus::parse(&record.status)
            .ok_or_else(|| StoreError::InvalidRow(format!("unknown status '{}'", record.status)))?;

        Ok(MembershipRow {
            role,
            status,
            invited_at: record.invited_at,
            joined_at: record.joined_at,
            workspace: Workspace {
                uid: record.workspace_uid,
                id: record.workspace_id,
                display_name: record.workspace_display_name,
                created_at: record.workspace_created_at,
            },
            user: UserCr {
                uid: record.user_cr_uid,
                cr_name: record.cr_name,
                user_uid: record.user_uid,
            },
        })
    }
}

impl From<&MembershipRow> for MembershipRecord {
    fn from(row: &MembershipRow) -> Self {
        Self {
            workspace_uid: row.workspace.uid,
            workspace_id: row.workspace.id.clone(),
            workspace_display_name: row.workspace.display_name.clone(),
            workspace_created_at: row.workspace.created_at,
            user_cr_uid: row.user.uid,
            cr_name: row.user.cr_name.clone(),
            user_uid: row.user.user_uid,
            role: row.role.as_str().to_string(),
            status: row.status.as_str().to_string(),
            invited_at: row.invited_at,
            joined_at: row.joined_at,
        }
    }
}

/// In-memory membership store.
///
/// Suitable for single-process deployments and testing.
#[derive(Clone, Default)]
pub struct MemoryMembershipStore {
    /// Rows keyed by (workspace uid, user cr uid)
    rows: Arc<RwLock<HashMap<(Uuid, Uuid), MembershipRow>>>,
}

impl std::fmt::Debug for MemoryMembershipStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryMembershipStore").finish_non_exhaustive()
    }
}

impl MemoryMembershipStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a membership row.
    pub async fn insert(&self, row: MembershipRow) {
        let key = (row.workspace_uid(), row.user_cr_uid());
        self.rows.write().await.insert(key, row);
    }

    /// Insert a persisted record, validating role and status.
    pub async fn insert_record(&self, record: MembershipRecord) -> StoreResult<()> {
        let row = MembershipRow::try_from(record)?;
        self.insert(row).await;
        Ok(())
    }

    /// Get one membership row.
    pub async fn get(&self, workspace_uid: Uuid, user_cr_uid: Uuid) -> Option<MembershipRow> {
        self.rows.read().await.get(&(workspace_uid, user_cr_uid)).cloned()
    }

    /// Number of rows in a workspace.
    pub async fn count(&self, workspace_uid: Uuid) -> usize {
        self.rows
            .read()
            .await
            .keys()
            .filter(|(ws, _)| *ws == workspace_uid)
            .count()
    }
}

#[async_trait]
impl MembershipStore for MemoryMembershipStore {
    async fn find_members(
        &self,
        workspace_uid: Uuid,
        user_cr_uids: &[Uuid],
        include_owner: bool,
    ) -> StoreResult<Vec<MembershipRow>> {
        let rows = self.rows.read().await;

        Ok(rows
            .values()
            .filter(|row| row.workspace_uid() == workspace_uid)
            .filter(|row| user_cr_uids.contains(&row.user_cr_uid()) || (include_owner && row.is_owner()))
            .cloned()
            .collect())
    }

    async fn delete_member(&self, workspace_uid: Uuid, user_cr_uid: Uuid) -> StoreResult<()> {
        self.rows
            .write()
            .await
            .remove(&(workspace_uid, user_cr_uid))
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                workspace_uid,
                user_cr_uid,
            })
    }
}
