//! Seat accounting models
//!
//! Seats are billed to the workspace owner, per region. A usage row exists for
//! each `(region, owner, workspace)` and counts the workspace's active seats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lowest seat count reachable by removing members.
pub const SEAT_FLOOR: u32 = 1;

/// Key of a seat usage row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatKey {
    /// Region the workspace lives in
    pub region_uid: Uuid,

    /// Global user UUID of the workspace owner
    pub user_uid: Uuid,

    /// Workspace UUID
    pub workspace_uid: Uuid,
}

impl SeatKey {
    /// Creates a new seat key.
    pub fn new(region_uid: Uuid, user_uid: Uuid, workspace_uid: Uuid) -> Self {
        Self {
            region_uid,
            user_uid,
            workspace_uid,
        }
    }
}

impl fmt::Display for SeatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region_uid, self.user_uid, self.workspace_uid)
    }
}

/// Seat usage of one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatUsage {
    /// Row key
    #[serde(flatten)]
    pub key: SeatKey,

    /// Number of billed seats
    pub seat: u32,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl SeatUsage {
    /// Creates a usage row with the given seat count.
    pub fn new(key: SeatKey, seat: u32) -> Self {
        Self {
            key,
            seat,
            updated_at: Utc::now(),
        }
    }
}

/// Seat count after one active member leaves.
///
/// Decrements by one but never goes below [`SEAT_FLOOR`].
///
/// # Examples
///
/// ```
/// use team_org::usage::seat_after_removal;
///
/// assert_eq!(seat_after_removal(5), 4);
/// assert_eq!(seat_after_removal(1), 1);
/// assert_eq!(seat_after_removal(0), 1);
/// ```
pub fn seat_after_removal(seat: u32) -> u32 {
    seat.saturating_sub(1).max(SEAT_FLOOR)
}
