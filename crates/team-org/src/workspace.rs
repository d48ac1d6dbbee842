//! Workspace and user identity models
//!
//! A workspace (namespace) is the tenant-scoped container members join.
//! A `UserCr` is the per-region identity of a user inside the platform,
//! carrying the principal name used for permission bindings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workspace (namespace).
///
/// # Examples
///
/// ```
/// use team_org::Workspace;
///
/// let workspace = Workspace::new("ns-a1b2c3", "Platform Team");
/// assert_eq!(workspace.id, "ns-a1b2c3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Internal workspace UUID
    pub uid: Uuid,

    /// External workspace id (the namespace name, e.g. `ns-a1b2c3`)
    pub id: String,

    /// Display name shown in the console
    pub display_name: String,

    /// When the workspace was created
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a new workspace with a fresh UUID.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: Uuid::now_v7(),
            id: id.into(),
            display_name: display_name.into(),
            created_at: Utc::now(),
        }
    }

    /// Use an existing UUID for this workspace.
    pub fn with_uid(mut self, uid: Uuid) -> Self {
        self.uid = uid;
        self
    }
}

/// Regional identity of a user.
///
/// `uid` identifies the user within the region and is what memberships
/// reference. `user_uid` is the global user id, which keys seat accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCr {
    /// Regional user UUID
    pub uid: Uuid,

    /// Principal name used for permission bindings
    pub cr_name: String,

    /// Global user UUID
    pub user_uid: Uuid,
}

impl UserCr {
    /// Creates a new regional identity with fresh UUIDs.
    pub fn new(cr_name: impl Into<String>) -> Self {
        Self {
            uid: Uuid::now_v7(),
            cr_name: cr_name.into(),
            user_uid: Uuid::now_v7(),
        }
    }

    /// Use an existing global user UUID.
    pub fn with_user_uid(mut self, user_uid: Uuid) -> Self {
        self.user_uid = user_uid;
        self
    }
}
