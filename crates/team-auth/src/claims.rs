//! Access token claims
//!
//! The claims a region issues to a signed-in console user. They identify the
//! user globally and within the region, and name the workspace the session
//! currently points at.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a regional access token.
///
/// # Example
///
/// ```rust
/// use team_auth::AccessClaims;
/// use uuid::Uuid;
///
/// let claims = AccessClaims::new(Uuid::new_v4(), Uuid::new_v4(), "alice", Uuid::new_v4(), chrono::Duration::hours(1));
/// assert!(!claims.is_expired());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Global user UUID
    pub user_uid: Uuid,

    /// Global user id (display id)
    #[serde(default)]
    pub user_id: String,

    /// Regional user UUID
    pub user_cr_uid: Uuid,

    /// Regional principal name
    pub user_cr_name: String,

    /// Region that issued the token
    pub region_uid: Uuid,

    /// Workspace UUID of the current session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_uid: Option<Uuid>,

    /// External workspace id of the current session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl AccessClaims {
    /// Create claims valid for `duration` from now.
    pub fn new(
        user_uid: Uuid,
        user_cr_uid: Uuid,
        user_cr_name: impl Into<String>,
        region_uid: Uuid,
        duration: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_uid,
            user_id: String::new(),
            user_cr_uid,
            user_cr_name: user_cr_name.into(),
            region_uid,
            workspace_uid: None,
            workspace_id: None,
            exp: (now + duration).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Point the session at a workspace.
    pub fn with_workspace(mut self, workspace_uid: Uuid, workspace_id: impl Into<String>) -> Self {
        self.workspace_uid = Some(workspace_uid);
        self.workspace_id = Some(workspace_id.into());
        self
    }

    /// Set the global display id.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Check whether the token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_wire_names() {
        let claims = AccessClaims::new(Uuid::new_v4(), Uuid::new_v4(), "alice", Uuid::new_v4(), Duration::hours(1))
            .with_workspace(Uuid::new_v4(), "ns-alice");
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["userCrName"], "alice");
        assert_eq!(json["workspaceId"], "ns-alice");
        assert!(json.get("userCrUid").is_some());
        assert!(json.get("regionUid").is_some());
    }

    #[test]
    fn test_expired_claims() {
        let claims = AccessClaims::new(Uuid::new_v4(), Uuid::new_v4(), "bob", Uuid::new_v4(), Duration::hours(-1));
        assert!(claims.is_expired());
    }
}
