//! Membership domain models
//!
//! This module provides the membership record linking a user to a workspace,
//! including the user's role and where they are in the join lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::TeamRole;
use crate::workspace::{UserCr, Workspace};

/// Join lifecycle of a membership.
///
/// A membership starts as `Invited` and becomes `InWorkspace` once the
/// invitation is accepted. `NotInWorkspace` marks rows kept after the user
/// left or declined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinStatus {
    /// Invitation sent, not yet accepted
    Invited,

    /// Active member
    InWorkspace,

    /// Left, declined, or otherwise inactive
    NotInWorkspace,
}

impl JoinStatus {
    /// Whether this status denotes an active member.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InWorkspace)
    }

    /// Get string representation of the status, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invited => "INVITED",
            Self::InWorkspace => "IN_WORKSPACE",
            Self::NotInWorkspace => "NOT_IN_WORKSPACE",
        }
    }

    /// Parse a persisted status string.
    ///
    /// # Examples
    ///
    /// ```
    /// use team_org::JoinStatus;
    ///
    /// assert_eq!(JoinStatus::parse("IN_WORKSPACE"), Some(JoinStatus::InWorkspace));
    /// assert_eq!(JoinStatus::parse("pending"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INVITED" => Some(Self::Invited),
            "IN_WORKSPACE" => Some(Self::InWorkspace),
            "NOT_IN_WORKSPACE" => Some(Self::NotInWorkspace),
            _ => None,
        }
    }
}

/// A membership row joined with its workspace and user identity.
///
/// Unique per `(workspace.uid, user.uid)`.
///
/// # Examples
///
/// ```
/// use team_org::{JoinStatus, MembershipRow, TeamRole, UserCr, Workspace};
///
/// let workspace = Workspace::new("ns-team", "Team");
/// let row = MembershipRow::active(workspace, UserCr::new("alice"), TeamRole::Owner);
/// assert!(row.status.is_active());
/// assert!(row.is_owner());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRow {
    /// Role within the workspace
    pub role: TeamRole,

    /// Join lifecycle status
    pub status: JoinStatus,

    /// When the invitation was created
    pub invited_at: Option<DateTime<Utc>>,

    /// When the user joined
    pub joined_at: Option<DateTime<Utc>>,

    /// The workspace
    pub workspace: Workspace,

    /// The member's regional identity
    pub user: UserCr,
}

impl MembershipRow {
    /// Creates an active membership.
    pub fn active(workspace: Workspace, user: UserCr, role: TeamRole) -> Self {
        Self {
            role,
            status: JoinStatus::InWorkspace,
            invited_at: None,
            joined_at: Some(Utc::now()),
            workspace,
            user,
        }
    }

    /// Creates a pending invitation.
    pub fn invited(workspace: Workspace, user: UserCr, role: TeamRole) -> Self {
        Self {
            role,
            status: JoinStatus::Invited,
            invited_at: Some(Utc::now()),
            joined_at: None,
            workspace,
            user,
        }
    }

    /// Override the join status.
    pub fn with_status(mut self, status: JoinStatus) -> Self {
        self.status = status;
        self
    }

    /// Workspace UUID of this membership.
    pub fn workspace_uid(&self) -> Uuid {
        self.workspace.uid
    }

    /// Regional user UUID of this membership.
    pub fn user_cr_uid(&self) -> Uuid {
        self.user.uid
    }

    /// Whether this row holds the Owner role.
    pub fn is_owner(&self) -> bool {
        self.role == TeamRole::Owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_membership() {
        let workspace = Workspace::new("ns-a", "A");
        let user = UserCr::new("alice");
        let row = MembershipRow::active(workspace.clone(), user.clone(), TeamRole::Manager);

        assert_eq!(row.workspace_uid(), workspace.uid);
        assert_eq!(row.user_cr_uid(), user.uid);
        assert_eq!(row.status, JoinStatus::InWorkspace);
        assert!(row.joined_at.is_some());
        assert!(!row.is_owner());
    }

    #[test]
    fn test_invited_membership() {
        let row = MembershipRow::invited(Workspace::new("ns-a", "A"), UserCr::new("bob"), TeamRole::Member);

        assert_eq!(row.status, JoinStatus::Invited);
        assert!(!row.status.is_active());
        assert!(row.joined_at.is_none());
    }

    #[test]
    fn test_join_status_round_trip_strings() {
        for status in [JoinStatus::Invited, JoinStatus::InWorkspace, JoinStatus::NotInWorkspace] {
            assert_eq!(JoinStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(
            serde_json::to_string(&JoinStatus::InWorkspace).unwrap(),
            "\"IN_WORKSPACE\""
        );
    }
}
