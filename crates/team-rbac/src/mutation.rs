//! Role mutation requests
//!
//! A `RoleMutation` describes one change to a principal's workspace role
//! binding, in the shape the role-binding service expects.

use serde::{Deserialize, Serialize};
use team_org::{MembershipRow, TeamRole};

use crate::actions::RoleAction;

/// A change to a principal's workspace role binding.
///
/// # Examples
///
/// ```
/// use team_org::TeamRole;
/// use team_rbac::{RoleAction, RoleMutation};
///
/// let mutation = RoleMutation::revoke("alice", TeamRole::Manager, "ns-team");
/// assert_eq!(mutation.action, RoleAction::Deprive);
/// assert_eq!(mutation.previous_role, TeamRole::Manager);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMutation {
    /// Platform principal name of the user
    #[serde(rename = "k8sUsername")]
    pub principal: String,

    /// Role the action applies to
    pub role: TeamRole,

    /// Grant or deprive
    pub action: RoleAction,

    /// External workspace id (namespace name)
    #[serde(rename = "workspaceId")]
    pub workspace_id: String,

    /// Role held before this change
    #[serde(rename = "preRole")]
    pub previous_role: TeamRole,
}

impl RoleMutation {
    /// Revoke `role` from `principal` in the given workspace.
    pub fn revoke(principal: impl Into<String>, role: TeamRole, workspace_id: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            role,
            action: RoleAction::Deprive,
            workspace_id: workspace_id.into(),
            previous_role: role,
        }
    }

    /// Grant `role` to `principal`, replacing `previous_role`.
    pub fn grant(
        principal: impl Into<String>,
        role: TeamRole,
        workspace_id: impl Into<String>,
        previous_role: TeamRole,
    ) -> Self {
        Self {
            principal: principal.into(),
            role,
            action: RoleAction::Grant,
            workspace_id: workspace_id.into(),
            previous_role,
        }
    }

    /// Revoke the role a membership row currently holds.
    pub fn revoke_membership(row: &MembershipRow) -> Self {
        Self::revoke(row.user.cr_name.clone(), row.role, row.workspace.id.clone())
    }
}
