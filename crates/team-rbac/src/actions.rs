//! Role-binding actions
//!
//! An action tells the role-binding gateway whether a workspace role is being
//! granted to a principal or taken away from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Action applied to a principal's workspace role binding.
///
/// # Examples
///
/// ```
/// use team_rbac::RoleAction;
///
/// assert_eq!(RoleAction::Deprive.as_str(), "Deprive");
/// assert!(RoleAction::Deprive.is_revocation());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoleAction {
    /// Bind the role to the principal
    Grant,

    /// Remove the role binding from the principal
    Deprive,
}

impl RoleAction {
    /// Get string representation of the action, as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grant => "Grant",
            Self::Deprive => "Deprive",
        }
    }

    /// Whether this action removes access.
    pub fn is_revocation(&self) -> bool {
        matches!(self, Self::Deprive)
    }
}

impl fmt::Display for RoleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
