//! Workspace roles and the member management policy
//!
//! This module defines the fixed three-tier role hierarchy of a workspace and
//! the rule deciding which member may manage (remove) which other member.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role within a workspace.
///
/// Roles are hierarchical. The hierarchy is: Member < Manager < Owner.
/// A workspace has exactly one Owner while it has any active member.
///
/// # Permission Model
///
/// - **Member**: Uses workspace resources, may leave the workspace
/// - **Manager**: Invites and removes members, may leave the workspace
/// - **Owner**: Full workspace control, cannot leave it
///
/// # Examples
///
/// ```
/// use team_org::TeamRole;
///
/// assert!(TeamRole::Owner > TeamRole::Manager);
/// assert!(TeamRole::Manager.can_manage(TeamRole::Member, false));
/// assert!(!TeamRole::Member.can_manage(TeamRole::Manager, false));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    /// Regular member of the workspace
    #[serde(alias = "DEVELOPER")]
    Member = 1,

    /// Can invite and remove members
    Manager = 2,

    /// Workspace owner
    Owner = 3,
}

impl TeamRole {
    /// All roles, lowest privilege first.
    pub const ALL: [TeamRole; 3] = [TeamRole::Member, TeamRole::Manager, TeamRole::Owner];

    /// Numeric privilege rank. Higher ranks manage lower ranks.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Check whether a member holding this role may manage a member holding
    /// `target`.
    ///
    /// Management is allowed when this role strictly outranks the target, or
    /// when both ranks are equal, the target is the actor itself, and the
    /// actor is not the Owner. A workspace has a single Owner, so the Owner
    /// can never manage itself.
    ///
    /// # Arguments
    ///
    /// * `target` - Role of the member being managed
    /// * `is_self` - Whether the target member is the actor
    ///
    /// # Examples
    ///
    /// ```
    /// use team_org::TeamRole;
    ///
    /// // Leaving the workspace
    /// assert!(TeamRole::Manager.can_manage(TeamRole::Manager, true));
    /// assert!(!TeamRole::Owner.can_manage(TeamRole::Owner, true));
    ///
    /// // Peers cannot remove each other
    /// assert!(!TeamRole::Manager.can_manage(TeamRole::Manager, false));
    /// ```
    pub fn can_manage(&self, target: TeamRole, is_self: bool) -> bool {
        can_manage(*self, target, is_self)
    }

    /// Parse role from string representation.
    ///
    /// Accepts `developer` as the legacy name of [`TeamRole::Member`].
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(TeamRole)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use team_org::TeamRole;
    ///
    /// assert_eq!(TeamRole::parse("OWNER"), Some(TeamRole::Owner));
    /// assert_eq!(TeamRole::parse("developer"), Some(TeamRole::Member));
    /// assert_eq!(TeamRole::parse("admin"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(Self::Owner),
            "manager" => Some(Self::Manager),
            "member" | "developer" => Some(Self::Member),
            _ => None,
        }
    }

    /// Get string representation of the role, as persisted.
    ///
    /// # Examples
    ///
    /// ```
    /// use team_org::TeamRole;
    ///
    /// assert_eq!(TeamRole::Manager.as_str(), "MANAGER");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "MEMBER",
            Self::Manager => "MANAGER",
            Self::Owner => "OWNER",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Manager => "Manager",
            Self::Owner => "Owner",
        }
    }
}

impl Default for TeamRole {
    fn default() -> Self {
        Self::Member
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether `actor` may manage `target`.
///
/// Free-function form of [`TeamRole::can_manage`].
pub fn can_manage(actor: TeamRole, target: TeamRole, is_self: bool) -> bool {
    if actor.rank() > target.rank() {
        return true;
    }

    actor.rank() == target.rank() && is_self && actor != TeamRole::Owner
}
