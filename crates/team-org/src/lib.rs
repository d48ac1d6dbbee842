//! # Team Organization Model
//!
//! This crate provides the workspace (namespace) team model shared by the
//! team management services.
//!
//! ## Overview
//!
//! The team-org crate handles:
//! - **Workspaces**: Tenant containers identified by a UUID and a namespace id
//! - **Memberships**: User-workspace relationships with a role and join status
//! - **Roles**: The fixed Owner > Manager > Member hierarchy
//! - **Policy**: Which member may manage which other member
//! - **Seat usage**: Per-owner seat accounting rows
//!
//! ## Architecture
//!
//! ```text
//! UserCr
//!   └─ MembershipRow (role, status) ─→ Workspace
//!                                         └─ SeatUsage (region, owner, workspace)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use team_org::{MembershipRow, TeamRole, UserCr, Workspace};
//!
//! let workspace = Workspace::new("ns-acme", "Acme");
//! let owner = MembershipRow::active(workspace.clone(), UserCr::new("alice"), TeamRole::Owner);
//! let member = MembershipRow::invited(workspace, UserCr::new("bob"), TeamRole::Member);
//!
//! assert!(owner.role.can_manage(member.role, false));
//! ```

pub mod ids;
pub mod membership;
pub mod roles;
pub mod usage;
pub mod workspace;

// Re-export main types for convenience
pub use membership::{JoinStatus, MembershipRow};
pub use roles::{can_manage, TeamRole};
pub use usage::{SeatKey, SeatUsage, SEAT_FLOOR};
pub use workspace::{UserCr, Workspace};
