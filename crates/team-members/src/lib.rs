//! # Team Members
//!
//! This crate removes users from workspaces: it checks the caller's authority,
//! revokes the removed user's role binding, deletes the membership and keeps
//! the workspace owner's seat count in step.
//!
//! ## Overview
//!
//! The team-members crate handles:
//! - **Removal**: The `MemberRemover` orchestrator and its `RemoveMember` command
//! - **Stores**: Membership and seat usage store abstractions with in-memory implementations
//! - **Seats**: Transactional seat release, floored at one seat
//! - **API**: Request verification and console response mapping
//! - **Config**: Environment-based configuration
//!
//! ## Removal Flow
//!
//! ```text
//! verify token ─→ load actor, target, owner ─→ policy checks
//!                                                 │
//!                 ┌───────────────────────────────┴──────────────┐
//!              Invited                                      InWorkspace
//!          delete membership              revoke role ─→ delete membership ─→ release seat
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use team_members::{MemberRemover, MemoryMembershipStore, MemorySeatStore, RemoveMember};
//! use team_rbac::{GatewayEndpoint, HttpRoleGateway};
//! use uuid::Uuid;
//!
//! async fn remove(region: Uuid, cmd: RemoveMember) -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = HttpRoleGateway::new(GatewayEndpoint::new("http://rbac.internal"))?;
//!     let remover = MemberRemover::new(
//!         Arc::new(MemoryMembershipStore::new()),
//!         Arc::new(MemorySeatStore::new()),
//!         Arc::new(gateway),
//!         region,
//!     );
//!
//!     let outcome = remover.remove_member(cmd).await?;
//!     println!("removed {} ({:?})", outcome.target, outcome.seat);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod removal;
pub mod seats;
pub mod store;

// Re-export main types for convenience
pub use api::{ApiResponse, RemoveMemberRequest, RemoveMemberService};
pub use config::{ConfigError, RemovalConfig};
pub use error::{RemovalError, RemovalResult};
pub use removal::{MemberRemover, RemovalOutcome, RemoveMember};
pub use seats::{release_seat, MemorySeatStore, SeatAdjustment, SeatError, SeatResult, SeatStore, SeatTransaction};
pub use store::{MemoryMembershipStore, MembershipRecord, MembershipStore, StoreError, StoreResult};
