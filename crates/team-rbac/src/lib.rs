//! # Team Role Bindings
//!
//! This crate carries workspace role changes to the platform's permission
//! bindings.
//!
//! ## Overview
//!
//! The team-rbac crate handles:
//! - **Actions**: Grant or deprive a workspace role
//! - **Mutations**: One role change for one principal in one workspace
//! - **Gateway**: The `RoleMutationGateway` abstraction over the binding service
//! - **Client**: An HTTP gateway implementation (feature `http`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use team_org::TeamRole;
//! use team_rbac::{GatewayEndpoint, HttpRoleGateway, RoleMutation, RoleMutationGateway};
//!
//! async fn revoke() -> Result<(), team_rbac::GatewayError> {
//!     let gateway = HttpRoleGateway::new(GatewayEndpoint::new("http://rbac.internal"))?;
//!     let mutation = RoleMutation::revoke("alice", TeamRole::Member, "ns-team");
//!     gateway.mutate_role(&mutation).await
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `http` (default): reqwest-backed gateway client

pub mod actions;
#[cfg(feature = "http")]
pub mod client;
pub mod config;
pub mod gateway;
pub mod mutation;

// Re-export main types for convenience
pub use actions::RoleAction;
#[cfg(feature = "http")]
pub use client::HttpRoleGateway;
pub use config::GatewayEndpoint;
pub use gateway::{GatewayError, GatewayResult, RoleMutationGateway};
pub use mutation::RoleMutation;
