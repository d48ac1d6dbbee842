//! Error types for member removal
//!
//! Validation and authorization failures are expected outcomes and map to
//! client error codes. Store, gateway and invariant failures are server errors
//! and are never retried here.

use team_auth::AuthError;
use team_rbac::GatewayError;
use thiserror::Error;

use crate::store::StoreError;

/// Member removal error types.
#[derive(Debug, Error)]
pub enum RemovalError {
    /// An identifier is missing or malformed
    #[error("Invalid input: {field} is invalid")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
    },

    /// Caller credentials could not be verified
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// The caller is not an active member of the workspace
    #[error("Actor is not an active member of the workspace")]
    ActorNotMember,

    /// The target has no removable membership in the workspace
    #[error("Target is not a member of the workspace")]
    TargetNotMember,

    /// The caller's role does not allow managing the target
    #[error("Insufficient privilege to remove the target")]
    InsufficientPrivilege,

    /// The Owner tried to remove themself
    #[error("The workspace owner cannot remove themself")]
    CannotRemoveSelfAsOwner,

    /// The workspace has no Owner row
    #[error("No owner found in workspace")]
    NoOwnerFound,

    /// The role gateway rejected or failed the revocation
    #[error("Role mutation failed: {0}")]
    RoleMutationFailed(#[source] GatewayError),

    /// The membership row could not be deleted
    #[error("Membership delete failed: {0}")]
    MembershipDeleteFailed(#[source] StoreError),

    /// The membership rows could not be loaded
    #[error("Membership load failed: {0}")]
    MembershipLoadFailed(#[source] StoreError),

    /// The removal did not finish before its deadline
    #[error("Removal deadline exceeded")]
    DeadlineExceeded,
}

/// Result type for removal operations.
pub type RemovalResult<T> = Result<T, RemovalError>;

impl RemovalError {
    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Check if the caller may retry the removal as is.
    pub fn is_retriable(&self) -> bool {
        match self {
            RemovalError::RoleMutationFailed(_) | RemovalError::DeadlineExceeded => true,
            RemovalError::MembershipLoadFailed(StoreError::Unavailable(_)) => true,
            _ => false,
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RemovalError::InvalidInput { .. } => 400,
            RemovalError::Unauthorized(e) if e.is_server_error() => 500,
            RemovalError::Unauthorized(_) => 401,
            RemovalError::ActorNotMember
            | RemovalError::InsufficientPrivilege
            | RemovalError::CannotRemoveSelfAsOwner => 403,
            RemovalError::TargetNotMember => 404,

            RemovalError::NoOwnerFound
            | RemovalError::RoleMutationFailed(_)
            | RemovalError::MembershipDeleteFailed(_)
            | RemovalError::MembershipLoadFailed(_)
            | RemovalError::DeadlineExceeded => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RemovalError::InvalidInput { .. } => "INVALID_INPUT",
            RemovalError::Unauthorized(_) => "UNAUTHORIZED",
            RemovalError::ActorNotMember => "ACTOR_NOT_MEMBER",
            RemovalError::TargetNotMember => "TARGET_NOT_MEMBER",
            RemovalError::InsufficientPrivilege => "INSUFFICIENT_PRIVILEGE",
            RemovalError::CannotRemoveSelfAsOwner => "CANNOT_REMOVE_SELF_AS_OWNER",
            RemovalError::NoOwnerFound => "NO_OWNER_FOUND",
            RemovalError::RoleMutationFailed(_) => "ROLE_MUTATION_FAILED",
            RemovalError::MembershipDeleteFailed(_) => "MEMBERSHIP_DELETE_FAILED",
            RemovalError::MembershipLoadFailed(_) => "MEMBERSHIP_LOAD_FAILED",
            RemovalError::DeadlineExceeded => "DEADLINE_EXCEEDED",
        }
    }

    /// Message shown to the console user.
    ///
    /// Server errors share one message so internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            RemovalError::InvalidInput { field } => format!("{} is invalid", console_field_name(field)),
            RemovalError::Unauthorized(_) if !self.is_server_error() => "token verify error".to_string(),
            RemovalError::ActorNotMember => "you are not in the namespace".to_string(),
            RemovalError::CannotRemoveSelfAsOwner => "target user must be others".to_string(),
            RemovalError::InsufficientPrivilege => "you are not manager".to_string(),
            RemovalError::TargetNotMember => "target user is not in namespace".to_string(),
            _ => "fail to remove team member".to_string(),
        }
    }
}

/// Name the console uses for a request field in its error messages.
fn console_field_name(field: &str) -> &str {
    match field {
        "ns_uid" => "ns_id",
        "targetUserCrUid" => "tUserId",
        other => other,
    }
}
