//! Request surface for member removal
//!
//! Verifies the caller, validates the raw request identifiers and maps the
//! removal result to the JSON response the console expects.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use team_auth::{AuthVerifier, JwtService, RequestCredentials};
use team_rbac::HttpRoleGateway;
use tracing::{error, instrument, warn};

use crate::config::{ConfigError, RemovalConfig};
use crate::error::{RemovalError, RemovalResult};
use crate::removal::{MemberRemover, RemovalOutcome, RemoveMember};
use crate::seats::{SeatAdjustment, SeatStore};
use crate::store::MembershipStore;

/// Message of every successful removal.
pub const SUCCESS_MESSAGE: &str = "Successfully";

/// Body of a removal request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveMemberRequest {
    /// Workspace UUID
    #[serde(default)]
    pub ns_uid: Option<String>,

    /// Regional user UUID of the user to remove
    #[serde(default, rename = "targetUserCrUid")]
    pub target_user_cr_uid: Option<String>,
}

impl RemoveMemberRequest {
    /// Creates a request for the given workspace and target.
    pub fn new(ns_uid: impl Into<String>, target_user_cr_uid: impl Into<String>) -> Self {
        Self {
            ns_uid: Some(ns_uid.into()),
            target_user_cr_uid: Some(target_user_cr_uid.into()),
        }
    }
}

/// Response body of a removal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code
    pub code: u16,

    /// Console message
    pub message: String,

    /// Side note on a successful removal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ApiResponse {
    /// Successful removal.
    pub fn success() -> Self {
        Self {
            code: 200,
            message: SUCCESS_MESSAGE.to_string(),
            warning: None,
        }
    }

    /// Successful removal, mapped from its outcome.
    pub fn from_outcome(outcome: &RemovalOutcome) -> Self {
        let mut response = Self::success();
        if let SeatAdjustment::Failed { reason } = &outcome.seat {
            response.warning = Some(format!("seat usage was not updated: {}", reason));
        }
        response
    }

    /// Failed removal.
    pub fn from_error(err: &RemovalError) -> Self {
        Self {
            code: err.status_code(),
            message: err.client_message(),
            warning: None,
        }
    }

    /// Malformed request body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: 400,
            message: message.into(),
            warning: None,
        }
    }

    /// Whether the response reports success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Handles removal requests from the console.
#[derive(Clone)]
pub struct RemoveMemberService {
    verifier: Arc<dyn AuthVerifier>,
    remover: MemberRemover,
}

impl std::fmt::Debug for RemoveMemberService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoveMemberService")
            .field("remover", &self.remover)
            .finish_non_exhaustive()
    }
}

impl RemoveMemberService {
    /// Creates a service.
    pub fn new(verifier: Arc<dyn AuthVerifier>, remover: MemberRemover) -> Self {
        Self { verifier, remover }
    }

    /// Creates a service with the JWT verifier and HTTP role gateway.
    pub fn from_config(
        config: &RemovalConfig,
        members: Arc<dyn MembershipStore>,
        seats: Arc<dyn SeatStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let secret = config
            .jwt_secret
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        let verifier = JwtService::with_secret(secret).map_err(|e| ConfigError::InvalidValue {
            key: "JWT_SECRET".to_string(),
            message: e.to_string(),
        })?;
        let gateway = HttpRoleGateway::new(config.gateway.clone()).map_err(|e| ConfigError::InvalidValue {
            key: "ROLE_GATEWAY_URL".to_string(),
            message: e.to_string(),
        })?;

        let remover = MemberRemover::from_config(config, members, seats, Arc::new(gateway));
        Ok(Self::new(Arc::new(verifier), remover))
    }

    /// The underlying remover.
    pub fn remover(&self) -> &MemberRemover {
        &self.remover
    }

    /// Verify the caller and remove the requested member.
    pub async fn remove(
        &self,
        credentials: &RequestCredentials,
        request: &RemoveMemberRequest,
    ) -> RemovalResult<RemovalOutcome> {
        let claims = self.verifier.verify(credentials).await?;

        let cmd = RemoveMember::parse(
            claims.user_cr_uid,
            request.ns_uid.as_deref(),
            request.target_user_cr_uid.as_deref(),
        )?;

        self.remover.remove_member(cmd).await
    }

    /// Handle a removal request.
    #[instrument(skip_all, fields(ns_uid = ?request.ns_uid))]
    pub async fn handle(&self, credentials: &RequestCredentials, request: RemoveMemberRequest) -> ApiResponse {
        match self.remove(credentials, &request).await {
            Ok(outcome) => ApiResponse::from_outcome(&outcome),
            Err(e) => {
                if e.is_server_error() {
                    error!(error = %e, code = e.error_code(), "Failed to remove team member");
                } else {
                    warn!(error = %e, code = e.error_code(), "Team member removal rejected");
                }
                ApiResponse::from_error(&e)
            }
        }
    }

    /// Handle a removal request with a raw JSON body.
    pub async fn handle_json(&self, credentials: &RequestCredentials, body: &[u8]) -> ApiResponse {
        match serde_json::from_slice::<RemoveMemberRequest>(body) {
            Ok(request) => self.handle(credentials, request).await,
            Err(e) => {
                warn!(error = %e, "Malformed removal request body");
                ApiResponse::bad_request(format!("invalid request body: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_request_wire_names() {
        let request: RemoveMemberRequest =
            serde_json::from_str(r#"{"ns_uid":"a","targetUserCrUid":"b"}"#).unwrap();
        assert_eq!(request, RemoveMemberRequest::new("a", "b"));

        let empty: RemoveMemberRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RemoveMemberRequest::default());
    }

    #[test]
    fn test_success_response() {
        let outcome = RemovalOutcome {
            workspace_uid: Uuid::new_v4(),
            target: Uuid::new_v4(),
            previous_status: team_org::JoinStatus::InWorkspace,
            seat: SeatAdjustment::Adjusted { previous: 2, current: 1 },
        };
        let response = ApiResponse::from_outcome(&outcome);

        assert!(response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "code": 200, "message": "Successfully" })
        );
    }

    #[test]
    fn test_seat_failure_warning() {
        let outcome = RemovalOutcome {
            workspace_uid: Uuid::new_v4(),
            target: Uuid::new_v4(),
            previous_status: team_org::JoinStatus::InWorkspace,
            seat: SeatAdjustment::Failed {
                reason: "lock timeout".to_string(),
            },
        };
        let response = ApiResponse::from_outcome(&outcome);

        assert_eq!(response.code, 200);
        assert!(response.warning.unwrap().contains("lock timeout"));
    }

    #[test]
    fn test_error_response() {
        let response = ApiResponse::from_error(&RemovalError::InsufficientPrivilege);
        assert_eq!(response.code, 403);
        assert_eq!(response.message, "you are not manager");
        assert!(!response.is_success());
    }

    #[test]
    fn test_from_config_requires_secret() {
        let config = RemovalConfig::for_region(Uuid::new_v4());
        let result = RemoveMemberService::from_config(
            &config,
            Arc::new(crate::store::MemoryMembershipStore::new()),
            Arc::new(crate::seats::MemorySeatStore::new()),
        );
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref key)) if key == "JWT_SECRET"));
    }
}
