//! Role gateway HTTP client.
//!
//! Sends role mutations to the role-binding service, which maintains the
//! platform permission bindings for each workspace.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

use crate::config::GatewayEndpoint;
use crate::gateway::{GatewayError, GatewayResult, RoleMutationGateway};
use crate::mutation::RoleMutation;

/// Path of the role mutation endpoint.
pub const ROLE_MUTATION_PATH: &str = "/api/v1/workspace/role";

/// HTTP implementation of [`RoleMutationGateway`].
#[derive(Clone)]
pub struct HttpRoleGateway {
    /// HTTP client instance.
    client: Client,

    /// Gateway endpoint configuration.
    endpoint: GatewayEndpoint,
}

impl std::fmt::Debug for HttpRoleGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoleGateway")
            .field("base_url", &self.endpoint.base_url)
            .field("api_key", &self.endpoint.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpRoleGateway {
    /// Create a new gateway client.
    pub fn new(endpoint: GatewayEndpoint) -> GatewayResult<Self> {
        let client = Client::builder().timeout(endpoint.timeout()).build()?;

        Ok(Self { client, endpoint })
    }

    /// Gateway endpoint configuration.
    pub fn endpoint(&self) -> &GatewayEndpoint {
        &self.endpoint
    }

    async fn handle_response(&self, response: reqwest::Response) -> GatewayResult<()> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            error!("Role gateway authentication failed");
            return Err(GatewayError::AuthenticationFailed);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Role gateway error ({}): {}", status.as_u16(), message);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl RoleMutationGateway for HttpRoleGateway {
    #[instrument(
        skip(self, mutation),
        fields(
            principal = %mutation.principal,
            workspace_id = %mutation.workspace_id,
            action = %mutation.action,
            role = %mutation.role,
        )
    )]
    async fn mutate_role(&self, mutation: &RoleMutation) -> GatewayResult<()> {
        debug!("Sending role mutation");

        let url = self.endpoint.url(ROLE_MUTATION_PATH);
        let mut request = self.client.post(&url).json(mutation);

        if let Some(ref api_key) = self.endpoint.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await?;
        self.handle_response(response).await?;

        if mutation.action.is_revocation() {
            debug!("Role binding revoked");
        } else {
            debug!("Role binding granted");
        }
        Ok(())
    }
}
