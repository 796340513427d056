use crate::domain::session::Role;
use crate::shared::error::ApiError;
use async_trait::async_trait;
use serde::Deserialize;

/// What a successful login hands back; the session store persists it as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub role: Role,
    pub email: String,
    pub must_change_password: bool,
}

/// The authentication surface of the external REST API. One round trip per
/// call, no retries; failures arrive as typed errors with displayable
/// messages.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError>;

    /// Requires the current password to match server-side.
    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError>;

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError>;
}
