use crate::domain::auth::AuthBackend;
use crate::domain::session::SessionStore;
use crate::shared::error::ApiError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "New password must be at least 8 characters."))]
    pub new_password: String,
}

/// Rotates the password and, on success, lifts the forced-change flag so
/// the route guard stops funneling the user to the change-password screen.
pub struct ChangePasswordUseCase {
    backend: Arc<dyn AuthBackend>,
    session: SessionStore,
}

impl ChangePasswordUseCase {
    pub fn new(backend: Arc<dyn AuthBackend>, session: SessionStore) -> Self {
        Self { backend, session }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, req: ChangePasswordRequest) -> Result<(), ApiError> {
        req.validate()?;

        self.backend
            .change_password(&req.current_password, &req.new_password)
            .await?;

        self.session.clear_must_change_password();
        Ok(())
    }
}
