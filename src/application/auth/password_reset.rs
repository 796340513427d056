use crate::domain::auth::AuthBackend;
use crate::shared::error::ApiError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Shown for every reset request that reaches the backend, whether or not
/// the address belongs to an account. Revealing which is which would let
/// anyone probe for registered emails.
pub const RESET_REQUEST_MESSAGE: &str =
    "If an account exists for this email, a password reset link has been sent.";

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "New password must be at least 8 characters."))]
    pub new_password: String,
}

/// The two stateless halves of the email-based reset flow. Neither touches
/// the session store.
pub struct PasswordResetUseCase {
    backend: Arc<dyn AuthBackend>,
}

impl PasswordResetUseCase {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self { backend }
    }

    /// Asks the backend to send a reset email. Everything except a
    /// transport failure collapses into the same generic outcome; only the
    /// user's mailbox knows whether the account exists.
    #[tracing::instrument(skip_all)]
    pub async fn request_reset(
        &self,
        req: ForgotPasswordRequest,
    ) -> Result<&'static str, ApiError> {
        req.validate()?;

        match self.backend.forgot_password(&req.email).await {
            Ok(()) => Ok(RESET_REQUEST_MESSAGE),
            Err(err @ ApiError::Network(_)) => Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "reset request collapsed to generic outcome");
                Ok(RESET_REQUEST_MESSAGE)
            }
        }
    }

    /// Completes the flow with the token from the email. Token problems
    /// (expired, already used) surface verbatim.
    #[tracing::instrument(skip_all)]
    pub async fn complete_reset(&self, req: ResetPasswordRequest) -> Result<(), ApiError> {
        req.validate()?;
        self.backend
            .reset_password(&req.token, &req.new_password)
            .await
    }
}
