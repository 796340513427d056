use crate::domain::auth::{AuthBackend, LoginData};
use crate::domain::session::SessionStore;
use crate::shared::error::ApiError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signs the user in and persists the returned session. The session is the
/// only state touched, and only on success: a failed login leaves whatever
/// was stored before exactly as it was.
pub struct LoginUseCase {
    backend: Arc<dyn AuthBackend>,
    session: SessionStore,
}

impl LoginUseCase {
    pub fn new(backend: Arc<dyn AuthBackend>, session: SessionStore) -> Self {
        Self { backend, session }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginData, ApiError> {
        req.validate()?;

        let data = self.backend.login(&req.email, &req.password).await?;

        self.session.set_session(
            &data.token,
            data.role,
            &data.email,
            data.must_change_password,
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Role;
    use crate::infrastructure::backends::mock::MockAuthBackend;
    use crate::infrastructure::session::MemoryStorage;

    fn session() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::default()))
    }

    #[tokio::test]
    async fn successful_login_populates_session() {
        let backend = Arc::new(
            MockAuthBackend::default().with_account("admin@x.com", "pw", Role::Admin, false),
        );
        let session = session();
        let use_case = LoginUseCase::new(backend, session.clone());

        let data = use_case
            .execute(LoginRequest {
                email: "admin@x.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .expect("login failed");

        assert_eq!(data.role, Role::Admin);
        assert!(!data.must_change_password);
        assert_eq!(session.role(), Some(Role::Admin));
        assert_eq!(session.email().as_deref(), Some("admin@x.com"));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let backend = Arc::new(MockAuthBackend::default());
        let session = session();
        let use_case = LoginUseCase::new(backend, session.clone());

        let before = session.snapshot();
        let err = use_case
            .execute(LoginRequest {
                email: "nobody@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Invalid email or password");
        assert_eq!(session.snapshot(), before);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_before_the_backend_sees_it() {
        let backend = Arc::new(MockAuthBackend::default());
        let session = session();
        let use_case = LoginUseCase::new(backend.clone(), session);

        let result = use_case
            .execute(LoginRequest {
                email: "not-an-email".to_string(),
                password: "pw".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(backend.login_calls(), 0);
    }
}
