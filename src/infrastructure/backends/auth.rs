use crate::domain::auth::{AuthBackend, LoginData};
use crate::infrastructure::http::ApiClient;
use crate::shared::error::ApiError;
use async_trait::async_trait;
use serde::Serialize;

const LOGIN_PATH: &str = "/api/v1/auth/login";
const CHANGE_PASSWORD_PATH: &str = "/api/v1/auth/change-password";
const FORGOT_PASSWORD_PATH: &str = "/api/v1/auth/forgot-password";
const RESET_PASSWORD_PATH: &str = "/api/v1/auth/reset-password";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordBody<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForgotPasswordBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordBody<'a> {
    token: &'a str,
    new_password: &'a str,
}

pub struct HttpAuthBackend {
    api: ApiClient,
}

impl HttpAuthBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        self.api
            .post_json(LOGIN_PATH, &LoginBody { email, password })
            .await
    }

    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.api
            .post_json_ack(
                CHANGE_PASSWORD_PATH,
                &ChangePasswordBody {
                    current_password,
                    new_password,
                },
            )
            .await
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.api
            .post_json_ack(FORGOT_PASSWORD_PATH, &ForgotPasswordBody { email })
            .await
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        self.api
            .post_json_ack(
                RESET_PASSWORD_PATH,
                &ResetPasswordBody {
                    token,
                    new_password,
                },
            )
            .await
    }
}
