use crate::domain::session::SessionStore;
use crate::shared::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use crate::shared::validation::FileUpload;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Conventional response wrapper used by every JSON endpoint. Some
/// deployments put the failure text under `error`, older ones under
/// `message`; both are honored.
#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

impl<T> Envelope<T> {
    fn detail(self) -> Option<String> {
        self.error.or(self.message)
    }
}

/// Thin wrapper over `reqwest` that owns the base URL, attaches the session
/// token, and decodes the response envelope into `ApiError`s. One request
/// per operation; nothing is retried here.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: SessionStore,
    ) -> Result<Self, ApiError> {
        // Parse once so a bad base URL fails at startup, not per request.
        Url::parse(base_url)
            .map_err(|err| ApiError::Unknown(format!("Invalid API base URL: {err}")))?;

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|_| ApiError::network())?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.get(self.endpoint(path)).query(query))
            .send()
            .await
            .map_err(transport_error)?;
        read_envelope(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http.post(self.endpoint(path)).json(body))
            .send()
            .await
            .map_err(transport_error)?;
        read_envelope(response).await
    }

    /// POST where the caller only cares that the envelope reports success.
    pub async fn post_json_ack<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .authorize(self.http.post(self.endpoint(path)).json(body))
            .send()
            .await
            .map_err(transport_error)?;
        read_ack(response).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.endpoint(path)))
            .send()
            .await
            .map_err(transport_error)?;
        read_envelope(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http.put(self.endpoint(path)).json(body))
            .send()
            .await
            .map_err(transport_error)?;
        read_envelope(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.delete(self.endpoint(path)))
            .send()
            .await
            .map_err(transport_error)?;
        read_envelope(response).await
    }

    pub async fn delete_ack(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(self.endpoint(path)))
            .send()
            .await
            .map_err(transport_error)?;
        read_ack(response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.endpoint(path)).multipart(form))
            .send()
            .await
            .map_err(transport_error)?;
        read_envelope(response).await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.put(self.endpoint(path)).multipart(form))
            .send()
            .await
            .map_err(transport_error)?;
        read_envelope(response).await
    }

    /// Binary downloads (PDFs, photos) bypass the envelope on success but
    /// still decode it on failure.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .authorize(self.http.get(self.endpoint(path)))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if status.is_success() {
            return Ok(body.to_vec());
        }
        Err(error_from_status(status, envelope_detail(&body)))
    }
}

/// One part of a multipart request holding an uploaded file.
pub fn file_part(upload: &FileUpload) -> Result<Part, ApiError> {
    Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|_| {
            ApiError::Validation(format!(
                "Unrecognized content type: {}",
                upload.content_type
            ))
        })
}

/// The JSON-encoded `data` part carried by staff create/update payloads.
pub fn json_part<B: Serialize>(value: &B) -> Result<Part, ApiError> {
    let body = serde_json::to_vec(value).map_err(|_| ApiError::unknown())?;
    Part::bytes(body)
        .mime_str("application/json")
        .map_err(|_| ApiError::unknown())
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport_error)?;
    decode_envelope(status, &body)
}

async fn read_ack(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport_error)?;
    decode_ack(status, &body)
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    match serde_json::from_slice::<Envelope<T>>(body) {
        Ok(envelope) if envelope.success && status.is_success() => envelope
            .data
            .ok_or_else(|| ApiError::Unknown(GENERIC_FAILURE_MESSAGE.to_string())),
        Ok(envelope) => Err(error_from_status(status, envelope.detail())),
        Err(_) => Err(error_from_status(status, None)),
    }
}

pub(crate) fn decode_ack(status: StatusCode, body: &[u8]) -> Result<(), ApiError> {
    match serde_json::from_slice::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) if envelope.success && status.is_success() => Ok(()),
        Ok(envelope) => Err(error_from_status(status, envelope.detail())),
        Err(_) => Err(error_from_status(status, None)),
    }
}

fn envelope_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(Envelope::detail)
}

fn error_from_status(status: StatusCode, detail: Option<String>) -> ApiError {
    let message = detail.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation(message)
        }
        _ => ApiError::Unknown(message),
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    tracing::debug!(error = %err, "transport failure");
    ApiError::network()
}
