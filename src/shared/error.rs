use thiserror::Error;

/// Fallback shown when the backend response carries no usable error string.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Fallback shown when the request never produced a response at all.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Could not reach the server. Please check your connection and try again.";

/// Every gateway operation resolves to `Result<T, ApiError>`. The message is
/// always suitable for direct display in an inline alert; the variant tells
/// the caller how to react (redirect, highlight a field, show informational
/// text).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Rejected before or by the backend because the input is invalid.
    #[error("{0}")]
    Validation(String),
    /// The session token is missing, expired, or lacks access.
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    /// The backend refused because an equivalent resource already exists.
    #[error("{0}")]
    Conflict(String),
    /// The request never produced a response (connect, timeout, body read).
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    NotFound,
    Conflict,
    Network,
    Unknown,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// The human-readable message, verbatim as received or produced.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Network(msg)
            | ApiError::Unknown(msg) => msg,
        }
    }

    pub fn network() -> Self {
        ApiError::Network(NETWORK_FAILURE_MESSAGE.to_string())
    }

    pub fn unknown() -> Self {
        ApiError::Unknown(GENERIC_FAILURE_MESSAGE.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            ApiError::Validation("bad".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ApiError::Conflict("dup".into()).kind(), ErrorKind::Conflict);
        assert_eq!(ApiError::network().kind(), ErrorKind::Network);
    }

    #[test]
    fn message_is_verbatim() {
        let err = ApiError::Unknown("Admissions are currently closed".into());
        assert_eq!(err.message(), "Admissions are currently closed");
        assert_eq!(err.to_string(), "Admissions are currently closed");
    }
}
