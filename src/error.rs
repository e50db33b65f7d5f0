// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each error variant tells the story of what went wrong and where,
//! so callers can decide whether a failure ends the run or only
//! truncates one branch of the tree.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system. Each variant
/// tells you exactly what the Notion API reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded; back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            429 => Self::RateLimited,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether the credential itself was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::HttpStatus(401))
    }

    /// Whether the request was throttled and may succeed after waiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited | Self::HttpStatus(429))
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Could not render output: {0}")]
    RenderFailed(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not discover root {object_kind}s: {source}")]
    RootDiscoveryFailed {
        object_kind: &'static str,
        #[source]
        source: Box<AppError>,
    },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),

    #[error(transparent)]
    NotionClient(#[from] NotionClientError),
}

impl AppError {
    /// Whether this error (or the error it wraps) means the integration
    /// token was rejected by Notion.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            AppError::NotionService { code, .. } => code.is_unauthorized(),
            AppError::NotionClient(NotionClientError::NotionApi { status, code, .. }) => {
                *status == 401 || NotionErrorCode::from_api_response(code).is_unauthorized()
            }
            AppError::RootDiscoveryFailed { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }

    /// Whether Notion throttled the request.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            AppError::NotionService { code, .. } => code.is_rate_limited(),
            AppError::NotionClient(NotionClientError::NotionApi { status, code, .. }) => {
                *status == 429 || NotionErrorCode::from_api_response(code).is_rate_limited()
            }
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Errors reported while decoding Notion API payloads.
#[derive(Error, Debug)]
pub enum NotionClientError {
    #[error("Failed to deserialize response: {source}\nBody: {body}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Notion API error ({status}): {code} - {message}")]
    NotionApi {
        status: u32,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Type conversion error: {message}")]
    ConversionError { message: String },
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_detected_through_root_discovery() {
        let err = AppError::RootDiscoveryFailed {
            object_kind: "page",
            source: Box::new(AppError::NotionClient(NotionClientError::NotionApi {
                status: 401,
                code: "unauthorized".to_string(),
                message: "API token is invalid.".to_string(),
                request_id: None,
            })),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_http_status_fallback_codes() {
        assert!(NotionErrorCode::from_http_status(401).is_unauthorized());
        assert!(NotionErrorCode::from_http_status(429).is_rate_limited());
        assert_eq!(
            NotionErrorCode::from_http_status(502),
            NotionErrorCode::HttpStatus(502)
        );
    }

    #[test]
    fn test_restricted_resource_is_not_unauthorized() {
        let err = AppError::NotionClient(NotionClientError::NotionApi {
            status: 403,
            code: "restricted_resource".to_string(),
            message: "Insufficient permissions".to_string(),
            request_id: None,
        });
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_error_code_display_matches_api_vocabulary() {
        for code in ["rate_limited", "object_not_found", "unauthorized", "conflict_error"] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
    }
}
