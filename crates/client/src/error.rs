//! Unified error handling for API calls.
//!
//! Every client operation returns `Result<T, ApiError>`. Front ends show
//! [`ApiError::user_message`] to the user and send them to the login screen
//! when [`ApiError::requires_login`] is true.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Message shown when the backend gives no usable explanation.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Default back-off when a 429 carries no `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with an error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authenticated but not allowed (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// An authenticated endpoint was called without a session.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The session could not be refreshed and has been cleared.
    #[error("Session expired")]
    SessionExpired,

    /// Form input rejected before sending.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Checkout attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Local key-value storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A resource identifier cannot be used as a URL path segment.
    #[error("Invalid identifier: {0:?}")]
    InvalidPathSegment(String),

    /// Endpoint path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Error body returned by the backend.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build an error from a non-success response.
    ///
    /// Prefers the body's `error` field, then `message`, then the generic
    /// fallback.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok());
        let text = response.text().await.unwrap_or_default();

        Self::from_parts(status, retry_after, &text)
    }

    fn from_parts(status: StatusCode, retry_after: Option<u64>, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| GENERIC_ERROR.to_string());

        match status {
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::TOO_MANY_REQUESTS => {
                Self::RateLimited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS))
            }
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Text suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::NotFound(message) | Self::Forbidden(message) => {
                message.clone()
            }
            Self::NotAuthenticated => "Please log in to continue.".to_string(),
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            Self::RateLimited(secs) => {
                format!("Too many requests. Please try again in {secs} seconds.")
            }
            Self::Validation(errors) => errors
                .first()
                .map_or_else(|| GENERIC_ERROR.to_string(), |(_, msg)| msg.to_string()),
            Self::EmptyCart => "Your cart is empty.".to_string(),
            Self::InvalidPathSegment(_) => "That identifier is not valid.".to_string(),
            Self::Http(_) | Self::Storage(_) | Self::Parse(_) | Self::InvalidUrl(_) => {
                GENERIC_ERROR.to_string()
            }
        }
    }

    /// Whether the front end should send the user to the login screen.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::SessionExpired
                | Self::Api {
                    status: 401,
                    ..
                }
        )
    }

    /// HTTP status associated with the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Forbidden(_) => Some(403),
            Self::RateLimited(_) => Some(429),
            Self::SessionExpired | Self::NotAuthenticated => Some(401),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_is_surfaced() {
        let err = ApiError::from_parts(
            StatusCode::BAD_REQUEST,
            None,
            r#"{"error":"Product is out of stock"}"#,
        );
        assert_eq!(err.user_message(), "Product is out of stock");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_message_field_fallback() {
        let err = ApiError::from_parts(
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
            r#"{"message":"Invalid input"}"#,
        );
        assert_eq!(err.user_message(), "Invalid input");
    }

    #[test]
    fn test_generic_fallback() {
        let err = ApiError::from_parts(StatusCode::BAD_GATEWAY, None, "<html>upstream</html>");
        assert_eq!(err.user_message(), GENERIC_ERROR);

        let err = ApiError::from_parts(StatusCode::BAD_REQUEST, None, r#"{"error":"  "}"#);
        assert_eq!(err.user_message(), GENERIC_ERROR);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_parts(StatusCode::NOT_FOUND, None, r#"{"error":"Product not found"}"#),
            ApiError::NotFound(ref m) if m == "Product not found"
        ));
        assert!(matches!(
            ApiError::from_parts(StatusCode::FORBIDDEN, None, ""),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from_parts(StatusCode::TOO_MANY_REQUESTS, Some(5), ""),
            ApiError::RateLimited(5)
        ));
        assert!(matches!(
            ApiError::from_parts(StatusCode::TOO_MANY_REQUESTS, None, ""),
            ApiError::RateLimited(60)
        ));
    }

    #[test]
    fn test_requires_login() {
        assert!(ApiError::SessionExpired.requires_login());
        assert!(ApiError::NotAuthenticated.requires_login());
        assert!(
            ApiError::Api {
                status: 401,
                message: "Invalid credentials".to_string()
            }
            .requires_login()
        );
        assert!(!ApiError::Forbidden("Admins only".to_string()).requires_login());
        assert!(!ApiError::EmptyCart.requires_login());
    }

    #[test]
    fn test_rate_limited_display() {
        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
