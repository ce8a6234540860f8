//
//  discord-rest
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! This module provides the error type shared by the transport, the client
//! operations and the entity models, together with the helper that turns a
//! Discord error response into a classified [`ApiError`].
//!
//! # Example
//!
//! ```rust
//! use discord_rest::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthRequired) => println!("No token configured"),
//!         Err(ApiError::NotFound(message)) => println!("Not found: {}", message),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used by every client operation.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for all Discord API operations.
///
/// Every error a caller can observe has already been reported once through
/// the client's [`ErrorSink`](crate::sink::ErrorSink) before it is returned.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `AuthRequired` | No token configured, or cleared by logout | N/A |
/// | `AuthFailed` | Token rejected by the server | 401 |
/// | `Forbidden` | Missing permissions | 403 |
/// | `NotFound` | Unknown resource or malformed ID | 404 |
/// | `RateLimited` | Rate limit hit (never retried) | 429 |
/// | `BadRequest` | Invalid request body | 400 |
/// | `ServerError` | Discord-side failure | 5xx |
/// | `UnexpectedStatus` | Any other status that is not 200 | other |
/// | `Network` | Connectivity or URL problems | N/A |
/// | `InvalidResponse` | Body is not JSON or does not hydrate | 200 |
/// | `Validation` | Invalid argument, no request was made | N/A |
/// | `ClientDropped` | Entity outlived the client that created it | N/A |
#[derive(Error, Debug)]
pub enum ApiError {
    /// No credential is available for the request.
    ///
    /// Either the client was constructed without a token, or
    /// [`DiscordClient::logout`](crate::api::DiscordClient::logout) cleared it.
    #[error("Authentication required")]
    AuthRequired,

    /// The server rejected the credential (HTTP 401).
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The credential lacks permission for the resource (HTTP 403).
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The resource does not exist (HTTP 404).
    ///
    /// IDs are never validated locally, so a malformed ID ends up here.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The server answered with HTTP 429.
    ///
    /// Classified for the caller only; the client does not wait or retry.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The request was malformed (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error on Discord's side (HTTP 5xx).
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// Status returned by the server
        status: StatusCode,
        /// Message extracted from the response body
        message: String,
    },

    /// Any other status that is not `200 OK`.
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// Status returned by the server
        status: StatusCode,
        /// Message extracted from the response body
        message: String,
    },

    /// A transport-level error: no connectivity, malformed URL, timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be parsed or hydrated.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// An argument failed local validation. No request was sent.
    #[error("Invalid parameter: {0}")]
    Validation(String),

    /// The entity's client has been dropped.
    #[error("Client is no longer available")]
    ClientDropped,
}

impl ApiError {
    /// Classifies a non-200 response.
    ///
    /// Discord error bodies look like `{"message": "Unknown Guild", "code": 10004}`.
    /// The `message` is used when present, otherwise the raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| body.to_string());

        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::UNAUTHORIZED => Self::AuthFailed(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            s if s.is_server_error() => Self::ServerError { status: s, message },
            s => Self::UnexpectedStatus { status: s, message },
        }
    }

    /// Returns the HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            Self::AuthFailed(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::ServerError { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    /// True for errors raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::AuthRequired | Self::Validation(_) | Self::ClientDropped
        )
    }
}

fn extract_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    let message = json.get("message").and_then(|m| m.as_str())?;
    match json.get("code").and_then(|c| c.as_u64()) {
        Some(code) if code != 0 => Some(format!("{} (code {})", message, code)),
        _ => Some(message.to_string()),
    }
}
