//
//  discord-rest
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Construction-time options for a [`DiscordClient`](crate::api::DiscordClient).
//! Every field is optional; the defaults target the official API with a `Bot`
//! account type, no extra headers and no client-side timeout.
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! endpoint = "https://discordapp.com/api"
//! account_type = "Bot"
//! timeout_secs = 30
//!
//! [extra_headers]
//! X-Audit-Log-Reason = "maintenance"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use discord_rest::config::ClientOptions;
//!
//! let options = ClientOptions::default()
//!     .with_endpoint("http://localhost:8080/api")
//!     .with_header("X-Trace", "1");
//! assert_eq!(options.endpoint(), "http://localhost:8080/api");
//! assert_eq!(options.account_type(), "Bot");
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::DEFAULT_ACCOUNT_TYPE;

/// Base URL of the official API.
pub const DEFAULT_ENDPOINT: &str = "https://discordapp.com/api";

/// Options accepted when constructing a client.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `endpoint` | [`DEFAULT_ENDPOINT`] |
/// | `extra_headers` | empty |
/// | `account_type` | `"Bot"` |
/// | `timeout_secs` | `None` (requests never time out; `0` means the same) |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Base URL that request paths are appended to.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Prefix of the `Authorization` header value.
    #[serde(default)]
    pub account_type: Option<String>,

    /// Client-side timeout per request, in seconds. `0` disables it.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Headers added to every request.
    ///
    /// The `Authorization` header is always set afterwards and cannot be
    /// overridden from here.
    #[serde(default)]
    pub extra_headers: HashMap<String, String>,
}

impl ClientOptions {
    /// Parses options from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse client options")
    }

    /// Loads options from a TOML file.
    ///
    /// Unlike a missing token, a missing options file is an error: the caller
    /// asked for this specific file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Serializes the options back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize client options")
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }

    /// Sets the per-request timeout, rounded up to whole seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = Some(secs);
        self
    }

    /// Effective base URL, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/')
    }

    /// Effective account type.
    pub fn account_type(&self) -> &str {
        self.account_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ACCOUNT_TYPE)
    }

    /// Effective timeout. Zero means none.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(options.account_type(), "Bot");
        assert!(options.extra_headers.is_empty());
        assert!(options.timeout().is_none());
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let options = ClientOptions::default().with_endpoint("http://127.0.0.1:9000/api/");
        assert_eq!(options.endpoint(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let options = ClientOptions::default()
            .with_endpoint("")
            .with_account_type("");
        assert_eq!(options.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(options.account_type(), "Bot");
    }

    #[test]
    fn test_sub_second_timeout_rounds_up() {
        let options = ClientOptions::default().with_timeout(Duration::from_millis(500));
        assert_eq!(options.timeout_secs, Some(1));
        assert_eq!(options.timeout(), Some(Duration::from_secs(1)));

        let options = ClientOptions::default().with_timeout(Duration::from_millis(2500));
        assert_eq!(options.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let options = ClientOptions::default().with_timeout(Duration::ZERO);
        assert!(options.timeout().is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let options = ClientOptions::from_toml_str(
            r#"
            endpoint = "https://canary.discord.com/api"
            account_type = "Bearer"
            timeout_secs = 15

            [extra_headers]
            X-Audit-Log-Reason = "cleanup"
            "#,
        )
        .unwrap();

        assert_eq!(options.endpoint(), "https://canary.discord.com/api");
        assert_eq!(options.account_type(), "Bearer");
        assert_eq!(options.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(
            options.extra_headers.get("X-Audit-Log-Reason").map(String::as_str),
            Some("cleanup")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "account_type = \"Bot\"").unwrap();

        let options = ClientOptions::load(file.path()).unwrap();
        assert_eq!(options.account_type(), "Bot");
        assert!(options.endpoint.is_none());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(ClientOptions::load(Path::new("/nonexistent/discord.toml")).is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_headers() {
        let options = ClientOptions::default().with_header("X-Trace", "1");
        let text = options.to_toml_string().unwrap();
        assert_eq!(ClientOptions::from_toml_str(&text).unwrap(), options);
    }
}
