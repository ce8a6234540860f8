//
//  discord-rest
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Discord authenticates every REST call with a single header:
//!
//! ```text
//! Authorization: <account type> <token>
//! ```
//!
//! where the account type is `Bot` for bot accounts. [`AuthCredential`] holds
//! both halves and knows how to attach itself to a request.
//!
//! ## Example
//!
//! ```rust
//! use discord_rest::auth::AuthCredential;
//!
//! let credential = AuthCredential::bot("my-token");
//! assert_eq!(credential.header_value(), "Bot my-token");
//! ```

use std::fmt;

use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Account type used when none is configured.
pub const DEFAULT_ACCOUNT_TYPE: &str = "Bot";

/// Token plus the account-type prefix sent in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthCredential {
    account_type: String,
    token: String,
}

impl AuthCredential {
    /// Creates a credential with an explicit account type.
    pub fn new(account_type: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            account_type: account_type.into(),
            token: token.into(),
        }
    }

    /// Creates a `Bot` credential.
    pub fn bot(token: impl Into<String>) -> Self {
        Self::new(DEFAULT_ACCOUNT_TYPE, token)
    }

    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.account_type, self.token)
    }

    /// Sets the `Authorization` header on a request.
    ///
    /// Call this after any user-supplied headers so the credential wins.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header_value())
    }
}

// Never print the token.
impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredential")
            .field("account_type", &self.account_type)
            .field("token", &"<redacted>")
            .finish()
    }
}
