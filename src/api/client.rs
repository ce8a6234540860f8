//
//  discord-rest
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Discord API
//!
//! This module provides the core client for interacting with the Discord REST
//! API. It owns the credential and configuration, performs the single
//! authenticated request primitive, and exposes one async method per REST
//! operation.
//!
//! ## Features
//!
//! - `Authorization: <account type> <token>` injection
//! - Extra headers configured once and merged into every request
//! - Raw JSON results or hydrated entities ([`User`], [`Guild`], ...)
//! - Every failure reported through the [`ErrorSink`] and returned as [`ApiError`]
//!
//! One call means one request: there is no retry, caching or pagination.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::api::common::{ApiError, Result};
use crate::auth::AuthCredential;
use crate::config::ClientOptions;
use crate::models::{Channel, ChannelEdit, Guild, GuildEdit, GuildMember, Snapshot, User};
use crate::sink::{ErrorSink, SharedSink, TracingSink};

struct ClientInner {
    /// The underlying HTTP client
    http: Client,
    /// Base URL, without a trailing slash
    endpoint: String,
    /// Prefix of the Authorization header
    account_type: String,
    /// Headers merged into every request
    extra_headers: HeaderMap,
    /// `None` when no token was given or after logout
    credential: RwLock<Option<AuthCredential>>,
    /// Where every failure is reported
    sink: SharedSink,
}

/// The main client for the Discord REST API.
///
/// `DiscordClient` is a cheap handle: clones share the same credential,
/// configuration and sink. Entities returned by the client keep a
/// non-owning [`ClientRef`] back to it.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use discord_rest::api::DiscordClient;
/// use discord_rest::config::ClientOptions;
///
/// let client = DiscordClient::new("my-bot-token", ClientOptions::default())?;
/// assert!(client.is_authenticated());
/// # Ok::<(), discord_rest::api::common::ApiError>(())
/// ```
///
/// # Fetching and Mutating
///
/// ```rust,no_run
/// use discord_rest::api::DiscordClient;
/// use discord_rest::config::ClientOptions;
///
/// # async fn example() -> discord_rest::api::common::Result<()> {
/// let client = DiscordClient::new("my-bot-token", ClientOptions::default())?;
/// let mut guild = client.get_guild("81384788765712384").await?;
/// guild.set_name("Renamed").await?;
/// println!("{:?}", guild.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DiscordClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordClient")
            .field("endpoint", &self.inner.endpoint)
            .field("account_type", &self.inner.account_type)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Non-owning reference from an entity back to its client.
///
/// Never serialized. Once every [`DiscordClient`] handle is dropped, entity
/// operations fail with [`ApiError::ClientDropped`].
#[derive(Clone, Default)]
pub struct ClientRef(Weak<ClientInner>);

impl ClientRef {
    /// Returns the client, if it is still alive.
    pub fn client(&self) -> Option<DiscordClient> {
        self.0.upgrade().map(|inner| DiscordClient { inner })
    }

    pub(crate) fn upgrade(&self) -> Result<DiscordClient> {
        self.client().ok_or(ApiError::ClientDropped)
    }
}

impl fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientRef(alive: {})", self.0.strong_count() > 0)
    }
}

impl DiscordClient {
    /// Creates a client that reports errors through `tracing`.
    ///
    /// An empty token does not fail construction: it is reported through the
    /// sink and the client is built in a disabled state where every request
    /// fails with [`ApiError::AuthRequired`].
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL, an extra header is
    /// not a valid HTTP header, or the HTTP client cannot be built.
    ///
    /// [`TracingSink`] emits through `tracing`, so nothing is printed until a
    /// subscriber is installed, e.g. with [`init_logging`](crate::init_logging).
    pub fn new(token: impl Into<String>, options: ClientOptions) -> Result<Self> {
        Self::with_handler(token, TracingSink, options)
    }

    /// Creates a client with a custom error sink.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use discord_rest::api::DiscordClient;
    /// use discord_rest::config::ClientOptions;
    ///
    /// let client = DiscordClient::with_handler(
    ///     "my-bot-token",
    ///     |message: &str, _detail: Option<&str>| eprintln!("{message}"),
    ///     ClientOptions::default().with_account_type("Bearer"),
    /// )?;
    /// # Ok::<(), discord_rest::api::common::ApiError>(())
    /// ```
    pub fn with_handler(
        token: impl Into<String>,
        sink: impl ErrorSink + 'static,
        options: ClientOptions,
    ) -> Result<Self> {
        let sink: SharedSink = Arc::new(sink);
        let fail = |error: ApiError, detail: Option<&str>| {
            sink.report(&error.to_string(), detail);
            error
        };

        let endpoint = options.endpoint().to_string();
        Url::parse(&endpoint).map_err(|e| {
            fail(
                ApiError::Validation(format!("Invalid endpoint '{}': {}", endpoint, e)),
                None,
            )
        })?;

        let extra_headers = build_headers(&options.extra_headers).map_err(|e| fail(e, None))?;

        let mut builder = Client::builder().user_agent(format!("discord-rest/{}", crate::VERSION));
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| fail(ApiError::Network(e), None))?;

        let account_type = options.account_type().to_string();
        let token = token.into();
        let credential = if token.is_empty() {
            sink.report("You need a token!", None);
            None
        } else {
            Some(AuthCredential::new(account_type.clone(), token))
        };

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                endpoint,
                account_type,
                extra_headers,
                credential: RwLock::new(credential),
                sink,
            }),
        })
    }

    /// Base URL that request paths are appended to.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn account_type(&self) -> &str {
        &self.inner.account_type
    }

    /// Whether a token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns a non-owning reference to this client.
    pub fn downgrade(&self) -> ClientRef {
        ClientRef(Arc::downgrade(&self.inner))
    }

    /// Reports `error` through the sink and hands it back.
    pub(crate) fn fail(&self, error: ApiError, detail: Option<&str>) -> ApiError {
        self.inner.sink.report(&error.to_string(), detail);
        error
    }

    /// Hydrates an entity owned by this client from a raw snapshot.
    pub(crate) fn hydrate<T: Snapshot>(&self, raw: Value) -> Result<T> {
        T::from_snapshot(raw, self.downgrade()).map_err(|e| self.fail(e.into(), None))
    }

    /// Re-hydrates `entity` in place. On failure the entity is left untouched.
    pub(crate) fn rehydrate<T: Snapshot>(&self, entity: &mut T, raw: Value) -> Result<()> {
        entity
            .apply_snapshot(raw)
            .map_err(|e| self.fail(e.into(), None))
    }

    // Transport

    /// Makes one authenticated request and parses the response as JSON.
    ///
    /// The request carries `Content-Type: application/json`, every configured
    /// extra header, and `Authorization: <account type> <token>`. `body` is
    /// serialized as JSON when present; otherwise no body is sent.
    ///
    /// Only `200 OK` counts as success.
    ///
    /// # Errors
    ///
    /// Every error is reported through the sink exactly once, then returned:
    /// - [`ApiError::AuthRequired`] when no token is held (no request is sent)
    /// - [`ApiError::Network`] on connection or URL failures
    /// - a status-specific variant for any status other than 200
    /// - [`ApiError::InvalidResponse`] when the body is not JSON
    pub async fn auth_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let credential = self
            .inner
            .credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| self.fail(ApiError::AuthRequired, Some(path)))?;

        let url = format!("{}{}", self.inner.endpoint, path);
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self
            .inner
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .headers(self.inner.extra_headers.clone());
        request = credential.apply_to_request(request);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.fail(ApiError::Network(e), Some(&url)))?;
        let status = response.status();

        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %url, "Request failed");
            return Err(self.fail(ApiError::from_status(status, &text), Some(&text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.fail(ApiError::Network(e), Some(&url)))?;
        serde_json::from_str(&text).map_err(|e| self.fail(ApiError::InvalidResponse(e), Some(&text)))
    }

    /// Makes an authenticated GET request.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.auth_request::<Value>(Method::GET, path, None).await
    }

    /// Makes an authenticated POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.auth_request(Method::POST, path, Some(body)).await
    }

    /// Makes an authenticated PATCH request with a JSON body.
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.auth_request(Method::PATCH, path, Some(body)).await
    }

    // Retrieve

    /// Gets the logged in user as raw JSON.
    pub async fn get_me(&self) -> Result<Value> {
        self.get("/users/@me").await
    }

    /// Retrieves another user.
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let raw = self.get(&format!("/users/{}", user_id)).await?;
        self.hydrate(raw)
    }

    /// Retrieves all guild info.
    pub async fn get_guild(&self, guild_id: &str) -> Result<Guild> {
        let raw = self.get(&format!("/guilds/{}", guild_id)).await?;
        self.hydrate(raw)
    }

    /// Retrieves a guild member from a guild and user.
    ///
    /// The member payload does not say which guild it belongs to, so
    /// `guild_id` is injected before hydration.
    pub async fn get_guild_member(&self, guild_id: &str, user_id: &str) -> Result<GuildMember> {
        let mut raw = self
            .get(&format!("/guilds/{}/{}", guild_id, user_id))
            .await?;
        if let Value::Object(map) = &mut raw {
            map.insert("guild_id".to_string(), Value::String(guild_id.to_string()));
        }
        self.hydrate(raw)
    }

    /// Retrieves the channels of a guild, keyed by channel ID.
    pub async fn get_guild_channels(&self, guild_id: &str) -> Result<HashMap<String, Channel>> {
        let raw = self
            .get(&format!("/guilds/{}/channels", guild_id))
            .await?;
        let items: Vec<Value> =
            serde_json::from_value(raw).map_err(|e| self.fail(e.into(), None))?;

        items
            .into_iter()
            .map(|item| -> Result<(String, Channel)> {
                let channel: Channel = self.hydrate(item)?;
                Ok((channel.id.clone(), channel))
            })
            .collect()
    }

    /// Retrieves full channel info.
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        let raw = self.get(&format!("/channels/{}", channel_id)).await?;
        self.hydrate(raw)
    }

    /// Lists the roles of a guild as raw JSON.
    pub async fn get_guild_roles(&self, guild_id: &str) -> Result<Value> {
        self.get(&format!("/guilds/{}/roles", guild_id)).await
    }

    /// Finds one role in the guild's role list.
    ///
    /// Fetches the whole list and scans it for a matching `id`. A role that
    /// is not in the list yields `Ok(None)`, not an error.
    pub async fn get_guild_role(&self, guild_id: &str, role_id: &str) -> Result<Option<Value>> {
        let roles = self.get_guild_roles(guild_id).await?;

        Ok(roles.as_array().and_then(|roles| {
            roles
                .iter()
                .find(|role| role.get("id").and_then(Value::as_str) == Some(role_id))
                .cloned()
        }))
    }

    /// Lists the pinned messages of a channel as raw JSON.
    pub async fn get_channel_pins(&self, channel_id: &str) -> Result<Value> {
        self.get(&format!("/channels/{}/pins", channel_id)).await
    }

    // Open

    /// Opens a DM channel with a user and returns the raw channel.
    pub async fn open_dm_channel(&self, user_id: &str) -> Result<Value> {
        self.post("/users/@me/channels", &json!({ "recipient_id": user_id }))
            .await
    }

    // Send

    /// Sends a message to a channel and returns the raw message.
    ///
    /// Empty content fails locally without a request.
    pub async fn send_message(&self, channel_id: &str, content: &str) -> Result<Value> {
        if content.is_empty() {
            return Err(self.fail(
                ApiError::Validation("Cannot send an empty message".to_string()),
                Some(channel_id),
            ));
        }
        self.post(
            &format!("/channels/{}/messages", channel_id),
            &json!({ "content": content }),
        )
        .await
    }

    // Set

    /// Changes one property of a channel.
    ///
    /// Sends a single-key PATCH body and returns the server's full updated
    /// channel.
    pub async fn set_channel_property(&self, channel_id: &str, edit: ChannelEdit) -> Result<Value> {
        self.patch(&format!("/channels/{}", channel_id), &edit).await
    }

    /// Changes one property of a guild.
    ///
    /// Sends a single-key PATCH body and returns the server's full updated
    /// guild.
    pub async fn set_guild_property(&self, guild_id: &str, edit: GuildEdit) -> Result<Value> {
        self.patch(&format!("/guilds/{}", guild_id), &edit).await
    }

    /// Logs out of the client user.
    ///
    /// Drops the token locally; no request is made and requests already in
    /// flight are unaffected. Later requests fail with
    /// [`ApiError::AuthRequired`]. Always returns `true`.
    pub fn logout(&self) -> bool {
        *self
            .inner
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("Credential cleared");
        true
    }
}

/// Validates the configured extra headers.
///
/// `Authorization` is dropped: the credential is the only source of it.
fn build_headers(extra: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(extra.len());
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::Validation(format!("Invalid header name '{}'", name)))?;
        if name == AUTHORIZATION {
            tracing::warn!("Ignoring extra Authorization header");
            continue;
        }
        let value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::Validation(format!("Invalid value for header '{}'", name)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
