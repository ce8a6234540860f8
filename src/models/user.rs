//
//  discord-rest
//  models/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Discord users.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{ApiError, Result};
use crate::api::{ClientRef, DiscordClient};
use crate::models::{null_as_default, Channel, Snapshot};

/// Asset shown for users without a custom avatar.
pub const DEFAULT_AVATAR_URL: &str =
    "https://discordapp.com/assets/322c936a8c8be1b803cd94861bdfa868.png";

const AVATAR_CDN: &str = "https://cdn.discordapp.com/avatars";

/// A Discord user.
///
/// # Fields
///
/// * `id` - Snowflake ID of the user
/// * `username` - Username, without the discriminator
/// * `discriminator` - Four digit number shown after the username
/// * `avatar` - Avatar hash, `None` for the default avatar
/// * `bot` - Whether the account is a bot
///
/// # Example
///
/// ```rust
/// use discord_rest::api::ClientRef;
/// use discord_rest::models::{Snapshot, User};
/// use serde_json::json;
///
/// let user = User::from_snapshot(
///     json!({"id": "1", "username": "JPBBerry", "discriminator": "0001"}),
///     ClientRef::default(),
/// )?;
/// assert_eq!(user.tag(), "JPBBerry#0001");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub discriminator: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub bot: bool,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    client: ClientRef,
}

impl Snapshot for User {
    fn client_ref(&self) -> &ClientRef {
        &self.client
    }

    fn attach(&mut self, raw: Value, client: ClientRef) {
        self.raw = raw;
        self.client = client;
    }
}

impl User {
    /// Full tag, `username#discriminator`.
    ///
    /// A missing or empty part is rendered as the literal `null`, so a user
    /// without a discriminator yields `name#null`.
    pub fn tag(&self) -> String {
        format!(
            "{}#{}",
            or_null(self.username.as_deref()),
            or_null(self.discriminator.as_deref())
        )
    }

    /// Link to the full avatar image, or the default avatar asset.
    pub fn avatar_url(&self) -> String {
        match self.avatar.as_deref().filter(|hash| !hash.is_empty()) {
            Some(hash) => format!("{}/{}/{}", AVATAR_CDN, or_null(Some(&self.id)), hash),
            None => DEFAULT_AVATAR_URL.to_string(),
        }
    }

    /// The raw JSON this user was hydrated from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The client that fetched this user, if still alive.
    pub fn client(&self) -> Option<DiscordClient> {
        self.client.client()
    }

    /// Sends a direct message to the user.
    ///
    /// Opens (or reuses) the DM channel, then sends into it. Returns the raw
    /// message.
    pub async fn send_message(&self, content: &str) -> Result<Value> {
        let client = self.client.upgrade()?;
        if content.is_empty() {
            return Err(client.fail(
                ApiError::Validation("Cannot send an empty message".to_string()),
                Some(&self.id),
            ));
        }

        let raw = client.open_dm_channel(&self.id).await?;
        let channel: Channel = client.hydrate(raw)?;
        client.send_message(&channel.id, content).await
    }
}

fn or_null(part: Option<&str>) -> &str {
    part.filter(|p| !p.is_empty()).unwrap_or("null")
}
