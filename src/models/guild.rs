//
//  discord-rest
//  models/guild.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Discord guilds (servers).
//!
//! A [`Guild`] is a snapshot. Its setters send one PATCH and, once the server
//! confirms, replace every field with the server's copy of the guild:
//!
//! ```rust,no_run
//! use discord_rest::api::DiscordClient;
//! use discord_rest::config::ClientOptions;
//!
//! # async fn example() -> discord_rest::api::common::Result<()> {
//! let client = DiscordClient::new("token", ClientOptions::default())?;
//! let mut guild = client.get_guild("81384788765712384").await?;
//!
//! guild.set_name("Discord API").await?.set_region("us-east").await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{ApiError, Result};
use crate::api::{ClientRef, DiscordClient};
use crate::models::{
    null_as_default, Channel, ContentFilter, GuildEdit, GuildMember, Region, Snapshot,
};

const ICON_CDN: &str = "https://cdn.discordapp.com/icons";

/// A Discord guild.
///
/// # Fields
///
/// * `id` - Snowflake ID of the guild
/// * `name` - Guild name
/// * `owner_id` - User ID of the owner
/// * `region` - Voice region, as sent by the server
/// * `roles` - Raw role objects
/// * `icon` - Icon hash
/// * `explicit_content_filter` - Content filter level, 0 to 2
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Guild {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Value>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub explicit_content_filter: Option<u8>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    client: ClientRef,
}

impl Snapshot for Guild {
    fn client_ref(&self) -> &ClientRef {
        &self.client
    }

    fn attach(&mut self, raw: Value, client: ClientRef) {
        self.raw = raw;
        self.client = client;
    }
}

impl Guild {
    /// Link to the guild icon, if it has one.
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("{}/{}/{}", ICON_CDN, self.id, hash))
    }

    /// The region as a known [`Region`], if it is one.
    pub fn region_kind(&self) -> Option<Region> {
        self.region.as_deref().and_then(|r| r.parse().ok())
    }

    pub fn content_filter(&self) -> Option<ContentFilter> {
        self.explicit_content_filter
            .and_then(|level| ContentFilter::try_from(level).ok())
    }

    /// The raw JSON of the last snapshot.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The client that fetched this guild, if still alive.
    pub fn client(&self) -> Option<DiscordClient> {
        self.client.client()
    }

    /// Retrieves all of the channels in the guild.
    pub async fn get_channels(&self) -> Result<HashMap<String, Channel>> {
        self.client.upgrade()?.get_guild_channels(&self.id).await
    }

    /// Retrieves all of the roles in the guild as raw JSON.
    pub async fn get_roles(&self) -> Result<Value> {
        self.client.upgrade()?.get_guild_roles(&self.id).await
    }

    /// Retrieves a member of this guild.
    pub async fn get_member(&self, user_id: &str) -> Result<GuildMember> {
        self.client
            .upgrade()?
            .get_guild_member(&self.id, user_id)
            .await
    }

    /// Retrieves the owner as a member of this guild.
    pub async fn resolve_owner(&self) -> Result<GuildMember> {
        let client = self.client.upgrade()?;
        let owner_id = self.owner_id.as_deref().ok_or_else(|| {
            client.fail(
                ApiError::Validation("Guild snapshot has no owner".to_string()),
                Some(&self.id),
            )
        })?;
        client.get_guild_member(&self.id, owner_id).await
    }

    /// Renames the guild.
    pub async fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.update(GuildEdit::Name(name.into())).await
    }

    /// Moves the guild to another voice region.
    ///
    /// `region` must be one of the known [`Region`] names; anything else
    /// fails locally without a request.
    pub async fn set_region(&mut self, region: &str) -> Result<&mut Self> {
        let client = self.client.upgrade()?;
        let region: Region = region.parse().map_err(|e| client.fail(e, Some(&self.id)))?;
        self.update(GuildEdit::Region(region)).await
    }

    /// Sets the explicit content filter level.
    ///
    /// `level` must be 0, 1 or 2; anything else fails locally without a
    /// request.
    pub async fn set_content_filter(&mut self, level: u8) -> Result<&mut Self> {
        let client = self.client.upgrade()?;
        let filter =
            ContentFilter::try_from(level).map_err(|e| client.fail(e, Some(&self.id)))?;
        self.update(GuildEdit::ExplicitContentFilter(filter)).await
    }

    async fn update(&mut self, edit: GuildEdit) -> Result<&mut Self> {
        let client = self.client.upgrade()?;
        let raw = client.set_guild_property(&self.id, edit).await?;
        client.rehydrate(self, raw)?;
        Ok(self)
    }
}
