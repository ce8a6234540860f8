//
//  discord-rest
//  models/channel.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Guild and DM channels.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{ApiError, Result};
use crate::api::{ClientRef, DiscordClient};
use crate::models::{null_as_default, ChannelEdit, Guild, Snapshot};

/// Kind of channel, mapped from Discord's numeric `type` code.
///
/// | Code | Variant | Name |
/// |------|---------|------|
/// | 0 | `Text` | `text` |
/// | 1 | `Dm` | `dm` |
/// | 2 | `Voice` | `voice` |
/// | 3 | `Group` | `group` |
/// | 4 | `Category` | `category` |
/// | 5 | `News` | `news` |
/// | 6 | `Store` | `store` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Text = 0,
    Dm = 1,
    Voice = 2,
    Group = 3,
    Category = 4,
    News = 5,
    Store = 6,
}

impl ChannelType {
    const BY_CODE: [ChannelType; 7] = [
        ChannelType::Text,
        ChannelType::Dm,
        ChannelType::Voice,
        ChannelType::Group,
        ChannelType::Category,
        ChannelType::News,
        ChannelType::Store,
    ];

    /// Looks up a numeric code. Unknown codes map to `None`.
    pub fn from_code(code: u64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::BY_CODE.get(i).copied())
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ChannelType::Text => "text",
            ChannelType::Dm => "dm",
            ChannelType::Voice => "voice",
            ChannelType::Group => "group",
            ChannelType::Category => "category",
            ChannelType::News => "news",
            ChannelType::Store => "store",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serde adapter between `Option<ChannelType>` and the numeric wire code.
mod type_code {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ChannelType;

    pub fn serialize<S: Serializer>(kind: &Option<ChannelType>, serializer: S) -> Result<S::Ok, S::Error> {
        match kind {
            Some(kind) => serializer.serialize_u8(kind.code()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ChannelType>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.and_then(ChannelType::from_code))
    }
}

/// A Discord channel.
///
/// # Fields
///
/// * `id` - Snowflake ID of the channel
/// * `name` - Channel name
/// * `permissions` - Raw permission overwrites
/// * `position` - Sorting position
/// * `guild_id` - Guild the channel belongs to, `None` for DMs
/// * `kind` - Channel type, `None` if the code is unknown
/// * `topic` - Topic, for text channels
/// * `nsfw` - Whether the channel is marked NSFW
/// * `parent_id` - Parent category
/// * `last_message_id` - Latest message, for text channels
/// * `last_pin_time` - Time of the latest pin, for text channels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(
        default,
        rename = "permission_overwrites",
        deserialize_with = "null_as_default"
    )]
    pub permissions: Vec<Value>,

    #[serde(default)]
    pub position: Option<i64>,

    #[serde(default)]
    pub guild_id: Option<String>,

    #[serde(default, rename = "type", with = "type_code")]
    pub kind: Option<ChannelType>,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub nsfw: bool,

    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub last_message_id: Option<String>,

    #[serde(default, rename = "last_pin_timestamp")]
    pub last_pin_time: Option<DateTime<Utc>>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    client: ClientRef,
}

impl Snapshot for Channel {
    fn client_ref(&self) -> &ClientRef {
        &self.client
    }

    fn attach(&mut self, raw: Value, client: ClientRef) {
        self.raw = raw;
        self.client = client;
    }
}

impl Channel {
    /// The raw JSON of the last snapshot.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn client(&self) -> Option<DiscordClient> {
        self.client.client()
    }

    /// Sends a message to this channel and returns the raw message.
    pub async fn send_message(&self, content: &str) -> Result<Value> {
        self.client
            .upgrade()?
            .send_message(&self.id, content)
            .await
    }

    /// Lists the pinned messages as raw JSON.
    pub async fn get_pinned_messages(&self) -> Result<Value> {
        self.client.upgrade()?.get_channel_pins(&self.id).await
    }

    /// Retrieves the guild this channel belongs to.
    ///
    /// DM channels have no guild and fail locally.
    pub async fn resolve_guild(&self) -> Result<Guild> {
        let client = self.client.upgrade()?;
        let guild_id = self.guild_id.as_deref().ok_or_else(|| {
            client.fail(
                ApiError::Validation("Channel does not belong to a guild".to_string()),
                Some(&self.id),
            )
        })?;
        client.get_guild(guild_id).await
    }

    /// Renames the channel.
    pub async fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.update(ChannelEdit::Name(name.into())).await
    }

    /// Changes the channel topic.
    pub async fn set_topic(&mut self, topic: impl Into<String>) -> Result<&mut Self> {
        self.update(ChannelEdit::Topic(topic.into())).await
    }

    /// Marks the channel NSFW or not.
    pub async fn set_nsfw(&mut self, nsfw: bool) -> Result<&mut Self> {
        self.update(ChannelEdit::Nsfw(nsfw)).await
    }

    async fn update(&mut self, edit: ChannelEdit) -> Result<&mut Self> {
        let client = self.client.upgrade()?;
        let raw = client.set_channel_property(&self.id, edit).await?;
        client.rehydrate(self, raw)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::api::testing::Fixture;

    fn sample() -> Value {
        json!({
            "id": "41771983423143937",
            "guild_id": "41771983423143937",
            "name": "general",
            "type": 0,
            "position": 6,
            "permission_overwrites": [{"id": "1", "type": 0, "allow": "0", "deny": "2048"}],
            "nsfw": false,
            "topic": "24/7 chat about how to gank Mike #2",
            "last_message_id": "155117677105512449",
            "parent_id": "399942396007890945",
            "last_pin_timestamp": "2020-02-20T13:10:00+00:00"
        })
    }

    #[test]
    fn test_hydrates_fields_with_renames() {
        let channel = Channel::from_snapshot(sample(), ClientRef::default()).unwrap();

        assert_eq!(channel.id, "41771983423143937");
        assert_eq!(channel.name.as_deref(), Some("general"));
        assert_eq!(channel.kind, Some(ChannelType::Text));
        assert_eq!(channel.position, Some(6));
        assert_eq!(channel.permissions.len(), 1);
        assert_eq!(channel.permissions[0]["deny"], "2048");
        assert!(!channel.nsfw);
        assert_eq!(channel.parent_id.as_deref(), Some("399942396007890945"));
        assert_eq!(channel.last_message_id.as_deref(), Some("155117677105512449"));
        assert_eq!(
            channel.last_pin_time,
            Some("2020-02-20T13:10:00Z".parse::<DateTime<Utc>>().unwrap())
        );
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let channel = Channel::from_snapshot(sample(), ClientRef::default()).unwrap();
        let value = serde_json::to_value(&channel).unwrap();

        assert_eq!(value["type"], 0);
        assert!(value.get("permission_overwrites").is_some());
        assert!(value.get("permissions").is_none());
        assert!(value.get("client").is_none());
    }

    #[test]
    fn test_type_codes() {
        let names: Vec<_> = (0..7)
            .map(|code| ChannelType::from_code(code).unwrap().name())
            .collect();
        assert_eq!(names, ["text", "dm", "voice", "group", "category", "news", "store"]);
        assert!(ChannelType::from_code(13).is_none());
    }

    #[test]
    fn test_unknown_type_is_none() {
        let channel =
            Channel::from_snapshot(json!({"id": "1", "type": 15}), ClientRef::default()).unwrap();
        assert!(channel.kind.is_none());
    }

    #[tokio::test]
    async fn test_set_nsfw_rehydrates_same_instance() {
        let Fixture { mut server, client, .. } = Fixture::new().await;
        let mut echo = sample();
        echo["nsfw"] = json!(true);
        let mock = server
            .mock("PATCH", "/channels/41771983423143937")
            .match_body(Matcher::Json(json!({"nsfw": true})))
            .with_status(200)
            .with_body(echo.to_string())
            .create_async()
            .await;

        let mut channel: Channel = client.hydrate(sample()).unwrap();
        let before: *const Channel = &channel;
        let after: *const Channel = channel.set_nsfw(true).await.unwrap();

        assert!(std::ptr::eq(before, after));
        assert!(channel.nsfw);
        assert_eq!(channel.raw()["nsfw"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_set_name_and_topic_chain() {
        let Fixture { mut server, client, .. } = Fixture::new().await;
        server
            .mock("PATCH", "/channels/41771983423143937")
            .match_body(Matcher::Json(json!({"name": "lounge"})))
            .with_status(200)
            .with_body(r#"{"id": "41771983423143937", "name": "lounge"}"#)
            .create_async()
            .await;
        server
            .mock("PATCH", "/channels/41771983423143937")
            .match_body(Matcher::Json(json!({"topic": "chill"})))
            .with_status(200)
            .with_body(r#"{"id": "41771983423143937", "name": "lounge", "topic": "chill"}"#)
            .create_async()
            .await;

        let mut channel: Channel = client.hydrate(sample()).unwrap();
        channel
            .set_name("lounge")
            .await
            .unwrap()
            .set_topic("chill")
            .await
            .unwrap();

        assert_eq!(channel.name.as_deref(), Some("lounge"));
        assert_eq!(channel.topic.as_deref(), Some("chill"));
        assert!(channel.kind.is_none());
    }

    #[tokio::test]
    async fn test_unhydratable_response_leaves_channel_untouched() {
        let Fixture { mut server, client, sink } = Fixture::new().await;
        server
            .mock("PATCH", "/channels/41771983423143937")
            .with_status(200)
            .with_body(r#"{"id": "41771983423143937", "position": "first"}"#)
            .create_async()
            .await;

        let mut channel: Channel = client.hydrate(sample()).unwrap();
        let err = channel.set_name("x").await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(channel.name.as_deref(), Some("general"));
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_guild_and_pins() {
        let Fixture { mut server, client, .. } = Fixture::new().await;
        server
            .mock("GET", "/guilds/41771983423143937")
            .with_status(200)
            .with_body(r#"{"id": "41771983423143937", "name": "Discord API"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/channels/41771983423143937/pins")
            .with_status(200)
            .with_body(r#"[{"id": "1", "content": "pinned"}]"#)
            .create_async()
            .await;

        let channel: Channel = client.hydrate(sample()).unwrap();
        assert_eq!(channel.resolve_guild().await.unwrap().name.as_deref(), Some("Discord API"));
        assert_eq!(channel.get_pinned_messages().await.unwrap()[0]["content"], "pinned");
    }

    #[tokio::test]
    async fn test_dm_channel_has_no_guild() {
        let Fixture { mut server, client, sink } = Fixture::new().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let channel: Channel = client.hydrate(json!({"id": "9", "type": 1})).unwrap();
        assert_eq!(channel.kind, Some(ChannelType::Dm));
        assert!(matches!(
            channel.resolve_guild().await,
            Err(ApiError::Validation(_))
        ));
        assert_eq!(sink.count(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_message() {
        let Fixture { mut server, client, .. } = Fixture::new().await;
        let mock = server
            .mock("POST", "/channels/41771983423143937/messages")
            .match_body(Matcher::Json(json!({"content": "hello world"})))
            .with_status(200)
            .with_body(r#"{"id": "2", "content": "hello world"}"#)
            .create_async()
            .await;

        let channel: Channel = client.hydrate(sample()).unwrap();
        let message = channel.send_message("hello world").await.unwrap();

        assert_eq!(message["id"], "2");
        mock.assert_async().await;
    }
}
