//
//  discord-rest
//  models/member.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Guild members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{ApiError, Result};
use crate::api::{ClientRef, DiscordClient};
use crate::models::{null_as_default, Guild, Snapshot, User};

/// Voice state a member has in the guild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerProp {
    /// Server muted
    #[serde(default, deserialize_with = "null_as_default")]
    pub mute: bool,
    /// Server deafened
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaf: bool,
}

/// A user's membership in a guild.
///
/// The member endpoint does not return the guild ID; the client injects it
/// as `guild_id` before hydration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuildMember {
    #[serde(default, rename = "nick")]
    pub nickname: Option<String>,

    /// Role IDs
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,

    #[serde(default)]
    pub guild_id: Option<String>,

    #[serde(flatten)]
    pub server_prop: ServerProp,

    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    client: ClientRef,
}

impl Snapshot for GuildMember {
    fn client_ref(&self) -> &ClientRef {
        &self.client
    }

    fn attach(&mut self, raw: Value, client: ClientRef) {
        let user_raw = raw.get("user").cloned().unwrap_or_default();
        self.user.attach(user_raw, client.clone());
        self.raw = raw;
        self.client = client;
    }
}

impl GuildMember {
    /// The raw JSON of the snapshot, including the injected `guild_id`.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn client(&self) -> Option<DiscordClient> {
        self.client.client()
    }

    /// Retrieves the guild this member belongs to.
    pub async fn resolve_guild(&self) -> Result<Guild> {
        let client = self.client.upgrade()?;
        let guild_id = self.guild_id.as_deref().ok_or_else(|| {
            client.fail(
                ApiError::Validation("Member snapshot has no guild".to_string()),
                Some(&self.user.id),
            )
        })?;
        client.get_guild(guild_id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::testing::Fixture;

    fn sample() -> Value {
        json!({
            "user": {"id": "80351110224678912", "username": "Nelly", "discriminator": "1337"},
            "nick": "NOT API SUPPORT",
            "roles": ["41771983423143936"],
            "joined_at": "2015-04-26T06:26:56.936000+00:00",
            "deaf": false,
            "mute": true,
            "guild_id": "41771983423143937"
        })
    }

    #[test]
    fn test_hydrates_fields() {
        let member = GuildMember::from_snapshot(sample(), ClientRef::default()).unwrap();

        assert_eq!(member.nickname.as_deref(), Some("NOT API SUPPORT"));
        assert_eq!(member.roles, vec!["41771983423143936".to_string()]);
        assert_eq!(member.guild_id.as_deref(), Some("41771983423143937"));
        assert_eq!(member.server_prop, ServerProp { mute: true, deaf: false });
        assert_eq!(
            member.joined_at,
            Some("2015-04-26T06:26:56.936Z".parse::<DateTime<Utc>>().unwrap())
        );
        assert_eq!(member.user.tag(), "Nelly#1337");
        assert_eq!(member.user.raw()["username"], "Nelly");
    }

    #[test]
    fn test_missing_user_is_empty() {
        let member = GuildMember::from_snapshot(json!({"roles": []}), ClientRef::default()).unwrap();
        assert_eq!(member.user.tag(), "null#null");
        assert!(member.joined_at.is_none());
        assert_eq!(member.server_prop, ServerProp::default());
    }

    #[tokio::test]
    async fn test_embedded_user_shares_client() {
        let Fixture { client, .. } = Fixture::new().await;
        let member: GuildMember = client.hydrate(sample()).unwrap();
        assert!(member.user.client().is_some());
    }

    #[tokio::test]
    async fn test_resolve_guild() {
        let Fixture { mut server, client, .. } = Fixture::new().await;
        let mock = server
            .mock("GET", "/guilds/41771983423143937")
            .with_status(200)
            .with_body(r#"{"id": "41771983423143937", "name": "Discord API"}"#)
            .create_async()
            .await;

        let member: GuildMember = client.hydrate(sample()).unwrap();
        let guild = member.resolve_guild().await.unwrap();

        assert_eq!(guild.name.as_deref(), Some("Discord API"));
        mock.assert_async().await;
    }
}
