//
//  discord-rest
//  models/edit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Mutable properties of guilds and channels.
//!
//! Each edit serializes to the single-key PATCH body Discord expects:
//!
//! ```rust
//! use discord_rest::models::{ChannelEdit, GuildEdit, Region};
//!
//! let body = serde_json::to_value(GuildEdit::Region(Region::UsEast)).unwrap();
//! assert_eq!(body, serde_json::json!({"region": "us-east"}));
//!
//! let body = serde_json::to_value(ChannelEdit::Nsfw(true)).unwrap();
//! assert_eq!(body, serde_json::json!({"nsfw": true}));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::api::common::ApiError;

/// A single guild property change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuildEdit {
    Name(String),
    Region(Region),
    ExplicitContentFilter(ContentFilter),
}

/// A single channel property change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelEdit {
    Name(String),
    Topic(String),
    Nsfw(bool),
}

/// Voice region a guild can be hosted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Japan,
    Singapore,
    EuCentral,
    UsCentral,
    London,
    EuWest,
    Amsterdam,
    Brazil,
    UsWest,
    #[serde(rename = "hongkong")]
    HongKong,
    UsSouth,
    #[serde(rename = "southafrica")]
    SouthAfrica,
    UsEast,
    Sydney,
    Frankfurt,
    Russia,
}

impl Region {
    /// Every known region.
    pub const ALL: [Region; 16] = [
        Region::Japan,
        Region::Singapore,
        Region::EuCentral,
        Region::UsCentral,
        Region::London,
        Region::EuWest,
        Region::Amsterdam,
        Region::Brazil,
        Region::UsWest,
        Region::HongKong,
        Region::UsSouth,
        Region::SouthAfrica,
        Region::UsEast,
        Region::Sydney,
        Region::Frankfurt,
        Region::Russia,
    ];

    /// Wire name of the region.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Japan => "japan",
            Region::Singapore => "singapore",
            Region::EuCentral => "eu-central",
            Region::UsCentral => "us-central",
            Region::London => "london",
            Region::EuWest => "eu-west",
            Region::Amsterdam => "amsterdam",
            Region::Brazil => "brazil",
            Region::UsWest => "us-west",
            Region::HongKong => "hongkong",
            Region::UsSouth => "us-south",
            Region::SouthAfrica => "southafrica",
            Region::UsEast => "us-east",
            Region::Sydney => "sydney",
            Region::Frankfurt => "frankfurt",
            Region::Russia => "russia",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| ApiError::Validation(format!("Unknown region '{}'", s)))
    }
}

/// Explicit content filter level of a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFilter {
    /// Scan nothing
    Disabled = 0,
    /// Scan messages from members without roles
    MembersWithoutRoles = 1,
    /// Scan every message
    AllMembers = 2,
}

impl TryFrom<u8> for ContentFilter {
    type Error = ApiError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(ContentFilter::Disabled),
            1 => Ok(ContentFilter::MembersWithoutRoles),
            2 => Ok(ContentFilter::AllMembers),
            other => Err(ApiError::Validation(format!(
                "Content filter level must be 0, 1 or 2, got {}",
                other
            ))),
        }
    }
}

impl Serialize for ContentFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}
