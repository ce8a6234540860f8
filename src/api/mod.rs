//
//  discord-rest
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Discord REST API
//!
//! This module contains the client that talks to the Discord REST API and the
//! error type every operation returns.
//!
//! ## Paths
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | `get_me` | GET | `/users/@me` |
//! | `get_user` | GET | `/users/{id}` |
//! | `get_guild` | GET | `/guilds/{id}` |
//! | `get_guild_member` | GET | `/guilds/{id}/{user_id}` |
//! | `get_guild_channels` | GET | `/guilds/{id}/channels` |
//! | `get_guild_roles`, `get_guild_role` | GET | `/guilds/{id}/roles` |
//! | `get_channel` | GET | `/channels/{id}` |
//! | `get_channel_pins` | GET | `/channels/{id}/pins` |
//! | `open_dm_channel` | POST | `/users/@me/channels` |
//! | `send_message` | POST | `/channels/{id}/messages` |
//! | `set_guild_property` | PATCH | `/guilds/{id}` |
//! | `set_channel_property` | PATCH | `/channels/{id}` |

/// Core HTTP client for the Discord API.
///
/// Provides the [`DiscordClient`] struct which handles:
/// - Authentication header injection
/// - Request/response serialization
/// - Error reporting and status code mapping
pub mod client;

/// Error type shared by every operation.
///
/// Includes:
/// - [`ApiError`]: Classified failures
/// - [`Result`](common::Result): Result alias
pub mod common;

#[cfg(test)]
pub(crate) mod testing;

/// Re-export of the main Discord API client.
pub use client::{ClientRef, DiscordClient};

/// Re-export of the error type.
pub use common::ApiError;
