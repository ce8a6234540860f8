//
//  discord-rest
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # discord-rest
//!
//! An async client library for the Discord REST API.
//!
//! The [`DiscordClient`] authenticates requests and exposes one method per REST
//! operation. Results come back either as raw JSON or as typed entities
//! ([`User`], [`Guild`], [`GuildMember`], [`Channel`]) that can navigate to
//! related resources and apply changes through the same client.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use discord_rest::{ClientOptions, DiscordClient};
//!
//! #[tokio::main]
//! async fn main() -> discord_rest::api::common::Result<()> {
//!     discord_rest::init_logging();
//!
//!     let client = DiscordClient::new("my-bot-token", ClientOptions::default())?;
//!     let mut channel = client.get_channel("41771983423143937").await?;
//!     channel.set_topic("Release day").await?;
//!     channel.send_message("Shipping now").await?;
//!
//!     for (id, channel) in channel.resolve_guild().await?.get_channels().await? {
//!         println!("{id}: {:?} ({:?})", channel.name, channel.kind);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure is reported once through the client's
//! [`ErrorSink`](sink::ErrorSink) and returned as an
//! [`ApiError`](api::common::ApiError). Nothing is retried.

/// API client for Discord.
///
/// The client handles authentication, request building and error handling.
pub mod api;

/// The `Authorization` header credential.
pub mod auth;

/// Construction-time client options.
pub mod config;

/// Typed entities hydrated from API responses.
pub mod models;

/// The single error-reporting channel.
pub mod sink;

pub use api::DiscordClient;
pub use config::ClientOptions;
pub use models::{Channel, ChannelType, Guild, GuildMember, User};

/// Library version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter used by [`init_logging`].
pub const LOG_ENV: &str = "DISCORD_REST_LOG";

/// Installs a `tracing` subscriber that writes to stderr.
///
/// The filter is read from `DISCORD_REST_LOG` and defaults to `warn`. Does
/// nothing if a global subscriber is already installed.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
