//
//  discord-rest
//  models/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Entity Models
//!
//! Typed wrappers around Discord resources. Each entity is a snapshot of the
//! server-side resource at the time it was fetched or last updated; it never
//! refreshes on its own.
//!
//! ## Hydration
//!
//! Every entity is built by one step, [`Snapshot::from_snapshot`], which
//! deserializes the raw JSON (applying the key renames below), keeps the raw
//! value around, and attaches a non-owning [`ClientRef`].
//! Mutators such as [`Guild::set_name`] re-run the same step on the server's
//! response through [`Snapshot::apply_snapshot`]; fields are replaced as a
//! whole, never merged.
//!
//! | Entity | Wire key | Field |
//! |--------|----------|-------|
//! | [`Channel`] | `permission_overwrites` | `permissions` |
//! | [`Channel`] | `type` | `kind` |
//! | [`Channel`] | `last_pin_timestamp` | `last_pin_time` |
//! | [`GuildMember`] | `nick` | `nickname` |
//! | [`GuildMember`] | `mute`, `deaf` | `server_prop` |
//!
//! ## Example
//!
//! ```rust
//! use discord_rest::api::ClientRef;
//! use discord_rest::models::{Channel, ChannelType, Snapshot};
//! use serde_json::json;
//!
//! let channel = Channel::from_snapshot(
//!     json!({"id": "41771983423143937", "type": 0, "name": "general"}),
//!     ClientRef::default(),
//! )?;
//! assert_eq!(channel.kind, Some(ChannelType::Text));
//! # Ok::<(), serde_json::Error>(())
//! ```

mod channel;
mod edit;
mod guild;
mod member;
mod user;

pub use channel::*;
pub use edit::*;
pub use guild::*;
pub use member::*;
pub use user::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::api::ClientRef;

/// An entity hydrated from a raw JSON snapshot.
pub trait Snapshot: DeserializeOwned {
    /// The entity's back-reference to its client.
    fn client_ref(&self) -> &ClientRef;

    /// Attaches the client reference and raw snapshot after deserialization.
    fn attach(&mut self, raw: Value, client: ClientRef);

    /// Builds an entity from a raw snapshot.
    fn from_snapshot(raw: Value, client: ClientRef) -> serde_json::Result<Self> {
        let mut entity: Self = serde_json::from_value(raw.clone())?;
        entity.attach(raw, client);
        Ok(entity)
    }

    /// Replaces every field with those of a fresh snapshot.
    ///
    /// The entity is only modified if the whole snapshot hydrates.
    fn apply_snapshot(&mut self, raw: Value) -> serde_json::Result<()> {
        let fresh = Self::from_snapshot(raw, self.client_ref().clone())?;
        *self = fresh;
        Ok(())
    }
}

/// Treats an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
