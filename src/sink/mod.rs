//
//  discord-rest
//  sink/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Error Sink
//!
//! Every failure the client observes (missing token, transport errors,
//! unparseable responses, rejected arguments) is reported through a single
//! injectable [`ErrorSink`] with a human-readable message and an optional
//! diagnostic payload. The same failure is also returned to the caller as an
//! [`ApiError`](crate::api::common::ApiError).
//!
//! ## Example
//!
//! ```rust,no_run
//! use discord_rest::api::DiscordClient;
//! use discord_rest::config::ClientOptions;
//!
//! let client = DiscordClient::with_handler(
//!     "token",
//!     |message: &str, detail: Option<&str>| eprintln!("discord: {message} {detail:?}"),
//!     ClientOptions::default(),
//! )?;
//! # Ok::<(), discord_rest::api::common::ApiError>(())
//! ```

use std::sync::Arc;

/// Receives every error reported by a [`DiscordClient`](crate::api::DiscordClient).
pub trait ErrorSink: Send + Sync {
    /// Reports a failure.
    ///
    /// `detail` carries diagnostic context such as the response body.
    fn report(&self, message: &str, detail: Option<&str>);
}

impl<F> ErrorSink for F
where
    F: Fn(&str, Option<&str>) + Send + Sync,
{
    fn report(&self, message: &str, detail: Option<&str>) {
        self(message, detail)
    }
}

/// Default sink: logs through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, message: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => tracing::error!(detail = %detail, "{}", message),
            None => tracing::error!("{}", message),
        }
    }
}

/// Shared handle to a sink, as stored by the client.
pub type SharedSink = Arc<dyn ErrorSink>;


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn test_closure_is_a_sink() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sink: SharedSink = Arc::new(move |_: &str, _: Option<&str>| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sink.report("boom", None);
        sink.report("boom again", Some("detail"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_recording_sink_keeps_detail() {
        let sink = RecordingSink::new();
        sink.report("Request failed", Some("404"));

        assert_eq!(
            sink.reports(),
            vec![("Request failed".to_string(), Some("404".to_string()))]
        );
    }
}
