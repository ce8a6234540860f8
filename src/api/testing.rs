//
//  discord-rest
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Helpers for tests that run the client against a mock server.

use mockito::ServerGuard;

use crate::api::DiscordClient;
use crate::config::ClientOptions;
use crate::sink::testing::RecordingSink;

pub const TEST_TOKEN: &str = "test-token";

/// Builds a `Bot` client for `endpoint` that reports into `sink`.
pub fn client_for(endpoint: &str, sink: RecordingSink) -> DiscordClient {
    DiscordClient::with_handler(
        TEST_TOKEN,
        sink,
        ClientOptions::default().with_endpoint(endpoint),
    )
    .unwrap()
}

/// A mock server plus a client pointed at it.
pub struct Fixture {
    pub server: ServerGuard,
    pub client: DiscordClient,
    pub sink: RecordingSink,
}

impl Fixture {
    pub async fn new() -> Self {
        let server = mockito::Server::new_async().await;
        let sink = RecordingSink::new();
        let client = client_for(&server.url(), sink.clone());
        Self { server, client, sink }
    }
}
