//! HTTP chatroom discovery.

use searchbuddy_proto::{
    Chatroom, ProtocolError,
    discovery::{SEARCH_PARAM, chatrooms_url, search_terms},
};
use thiserror::Error;

/// Discovery failures. Each one ends the lookup; nothing is retried.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Request could not be sent or the body could not be read.
    #[error("discovery request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("discovery returned status {0}")]
    Status(u16),

    /// Body is not a chatroom list.
    #[error("discovery response malformed: {0}")]
    Malformed(#[from] ProtocolError),
}

/// Client for the discovery endpoint of one server.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    server: String,
}

impl DiscoveryClient {
    /// Create a client for the server at `server` (base URL).
    pub fn new(server: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), server: server.into() }
    }

    /// Server base URL.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Look up chatrooms for raw user input.
    ///
    /// The default term is appended before the request is sent.
    pub async fn lookup(&self, input: &str) -> Result<Vec<Chatroom>, DiscoveryError> {
        let terms = search_terms(input);
        tracing::debug!(server = %self.server, %terms, "discovery lookup");

        let response = self
            .http
            .get(chatrooms_url(&self.server))
            .query(&[(SEARCH_PARAM, terms.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(Chatroom::decode_list(&body)?)
    }
}
