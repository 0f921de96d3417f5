//! Discoverable chatroom records.

use serde::{Deserialize, Serialize};

use crate::errors::{ProtocolError, Result};

/// A chatroom returned by discovery.
///
/// Immutable once received. `chatroom_id` is the stable key; `url` is the
/// channel endpoint the session connects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chatroom {
    /// Stable room identifier.
    pub chatroom_id: i32,
    /// Number of users currently in the room.
    pub num_users: u32,
    /// Whether the hosting instance is reachable.
    pub online: bool,
    /// Search term the room was created around.
    pub term: String,
    /// Channel endpoint, e.g. `ws://host:port/ws`.
    pub url: String,
}

impl Chatroom {
    /// Parse a discovery response body (JSON array of records).
    pub fn decode_list(body: &str) -> Result<Vec<Self>> {
        serde_json::from_str(body).map_err(|e| ProtocolError::decode("Vec<Chatroom>", &e))
    }

    /// Serialize a list of records, as a discovery server would.
    pub fn encode_list(chatrooms: &[Self]) -> Result<String> {
        serde_json::to_string(chatrooms).map_err(|e| ProtocolError::encode("Vec<Chatroom>", &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_discovery_body() {
        let body = r#"[{"chatroom_id":1,"num_users":0,"online":true,"term":"cats","url":"ws://x"}]"#;
        let rooms = Chatroom::decode_list(body).unwrap();

        assert_eq!(rooms, vec![Chatroom {
            chatroom_id: 1,
            num_users: 0,
            online: true,
            term: "cats".into(),
            url: "ws://x".into(),
        }]);
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(Chatroom::decode_list("[]").unwrap().is_empty());
    }

    #[test]
    fn record_missing_url_is_rejected() {
        let body = r#"[{"chatroom_id":1,"num_users":0,"online":true,"term":"cats"}]"#;
        assert!(Chatroom::decode_list(body).is_err());
    }

    #[test]
    fn object_instead_of_array_is_rejected() {
        let body = r#"{"chatroom_id":1,"num_users":0,"online":true,"term":"cats","url":"ws://x"}"#;
        assert!(Chatroom::decode_list(body).is_err());
    }

    #[test]
    fn negative_user_count_is_rejected() {
        let body = r#"[{"chatroom_id":1,"num_users":-1,"online":true,"term":"cats","url":"ws://x"}]"#;
        assert!(Chatroom::decode_list(body).is_err());
    }
}
