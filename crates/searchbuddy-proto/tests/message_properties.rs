//! Property-based tests for wire decoding.
//!
//! Decoding must never panic, and must only accept the enumerated tags.

use proptest::prelude::*;
use searchbuddy_proto::{ClientMessage, ProtocolError, ServerMessage};

const SERVER_TAGS: [&str; 5] =
    ["Joined", "NewUser", "UserDisconnected", "NewMessage", "ChatsFromTodayResponse"];

proptest! {
    #[test]
    fn prop_decode_never_panics(text in ".*") {
        let _ = ServerMessage::decode(&text);
        let _ = ClientMessage::decode(&text);
    }

    #[test]
    fn prop_unknown_tag_is_decode_error(tag in "[A-Za-z]{1,16}") {
        prop_assume!(!SERVER_TAGS.contains(&tag.as_str()));

        let text = format!(r#"{{"type":"{tag}","content":"x","user_id":1,"chatroom_id":1,"messages":[]}}"#);
        let result = ServerMessage::decode(&text);

        prop_assert!(
            matches!(result, Err(ProtocolError::Decode { .. })),
            "tag {} decoded as {:?}", tag, result
        );
    }

    #[test]
    fn prop_content_is_sent_verbatim(content in ".*") {
        let text = ClientMessage::NewMessage { content: content.clone() }.encode().unwrap();
        let decoded = ClientMessage::decode(&text).unwrap();
        prop_assert_eq!(decoded, ClientMessage::NewMessage { content });
    }
}
