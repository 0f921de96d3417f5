//! Fuzz target for ServerMessage::decode
//!
//! Arbitrary text must decode or return an error, never panic. Anything that
//! decodes must re-encode and decode to the same message.

#![no_main]

use libfuzzer_sys::fuzz_target;
use searchbuddy_proto::ServerMessage;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(message) = ServerMessage::decode(text) {
        let encoded = message.encode().expect("decoded message re-encodes");
        let again = ServerMessage::decode(&encoded).expect("re-encoded message decodes");
        assert_eq!(message, again);
    }
});
