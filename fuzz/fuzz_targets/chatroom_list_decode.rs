//! Fuzz target for the discovery response decoder
//!
//! The body comes straight off the network; malformed input must be an
//! error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use searchbuddy_proto::Chatroom;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Chatroom::decode_list(text);
    }
});
