//! Wire messages
//!
//! The protocol is unframed: every message below is written as-is, with no
//! delimiter or length prefix.

/// Prompt sent to a freshly accepted connection.
pub const NAME_PROMPT: &[u8] = b"NAME";

/// Acknowledgement sent only to the newly registered client.
pub const CONNECTED_ACK: &[u8] = b"Connected to server!";

/// Notice broadcast when a client completes the handshake.
pub fn join_notice(name: &str) -> Vec<u8> {
    format!("{} joined!", name).into_bytes()
}

/// Notice broadcast when a client's connection is gone.
pub fn leave_notice(name: &str) -> Vec<u8> {
    format!("{} left!", name).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_embed_name_verbatim() {
        assert_eq!(join_notice("alice"), b"alice joined!".to_vec());
        assert_eq!(leave_notice("bob"), b"bob left!".to_vec());
        // Names are not trimmed or validated.
        assert_eq!(join_notice(" eve\n"), b" eve\n joined!".to_vec());
        assert_eq!(leave_notice(""), b" left!".to_vec());
    }
}
