//! Error handlers
//!
//! Routes server errors to the log at a level matching their impact.

use crate::error::types::{ChatServerError, HandshakeError};
use log::{error, warn};

/// Log a chat server error.
///
/// Handshake failures only cost one connection attempt and are logged as
/// warnings; everything else is an error.
pub fn handle_error(err: &ChatServerError) {
    match err {
        ChatServerError::Handshake(HandshakeError::ConnectionClosed) => {
            warn!("Dropping connection attempt: {}", err)
        }
        ChatServerError::Handshake(_) => warn!("Chat Server Error: {}", err),
        _ => error!("Chat Server Error: {}", err),
    }
}

/// Whether the error should stop the server.
pub fn is_fatal(err: &ChatServerError) -> bool {
    matches!(
        err,
        ChatServerError::Config(_) | ChatServerError::Bind { .. } | ChatServerError::Accept(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_handshake_errors_are_not_fatal() {
        let closed = ChatServerError::from(HandshakeError::ConnectionClosed);
        let reset = ChatServerError::from(HandshakeError::from(io::Error::from(
            io::ErrorKind::ConnectionReset,
        )));
        assert!(!is_fatal(&closed));
        assert!(!is_fatal(&reset));
    }

    #[test]
    fn test_accept_and_bind_errors_are_fatal() {
        let accept = ChatServerError::Accept(io::Error::other("accept failed"));
        let bind = ChatServerError::Bind {
            addr: "127.0.0.1:5500".to_string(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert!(is_fatal(&accept));
        assert!(is_fatal(&bind));
        assert!(bind.to_string().starts_with("Failed to bind to 127.0.0.1:5500"));
    }

    #[test]
    fn test_underlying_io_error_is_the_source() {
        use std::error::Error;

        let accept = ChatServerError::Accept(io::Error::from(io::ErrorKind::ConnectionAborted));
        let source = accept.source().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(source.kind(), io::ErrorKind::ConnectionAborted);

        let handshake = ChatServerError::from(HandshakeError::ConnectionClosed);
        let inner = handshake.source().unwrap();
        assert!(inner.source().is_none());
    }
}
