//! Chat wire protocol
//!
//! The name handshake and the fixed messages the server writes.

pub mod handshake;
pub mod responses;

pub use handshake::request_name;
pub use responses::{CONNECTED_ACK, NAME_PROMPT, join_notice, leave_notice};
