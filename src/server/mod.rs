//! Server core functionality
//!
//! The accept loop with its name handshake, and the broadcast fan-out.

pub mod acceptor;
pub mod broadcast;

pub use acceptor::Server;
pub use broadcast::broadcast;
