//! Client management system
//!
//! Registered client state, the shared registry, and the per-client handler.

pub mod handler;
pub mod registry;
pub mod state;

pub use handler::{Disconnect, deregister, handle_client};
pub use registry::ClientRegistry;
pub use state::{Client, ClientId, ClientSink};
