//! Broadcast chat server - Entry Point
//!
//! Relays every message a client sends to all connected clients.

use chat_broadcast_server::error::handlers::{handle_error, is_fatal};
use chat_broadcast_server::error::ChatServerError;
use chat_broadcast_server::{Server, ServerConfig};
use log::info;

#[tokio::main]
async fn main() {
    // Default to info so the connection notices show without RUST_LOG set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Launching chat server...");

    if let Err(e) = run().await {
        handle_error(&e);
        if is_fatal(&e) {
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<(), ChatServerError> {
    let config = ServerConfig::load()?;
    let server = Server::bind(config).await?;
    server.start().await
}
