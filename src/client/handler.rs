use log::{info, warn};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::client::{Client, ClientId, ClientRegistry};
use crate::protocol::leave_notice;
use crate::server::broadcast;

/// Why a client's receive loop ended. Both outcomes take the same
/// deregistration path.
#[derive(Debug)]
pub enum Disconnect {
    /// The peer closed the connection (zero-length read).
    Closed,
    /// The receive itself failed.
    Failed(io::Error),
}

/// Pumps one client's inbound bytes into the broadcast fan-out.
///
/// - Each receive takes up to `buffer_size` bytes and forwards exactly those
///   bytes, unmodified, to every registered client (the sender included).
/// - The first failed or closed receive deregisters the client and ends the loop.
pub async fn handle_client<R>(
    mut reader: R,
    client_id: ClientId,
    registry: ClientRegistry,
    buffer_size: usize,
) -> Disconnect
where
    R: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; buffer_size];

    loop {
        let outcome = match reader.read(&mut buffer).await {
            Ok(0) => Disconnect::Closed,
            Ok(n) => {
                broadcast(&registry, &buffer[..n]).await;
                continue;
            }
            Err(e) => Disconnect::Failed(e),
        };

        match &outcome {
            Disconnect::Closed => info!("Connection closed by client {}", client_id),
            Disconnect::Failed(e) => warn!("Failed to read from client {}: {}", client_id, e),
        }

        deregister(&registry, client_id).await;
        return outcome;
    }
}

/// Removes the client, closes its connection, and tells everyone else it left.
///
/// Returns the removed client, or `None` if it was already gone, in which
/// case nothing is closed or broadcast.
pub async fn deregister(registry: &ClientRegistry, client_id: ClientId) -> Option<Client> {
    let client = registry.remove(client_id).await?;
    client.close().await;

    info!("{} ({}) left", client.name(), client.addr());
    broadcast(registry, &leave_notice(client.name())).await;

    Some(client)
}
