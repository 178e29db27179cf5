//! Module `state`
//!
//! Defines the `Client` struct: a registered connection's identity, display
//! name, and the write side of its transport.

use log::debug;
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

/// Process-unique identity of a connection. Registry lookups go through this,
/// never through the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(u64);

impl ClientId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Write side of a client's connection, shared between the registry and
/// whichever task is currently broadcasting.
pub type ClientSink = Arc<Mutex<OwnedWriteHalf>>;

/// A registered chat participant.
///
/// Cloning is cheap and every clone writes to the same connection.
#[derive(Clone)]
pub struct Client {
    id: ClientId,
    addr: SocketAddr,
    name: String,
    sink: ClientSink,
}

impl Client {
    pub fn new(id: ClientId, addr: SocketAddr, name: String, writer: OwnedWriteHalf) -> Self {
        Self {
            id,
            addr,
            name,
            sink: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Display name exactly as received during the handshake.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes the whole message to this client's connection.
    pub async fn send(&self, message: &[u8]) -> io::Result<()> {
        let mut writer = self.sink.lock().await;
        writer.write_all(message).await?;
        writer.flush().await
    }

    /// Shuts down the write side of the connection. Errors are ignored: the
    /// peer is usually already gone when this runs.
    ///
    /// Never waits for an in-flight send. If another task holds the sink, the
    /// connection closes when the last clone of this client is dropped.
    pub async fn close(&self) {
        let mut writer = match self.sink.try_lock() {
            Ok(writer) => writer,
            Err(_) => {
                debug!(
                    "Client {} ({}) has a send in flight; deferring close",
                    self.id, self.addr
                );
                return;
            }
        };
        if let Err(e) = writer.shutdown().await {
            debug!("Shutdown of client {} ({}) failed: {}", self.id, self.addr, e);
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("addr", &self.addr)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tokio::net::tcp::OwnedReadHalf;
    use tokio::net::{TcpListener, TcpStream};

    /// Builds a `Client` over a real loopback connection.
    ///
    /// Returns the client, the server-side read half, and the peer's stream.
    pub(crate) async fn loopback_client(
        id: ClientId,
        name: &str,
    ) -> (Client, OwnedReadHalf, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let peer = TcpStream::connect(addr).await.unwrap();
        let (server_side, peer_addr) = listener.accept().await.unwrap();
        let (read_half, write_half) = server_side.into_split();

        (
            Client::new(id, peer_addr, name.to_string(), write_half),
            read_half,
            peer,
        )
    }
}
