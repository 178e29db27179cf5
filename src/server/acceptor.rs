use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::client::{Client, ClientRegistry, handle_client};
use crate::config::ServerConfig;
use crate::error::ChatServerError;
use crate::error::handlers::handle_error;
use crate::protocol::{CONNECTED_ACK, join_notice, request_name};
use crate::server::broadcast;

pub struct Server {
    client_registry: ClientRegistry,
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds the listener described by `config`. The registry starts empty.
    pub async fn bind(config: ServerConfig) -> Result<Self, ChatServerError> {
        let socket = config.listen_socket();

        let listener = TcpListener::bind(&socket)
            .await
            .map_err(|source| ChatServerError::Bind {
                addr: socket.clone(),
                source,
            })?;
        info!("Server bound to {}", socket);

        Ok(Self {
            client_registry: ClientRegistry::new(),
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the live registry; shares state with the running server.
    pub fn registry(&self) -> ClientRegistry {
        self.client_registry.clone()
    }

    /// Runs the accept loop. Returns only when an accept fails, which is fatal.
    pub async fn start(self) -> Result<(), ChatServerError> {
        info!("Starting chat server, you may connect your clients now.");

        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                    return Err(ChatServerError::Accept(e));
                }
            };
            info!("Connected with {}", addr);

            let client_registry = self.client_registry.clone();
            let config = Arc::clone(&self.config);

            // Spawn a task for each client so the accept loop doesn't block on the handshake
            tokio::spawn(async move {
                if let Err(e) = handle_new_client(stream, addr, client_registry, config).await {
                    handle_error(&e);
                }
            });
        }
    }
}

/// Handles a new connection: asks for a name, registers, announces the join,
/// acknowledges, then runs the client's receive loop until it disconnects.
///
/// A connection that never produces a name is dropped without touching the registry.
async fn handle_new_client(
    stream: TcpStream,
    client_addr: SocketAddr,
    client_registry: ClientRegistry,
    config: Arc<ServerConfig>,
) -> Result<(), ChatServerError> {
    let (mut read_half, mut write_half) = stream.into_split();

    let name = request_name(&mut read_half, &mut write_half, config.buffer_size).await?;
    info!("Nickname is {}", name);

    let client = Client::new(client_registry.next_id(), client_addr, name, write_half);
    let client_id = client.id();
    if !client_registry.insert(client.clone()).await {
        error!(
            "Client {} ({}) is already registered; dropping the connection",
            client_id, client_addr
        );
        return Ok(());
    }

    broadcast(&client_registry, &join_notice(client.name())).await;

    // A failed acknowledgement surfaces as a failed receive in the handler below.
    if let Err(e) = client.send(CONNECTED_ACK).await {
        info!("Could not acknowledge client {} ({}): {}", client_id, client_addr, e);
    }
    drop(client);

    handle_client(read_half, client_id, client_registry, config.buffer_size).await;
    Ok(())
}
