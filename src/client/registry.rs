//! Client registry
//!
//! The shared, ordered set of registered clients. Every read and mutation
//! takes the one registry lock for a scoped block; no caller ever holds it
//! across network I/O.

use crate::client::{Client, ClientId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Registry for tracking active clients in registration order.
///
/// Clones share the same underlying set.
#[derive(Clone)]
pub struct ClientRegistry {
    clients: Arc<Mutex<Vec<Client>>>,
    next_id: Arc<AtomicU64>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Hands out a fresh identity for a connection about to register.
    pub fn next_id(&self) -> ClientId {
        ClientId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Appends a client. Returns `false` and leaves the registry untouched if
    /// the id is already registered.
    pub async fn insert(&self, client: Client) -> bool {
        let mut clients = self.clients.lock().await;
        if clients.iter().any(|c| c.id() == client.id()) {
            return false;
        }
        clients.push(client);
        true
    }

    /// Removes the client with the given id, preserving the order of the rest.
    /// A second call for the same id returns `None`.
    pub async fn remove(&self, id: ClientId) -> Option<Client> {
        let mut clients = self.clients.lock().await;
        let index = clients.iter().position(|c| c.id() == id)?;
        Some(clients.remove(index))
    }

    pub async fn contains(&self, id: ClientId) -> bool {
        self.clients.lock().await.iter().any(|c| c.id() == id)
    }

    /// Display names in registration order. Duplicates are possible.
    pub async fn names(&self) -> Vec<String> {
        self.clients
            .lock()
            .await
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Copy of the current client set, taken under the lock, for fan-out
    /// after the lock is released.
    pub async fn snapshot(&self) -> Vec<Client> {
        self.clients.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.lock().await.is_empty()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
