//! Broadcast fan-out
//!
//! Sends one message to every registered client, one recipient at a time.

use log::warn;

use crate::client::ClientRegistry;

/// Sends `message` to every client currently in the registry, in registry
/// order, and returns how many sends succeeded.
///
/// The client set is snapshotted under the registry lock and the lock is
/// released before any write. A failed send is logged and skipped; that
/// client's own handler notices the broken connection on its next receive.
pub async fn broadcast(registry: &ClientRegistry, message: &[u8]) -> usize {
    let recipients = registry.snapshot().await;
    let mut delivered = 0;

    for client in &recipients {
        match client.send(message).await {
            Ok(()) => delivered += 1,
            Err(e) => warn!(
                "Failed to send to client {} ({}, {}): {}",
                client.id(),
                client.name(),
                client.addr(),
                e
            ),
        }
    }

    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::test_support::loopback_client;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpStream;
    use tokio::time::timeout;

    async fn read_exactly(peer: &mut TcpStream, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        timeout(Duration::from_secs(2), peer.read_exact(&mut buf))
            .await
            .expect("timed out waiting for broadcast")
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn test_every_registered_client_receives_message_verbatim() {
        let registry = ClientRegistry::new();
        let (alice, _r1, mut alice_peer) = loopback_client(registry.next_id(), "alice").await;
        let (bob, _r2, mut bob_peer) = loopback_client(registry.next_id(), "bob").await;
        registry.insert(alice).await;
        registry.insert(bob).await;

        let message = b"\x00raw \xffbytes\n";
        let delivered = broadcast(&registry, message).await;

        assert_eq!(delivered, 2);
        assert_eq!(read_exactly(&mut alice_peer, message.len()).await, message);
        assert_eq!(read_exactly(&mut bob_peer, message.len()).await, message);
    }

    #[tokio::test]
    async fn test_removed_client_is_not_sent_to() {
        let registry = ClientRegistry::new();
        let (alice, _r1, mut alice_peer) = loopback_client(registry.next_id(), "alice").await;
        let (bob, _r2, mut bob_peer) = loopback_client(registry.next_id(), "bob").await;
        let bob_id = bob.id();
        registry.insert(alice).await;
        registry.insert(bob).await;

        // Keep the removed client alive so its connection stays open.
        let _removed = registry.remove(bob_id).await;
        let delivered = broadcast(&registry, b"after").await;

        assert_eq!(delivered, 1);
        assert_eq!(read_exactly(&mut alice_peer, 5).await, b"after");

        let mut buf = [0u8; 5];
        let pending = timeout(Duration::from_millis(200), bob_peer.read(&mut buf)).await;
        assert!(pending.is_err(), "removed client must not receive anything");
    }

    #[tokio::test]
    async fn test_failed_recipient_does_not_stop_fan_out() {
        let registry = ClientRegistry::new();
        let (broken, _r1, _p1) = loopback_client(registry.next_id(), "broken").await;
        let (alice, _r2, mut alice_peer) = loopback_client(registry.next_id(), "alice").await;

        // A shut-down write half rejects further writes.
        broken.close().await;
        registry.insert(broken).await;
        registry.insert(alice).await;

        let delivered = broadcast(&registry, b"still here").await;

        assert_eq!(delivered, 1);
        assert_eq!(read_exactly(&mut alice_peer, 10).await, b"still here");
    }

    #[tokio::test]
    async fn test_empty_registry_delivers_nothing() {
        let registry = ClientRegistry::new();
        assert_eq!(broadcast(&registry, b"anyone?").await, 0);
    }
}
