//! Peer registry clients.
//!
//! A coordinator answers two questions for a swarm node: which peers are
//! already known (the bootnodes) and how to announce itself once its DHT is up.

mod error;
mod file;
mod memory;

pub use error::{CoordinatorError, RegistryError, Result};
pub use file::{FileRegistry, PeerRecord, RegistryDocument};
pub use memory::MemoryCoordinator;

/// Registry client consumed by the coordinator-backed runner.
pub trait SwarmCoordinator {
    /// Returns the peer addresses already known to the registry, in registry order.
    ///
    /// # Errors
    /// Returns a `CoordinatorError` if the registry cannot be queried.
    fn get_bootnodes(&self) -> Result<Vec<String>>;

    /// Announces `peer_id` to the registry.
    ///
    /// # Errors
    /// Returns a `CoordinatorError` if the registry refuses or cannot record the peer.
    fn register_peer(&self, peer_id: &str) -> Result<()>;

    /// Releases any connection held by the client.
    ///
    /// Called once, right before the coordinator is dropped.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<C: SwarmCoordinator + ?Sized> SwarmCoordinator for Box<C> {
    fn get_bootnodes(&self) -> Result<Vec<String>> {
        (**self).get_bootnodes()
    }

    fn register_peer(&self, peer_id: &str) -> Result<()> {
        (**self).register_peer(peer_id)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
