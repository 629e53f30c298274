use log::debug;
use parking_lot::Mutex;

use super::{Result, SwarmCoordinator};

#[derive(Debug, Default)]
struct Registry {
    bootnodes: Vec<String>,
    peers: Vec<String>,
}

/// In-process registry, for nodes sharing one process and for local swarms.
#[derive(Debug, Default)]
pub struct MemoryCoordinator {
    registry: Mutex<Registry>,
}

impl MemoryCoordinator {
    /// Creates a new `MemoryCoordinator`.
    ///
    /// # Arguments
    /// * `bootnodes` - The peer addresses handed out to joining nodes.
    ///
    /// # Returns
    /// A registry with no registered peers.
    pub fn new(bootnodes: Vec<String>) -> Self {
        Self {
            registry: Mutex::new(Registry {
                bootnodes,
                peers: Vec::new(),
            }),
        }
    }

    /// Adds a bootnode address, keeping insertion order.
    pub fn add_bootnode(&self, addr: impl Into<String>) {
        self.registry.lock().bootnodes.push(addr.into());
    }

    /// Returns the registered peer ids in registration order.
    pub fn peers(&self) -> Vec<String> {
        self.registry.lock().peers.clone()
    }
}

impl SwarmCoordinator for MemoryCoordinator {
    fn get_bootnodes(&self) -> Result<Vec<String>> {
        Ok(self.registry.lock().bootnodes.clone())
    }

    fn register_peer(&self, peer_id: &str) -> Result<()> {
        let mut registry = self.registry.lock();
        if registry.peers.iter().any(|p| p == peer_id) {
            debug!(peer_id = peer_id; "peer already registered");
            return Ok(());
        }

        registry.peers.push(peer_id.to_string());
        Ok(())
    }
}
