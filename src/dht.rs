use std::fmt;

/// Handle to the DHT a base runner brings up for peer-to-peer communication.
pub trait Dht {
    /// This node's own peer identifier. Its `Display` form is what gets registered.
    type PeerId: fmt::Display;

    fn peer_id(&self) -> &Self::PeerId;
}
