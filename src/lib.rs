//! Bootstrap and teardown of a single node in a peer-to-peer training swarm.
//!
//! A [`CoordinatorRunner`] wraps a [`GrpoRunner`]: it resolves initial peers through a
//! [`SwarmCoordinator`] (or the caller's list), registers the node once its DHT is
//! up, hands training to the base runner and releases resources afterward.

pub mod cleanup;
pub mod configs;
pub mod coordinator;
pub mod dht;
pub mod error;
pub mod peers;
pub mod runner;

pub use coordinator::SwarmCoordinator;
pub use dht::Dht;
pub use error::{Result, RunnerError};
pub use runner::{CoordinatorRunner, GrpoRunner, RunnerHooks};
