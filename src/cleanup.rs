//! Post-training resource release.

use std::{error::Error, fmt};

use log::{debug, info, warn};

use crate::coordinator::SwarmCoordinator;

/// Failure to release an accelerator's cached memory.
#[derive(Debug)]
pub struct AcceleratorError(pub String);

impl fmt::Display for AcceleratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "accelerator error: {}", self.0)
    }
}

impl Error for AcceleratorError {}

/// A unified-memory accelerator whose allocator keeps a cache around.
pub trait Accelerator {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Returns the accelerator's cached memory pool to the system.
    ///
    /// # Errors
    /// Returns an `AcceleratorError` if the backend refuses.
    fn empty_cache(&self) -> Result<(), AcceleratorError>;
}

/// Host facilities the runner touches once training is over.
pub trait Platform {
    /// Reclaims memory no longer referenced by the process.
    fn reclaim_memory(&self);

    /// The unified-memory accelerator of this host, if it has one.
    fn accelerator(&self) -> Option<&dyn Accelerator>;
}

/// A host without unified-memory acceleration.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn reclaim_memory(&self) {
        debug!("nothing to reclaim on host platform");
    }

    fn accelerator(&self) -> Option<&dyn Accelerator> {
        None
    }
}

/// Releases what a finished run still holds. Never fails.
///
/// # Arguments
/// * `coordinator` - The runner's coordinator, closed and dropped. Close errors are discarded.
/// * `platform` - Host hooks for memory reclaim and accelerator cache release.
pub fn release_resources<C: SwarmCoordinator>(coordinator: Option<C>, platform: &dyn Platform) {
    info!("training finished, releasing resources");

    if let Some(mut coordinator) = coordinator {
        let _ = coordinator.close();
        drop(coordinator);
    }

    platform.reclaim_memory();

    if let Some(accelerator) = platform.accelerator().filter(|a| a.is_available()) {
        match accelerator.empty_cache() {
            Ok(()) => info!("{} cache emptied", accelerator.name()),
            Err(e) => warn!("failed to empty {} cache: {e}", accelerator.name()),
        }
    }

    info!("resources released");
}
