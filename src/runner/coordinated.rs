use log::{debug, info};

use super::{GrpoRunner, RunnerHooks};
use crate::{
    Result, RunnerError,
    cleanup::{self, HostPlatform, Platform},
    configs::{GrpoArgs, ModelArgs, TrainingArgs},
    coordinator::SwarmCoordinator,
    dht::Dht,
    peers,
};

/// Runs a base runner inside a coordinator-mediated swarm.
///
/// Initial peers come from the coordinator unless the caller supplies them, the node
/// registers itself as soon as its DHT is up, and trainers are built with the
/// coordinator bound in. A successful run releases the coordinator, so one runner
/// serves a single `run`.
pub struct CoordinatorRunner<R, C, F> {
    base: R,
    coordinator: Option<C>,
    trainer_factory: F,
    platform: Box<dyn Platform>,
}

impl<R, C, F> CoordinatorRunner<R, C, F>
where
    R: GrpoRunner,
    C: SwarmCoordinator,
    F: Fn(&C, R::TrainerArgs) -> R::Trainer,
{
    /// Creates a new `CoordinatorRunner`.
    ///
    /// # Arguments
    /// * `base` - The runner doing the actual training.
    /// * `coordinator` - Registry client, owned by this runner until cleanup.
    /// * `trainer_factory` - Builds a coordinator-aware trainer from the base runner's
    ///   trainer arguments.
    ///
    /// # Returns
    /// A runner that cleans up through [`HostPlatform`].
    pub fn new(base: R, coordinator: C, trainer_factory: F) -> Self {
        Self {
            base,
            coordinator: Some(coordinator),
            trainer_factory,
            platform: Box::new(HostPlatform),
        }
    }

    /// Replaces the platform used for memory and accelerator cleanup.
    pub fn with_platform<P: Platform + 'static>(mut self, platform: P) -> Self {
        self.platform = Box::new(platform);
        self
    }

    /// Returns the wrapped base runner.
    pub fn base(&self) -> &R {
        &self.base
    }

    /// Returns the coordinator, `None` once a run has released it.
    pub fn coordinator(&self) -> Option<&C> {
        self.coordinator.as_ref()
    }

    fn live_coordinator(&self) -> Result<&C> {
        self.coordinator
            .as_ref()
            .ok_or(RunnerError::CoordinatorReleased)
    }

    /// Asks the coordinator for the swarm's bootnodes.
    ///
    /// # Errors
    /// The coordinator's error, unmodified, or `CoordinatorReleased`.
    pub fn get_initial_peers(&self) -> Result<Vec<String>> {
        Ok(self.live_coordinator()?.get_bootnodes()?)
    }

    /// Registers `peer_id` with the coordinator. No retry.
    ///
    /// # Errors
    /// The coordinator's error, unmodified, or `CoordinatorReleased`.
    pub fn register_peer(&self, peer_id: &str) -> Result<()> {
        info!("registering self with peer id: {peer_id}");
        self.live_coordinator()?.register_peer(peer_id)?;
        Ok(())
    }

    /// Brings up the base runner's DHT, then registers this node's peer id.
    ///
    /// # Errors
    /// A DHT failure is returned before anything is registered. A registration failure
    /// is returned after the DHT came up; the DHT is not shut down here.
    pub fn setup_dht(&self, grpo_args: &GrpoArgs) -> Result<R::Dht> {
        let dht = self.base.setup_dht(grpo_args)?;
        let peer_id = dht.peer_id().to_string();
        self.register_peer(&peer_id)?;
        Ok(dht)
    }

    /// Resolves initial peers, trains through the base runner, then releases resources.
    ///
    /// The resolved peer list is written back into `grpo_args.initial_peers`. Cleanup
    /// only happens when the base runner returns `Ok`.
    ///
    /// # Errors
    /// Coordinator and DHT errors, or whatever the base runner returns.
    pub fn run<D>(
        &mut self,
        model_args: &ModelArgs,
        grpo_args: &mut GrpoArgs,
        training_args: &TrainingArgs,
        initial_datasets_fn: D,
    ) -> Result<()>
    where
        D: FnOnce() -> (R::Dataset, R::Dataset),
    {
        let coordinator = self.live_coordinator()?;
        grpo_args.initial_peers =
            peers::resolve_initial_peers(&grpo_args.initial_peers, || coordinator.get_bootnodes())?;

        debug!(peers = grpo_args.initial_peers.len(); "starting base runner");

        {
            let trainer_factory =
                |args: R::TrainerArgs| (self.trainer_factory)(coordinator, args);
            let hooks = CoordinatorHooks {
                runner: &*self,
                trainer_factory: &trainer_factory,
            };

            self.base.run(
                model_args,
                grpo_args,
                training_args,
                initial_datasets_fn,
                &hooks,
            )?;
        }

        cleanup::release_resources(self.coordinator.take(), self.platform.as_ref());
        Ok(())
    }
}

/// Hooks handed to the base runner for one `run`.
struct CoordinatorHooks<'a, R: GrpoRunner, C, F> {
    runner: &'a CoordinatorRunner<R, C, F>,
    trainer_factory: &'a dyn Fn(R::TrainerArgs) -> R::Trainer,
}

impl<R, C, F> RunnerHooks<R> for CoordinatorHooks<'_, R, C, F>
where
    R: GrpoRunner,
    C: SwarmCoordinator,
    F: Fn(&C, R::TrainerArgs) -> R::Trainer,
{
    fn setup_dht(&self, grpo_args: &GrpoArgs) -> Result<R::Dht> {
        self.runner.setup_dht(grpo_args)
    }

    fn build_trainer(&self, args: R::TrainerArgs) -> R::Trainer {
        (self.trainer_factory)(args)
    }
}
