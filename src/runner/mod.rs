//! Base runner contract and its coordinator-backed wrapper.

mod coordinated;

pub use coordinated::CoordinatorRunner;

use crate::{
    Result,
    configs::{GrpoArgs, ModelArgs, TrainingArgs},
    dht::Dht,
};

/// A distributed training runner that owns DHT construction and the training loop.
///
/// Implementations must go through `hooks` rather than calling their own
/// [`GrpoRunner::setup_dht`] from `run`, so a wrapping runner can act on the DHT
/// before training starts.
pub trait GrpoRunner {
    type Dht: Dht;
    type Dataset;
    /// What the runner hands to the trainer factory: datasets, the DHT, the model...
    type TrainerArgs;
    type Trainer;

    /// Brings up the DHT used for peer-to-peer communication.
    ///
    /// # Errors
    /// Returns `RunnerError::Dht` if the DHT cannot be started.
    fn setup_dht(&self, grpo_args: &GrpoArgs) -> Result<Self::Dht>;

    /// Trains to completion.
    ///
    /// # Arguments
    /// * `model_args` - Model selection.
    /// * `grpo_args` - Swarm run arguments, `initial_peers` already resolved.
    /// * `training_args` - Optimization hyperparameters.
    /// * `initial_datasets_fn` - Produces the (train, eval) dataset pair.
    /// * `hooks` - DHT construction and trainer factory to use for this run.
    ///
    /// # Errors
    /// Whatever the hooks return, or `RunnerError::Training`.
    fn run<F>(
        &self,
        model_args: &ModelArgs,
        grpo_args: &GrpoArgs,
        training_args: &TrainingArgs,
        initial_datasets_fn: F,
        hooks: &dyn RunnerHooks<Self>,
    ) -> Result<()>
    where
        F: FnOnce() -> (Self::Dataset, Self::Dataset);
}

/// Extension points a `GrpoRunner` calls back into during `run`.
pub trait RunnerHooks<R: GrpoRunner + ?Sized> {
    fn setup_dht(&self, grpo_args: &GrpoArgs) -> Result<R::Dht>;

    fn build_trainer(&self, args: R::TrainerArgs) -> R::Trainer;
}
