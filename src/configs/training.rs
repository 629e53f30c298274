use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Arguments of a swarm training run.
///
/// `initial_peers` is rewritten by the coordinator-backed runner with the resolved
/// peer list before the base runner sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpoArgs {
    pub initial_peers: Vec<String>,
    pub public_maddr: Option<String>,
    pub host_maddr: Option<String>,
    pub identity_path: Option<PathBuf>,
    pub max_rounds: usize,
}

impl Default for GrpoArgs {
    fn default() -> Self {
        Self {
            initial_peers: Vec::new(),
            public_maddr: None,
            host_maddr: None,
            identity_path: None,
            max_rounds: 100,
        }
    }
}

/// Optimization hyperparameters, opaque to the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingArgs {
    pub output_dir: PathBuf,
    pub learning_rate: f64,
    pub num_train_epochs: usize,
    pub per_device_train_batch_size: usize,
    pub seed: Option<u64>,
}

impl Default for TrainingArgs {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("runs"),
            learning_rate: 5e-7,
            num_train_epochs: 1,
            per_device_train_batch_size: 8,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let args: GrpoArgs =
            serde_json::from_str(r#"{ "initial_peers": ["BOOT"] }"#).unwrap();

        assert_eq!(args.initial_peers, vec!["BOOT"]);
        assert_eq!(args.max_rounds, GrpoArgs::default().max_rounds);
    }
}
