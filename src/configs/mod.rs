mod error;
mod identity;
mod model;
mod training;

use std::{fs, path::Path};

use serde::de::DeserializeOwned;

pub use error::{ConfigError, Result};
pub use identity::{Identity, IdentityConfig};
pub use model::ModelArgs;
pub use training::{GrpoArgs, TrainingArgs};

/// Loads a config record from a JSON file.
///
/// # Errors
/// Returns a `ConfigError` if the file cannot be read or does not match `T`.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_identity_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "modal_org_id": "org-7", "contract_address": "0xabc" }}"#
        )
        .unwrap();

        let cfg: IdentityConfig = load_json(file.path()).unwrap();
        assert_eq!(cfg.modal_org_id.as_deref(), Some("org-7"));
        assert_eq!(cfg.wallet_private_key, None);
        assert_eq!(cfg.contract_address, "0xabc");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json::<IdentityConfig>(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn wrong_shape_is_a_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_peers": "BOOT" }}"#).unwrap();

        let err = load_json::<GrpoArgs>(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }
}
