use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{RegistryError, Result, SwarmCoordinator};

/// A peer announced to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub peer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// On-disk layout of a registry file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub bootnodes: Vec<String>,
    #[serde(default)]
    pub peers: Vec<PeerRecord>,
}

/// JSON registry file shared by the nodes of a single host.
///
/// The file is read on every query and replaced on every registration, a missing
/// file reads as an empty registry. Replacement goes through a temporary file in the
/// same directory renamed over the registry, so readers never see a partial write.
/// Two nodes registering at the same instant can still lose one of the updates.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
    contract_address: String,
    owner: Option<String>,
}

impl FileRegistry {
    /// Creates a new `FileRegistry`.
    ///
    /// # Arguments
    /// * `path` - Location of the registry file.
    /// * `contract_address` - The contract this registry stands for. An empty address
    ///   accepts any registry file.
    ///
    /// # Returns
    /// A registry client, nothing is read until the first query.
    pub fn new(path: impl Into<PathBuf>, contract_address: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contract_address: contract_address.into(),
            owner: None,
        }
    }

    /// Records `owner` next to every peer registered through this client.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the registry file.
    ///
    /// # Errors
    /// Returns a `RegistryError` if the file exists but cannot be read or parsed, or if
    /// it belongs to a different contract.
    pub fn load(&self) -> std::result::Result<RegistryDocument, RegistryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("registry file {} not found, starting empty", self.path.display());
                return Ok(RegistryDocument::default());
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let doc: RegistryDocument =
            serde_json::from_str(&content).map_err(|source| RegistryError::Json {
                path: self.path.clone(),
                source,
            })?;

        self.check_contract(&doc)?;
        Ok(doc)
    }

    /// Adds a bootnode address to the registry file, skipping duplicates.
    ///
    /// # Errors
    /// Returns a `RegistryError` if the file cannot be read or written.
    pub fn add_bootnode(&self, addr: &str) -> std::result::Result<(), RegistryError> {
        let mut doc = self.load()?;
        if doc.bootnodes.iter().any(|b| b == addr) {
            debug!("bootnode {addr} already present");
            return Ok(());
        }

        doc.bootnodes.push(addr.to_string());
        self.store(doc)
    }

    fn check_contract(&self, doc: &RegistryDocument) -> std::result::Result<(), RegistryError> {
        if self.contract_address.is_empty()
            || doc.contract_address.is_empty()
            || doc.contract_address == self.contract_address
        {
            return Ok(());
        }

        Err(RegistryError::ContractMismatch {
            expected: self.contract_address.clone(),
            found: doc.contract_address.clone(),
        })
    }

    fn store(&self, mut doc: RegistryDocument) -> std::result::Result<(), RegistryError> {
        if doc.contract_address.is_empty() {
            doc.contract_address = self.contract_address.clone();
        }

        let content = serde_json::to_string_pretty(&doc).map_err(|source| RegistryError::Json {
            path: self.path.clone(),
            source,
        })?;

        let io_err = |source: io::Error| RegistryError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl SwarmCoordinator for FileRegistry {
    fn get_bootnodes(&self) -> Result<Vec<String>> {
        Ok(self.load()?.bootnodes)
    }

    fn register_peer(&self, peer_id: &str) -> Result<()> {
        let mut doc = self.load()?;
        if doc.peers.iter().any(|p| p.peer_id == peer_id) {
            debug!(peer_id = peer_id; "peer already registered");
            return Ok(());
        }

        doc.peers.push(PeerRecord {
            peer_id: peer_id.to_string(),
            owner: self.owner.clone(),
        });
        self.store(doc)?;

        info!("recorded peer {peer_id} in {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::CoordinatorError;

    fn registry(dir: &tempfile::TempDir, contract: &str) -> FileRegistry {
        FileRegistry::new(dir.path().join("registry.json"), contract)
    }

    #[test]
    fn missing_file_has_no_bootnodes() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir, "0xabc");

        assert!(registry.get_bootnodes().unwrap().is_empty());
        assert!(!registry.path().exists());
    }

    #[test]
    fn register_writes_peer_and_contract() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir, "0xabc").with_owner("org-1");

        registry.register_peer("QmNode").unwrap();
        registry.register_peer("QmNode").unwrap();

        let doc = registry.load().unwrap();
        assert_eq!(doc.contract_address, "0xabc");
        assert_eq!(
            doc.peers,
            vec![PeerRecord {
                peer_id: "QmNode".into(),
                owner: Some("org-1".into()),
            }]
        );
    }

    #[test]
    fn bootnodes_come_back_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir, "");

        registry.add_bootnode("/ip4/1.2.3.4/tcp/4001").unwrap();
        registry.add_bootnode("/ip4/5.6.7.8/tcp/4001").unwrap();
        registry.add_bootnode("/ip4/1.2.3.4/tcp/4001").unwrap();

        assert_eq!(
            registry.get_bootnodes().unwrap(),
            vec!["/ip4/1.2.3.4/tcp/4001", "/ip4/5.6.7.8/tcp/4001"]
        );
    }

    #[test]
    fn foreign_contract_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        registry(&dir, "0xabc").register_peer("QmNode").unwrap();

        let err = registry(&dir, "0xdef").get_bootnodes().unwrap_err();
        assert!(matches!(
            err,
            CoordinatorError::Registry(RegistryError::ContractMismatch { .. })
        ));
    }

    #[test]
    fn empty_contract_reads_any_registry() {
        let dir = tempfile::tempdir().unwrap();
        registry(&dir, "0xabc").add_bootnode("/ip4/1.2.3.4/tcp/4001").unwrap();

        assert_eq!(registry(&dir, "").get_bootnodes().unwrap().len(), 1);
    }

    #[test]
    fn registration_leaves_only_the_registry_file() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir, "0xabc");

        registry.add_bootnode("/ip4/1.2.3.4/tcp/4001").unwrap();
        registry.register_peer("QmNode").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("registry.json")]);
    }

    #[test]
    fn readers_never_see_a_partial_write() {
        let dir = tempfile::tempdir().unwrap();
        let writer = registry(&dir, "0xabc");
        let reader = registry(&dir, "0xabc");
        writer.add_bootnode("/ip4/1.2.3.4/tcp/4001").unwrap();

        let handle = std::thread::spawn(move || {
            for i in 0..200 {
                writer.register_peer(&format!("QmNode{i}")).unwrap();
            }
        });

        while !handle.is_finished() {
            let doc = reader.load().unwrap();
            assert_eq!(doc.bootnodes, vec!["/ip4/1.2.3.4/tcp/4001"]);
        }
        handle.join().unwrap();

        assert_eq!(reader.load().unwrap().peers.len(), 200);
    }

    #[test]
    fn garbage_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir, "");
        fs::write(registry.path(), "not json").unwrap();

        assert!(matches!(
            registry.load(),
            Err(RegistryError::Json { .. })
        ));
    }
}
