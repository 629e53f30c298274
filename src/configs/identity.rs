use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Credentials a node registers with, plus the registry contract they apply to.
///
/// `wallet_private_key` and `modal_org_id` are mutually exclusive. The record itself
/// does not check it, [`IdentityConfig::identity`] does.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// EOA wallet private key.
    pub wallet_private_key: Option<String>,
    /// Organization id of a hosted login.
    pub modal_org_id: Option<String>,
    /// Swarm coordinator contract address.
    pub contract_address: String,
}

impl IdentityConfig {
    /// Overlays every field set in `other` on top of `self`.
    pub fn merge(self, other: IdentityConfig) -> Self {
        Self {
            wallet_private_key: other.wallet_private_key.or(self.wallet_private_key),
            modal_org_id: other.modal_org_id.or(self.modal_org_id),
            contract_address: if other.contract_address.is_empty() {
                self.contract_address
            } else {
                other.contract_address
            },
        }
    }

    /// Resolves which of the two credentials this node uses.
    ///
    /// # Errors
    /// `ConflictingIdentity` if both are set, `MissingIdentity` if neither is. Empty
    /// strings count as unset.
    pub fn identity(&self) -> Result<Identity> {
        let key = non_empty(&self.wallet_private_key);
        let org = non_empty(&self.modal_org_id);

        match (key, org) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingIdentity),
            (Some(key), None) => Ok(Identity::Wallet {
                private_key: key.to_string(),
            }),
            (None, Some(org)) => Ok(Identity::Organization {
                org_id: org.to_string(),
            }),
            (None, None) => Err(ConfigError::MissingIdentity),
        }
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field(
                "wallet_private_key",
                &self.wallet_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("modal_org_id", &self.modal_org_id)
            .field("contract_address", &self.contract_address)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A validated node identity.
#[derive(Clone, PartialEq, Eq)]
pub enum Identity {
    Wallet { private_key: String },
    Organization { org_id: String },
}

impl Identity {
    /// Label recorded next to registered peers. Never contains key material.
    pub fn owner(&self) -> &str {
        match self {
            Self::Wallet { .. } => "wallet",
            Self::Organization { org_id } => org_id,
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet { .. } => f
                .debug_struct("Wallet")
                .field("private_key", &"<redacted>")
                .finish(),
            Self::Organization { org_id } => f
                .debug_struct("Organization")
                .field("org_id", org_id)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>, org: Option<&str>) -> IdentityConfig {
        IdentityConfig {
            wallet_private_key: key.map(str::to_string),
            modal_org_id: org.map(str::to_string),
            contract_address: "0x2fC68a233EF9E9509f034DD551FF90A79a0B8F82".into(),
        }
    }

    #[test]
    fn wallet_identity() {
        let identity = config(Some("0xdeadbeef"), None).identity().unwrap();
        assert_eq!(
            identity,
            Identity::Wallet {
                private_key: "0xdeadbeef".into()
            }
        );
        assert_eq!(identity.owner(), "wallet");
    }

    #[test]
    fn organization_identity() {
        let identity = config(None, Some("org-42")).identity().unwrap();
        assert_eq!(identity.owner(), "org-42");
    }

    #[test]
    fn both_credentials_conflict() {
        let err = config(Some("0xdeadbeef"), Some("org-42")).identity().unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingIdentity));
    }

    #[test]
    fn empty_strings_are_unset() {
        let err = config(Some(""), Some("")).identity().unwrap_err();
        assert!(matches!(err, ConfigError::MissingIdentity));

        let identity = config(Some(""), Some("org-42")).identity().unwrap();
        assert_eq!(identity.owner(), "org-42");
    }

    #[test]
    fn debug_never_prints_the_key() {
        let cfg = config(Some("0xdeadbeef"), None);
        assert!(!format!("{cfg:?}").contains("deadbeef"));
        assert!(!format!("{:?}", cfg.identity().unwrap()).contains("deadbeef"));
    }

    #[test]
    fn merge_prefers_set_fields() {
        let file = config(None, Some("org-42"));
        let cli = IdentityConfig {
            contract_address: "0x1".into(),
            ..Default::default()
        };

        let merged = file.merge(cli);
        assert_eq!(merged.modal_org_id.as_deref(), Some("org-42"));
        assert_eq!(merged.contract_address, "0x1");
    }
}
