//! Initial peer resolution.

use log::info;

/// Reserved `initial_peers` value marking the first node of a swarm.
pub const BOOT_SENTINEL: &str = "BOOT";

/// Where a node's initial peers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerSource<'a> {
    /// The caller passed exactly `["BOOT"]`: no peers to dial.
    Bootnode,
    /// The caller passed a peer list, used verbatim.
    Explicit(&'a [String]),
    /// Nothing was passed, ask the coordinator.
    Coordinator,
}

impl<'a> PeerSource<'a> {
    /// Classifies a caller supplied `initial_peers` list.
    pub fn classify(initial_peers: &'a [String]) -> Self {
        match initial_peers {
            [] => Self::Coordinator,
            [only] if only == BOOT_SENTINEL => Self::Bootnode,
            peers => Self::Explicit(peers),
        }
    }
}

/// Resolves the effective initial peer list.
///
/// `bootnodes` is only called when `initial_peers` is empty, its result is used as-is.
///
/// # Errors
/// Whatever `bootnodes` returns, unmodified.
pub fn resolve_initial_peers<E, F>(initial_peers: &[String], bootnodes: F) -> Result<Vec<String>, E>
where
    F: FnOnce() -> Result<Vec<String>, E>,
{
    match PeerSource::classify(initial_peers) {
        PeerSource::Coordinator => {
            let peers = bootnodes()?;
            info!("retrieved initial peers from coordinator: {peers:?}");
            Ok(peers)
        }
        PeerSource::Bootnode => {
            info!("proceeding as bootnode");
            Ok(Vec::new())
        }
        PeerSource::Explicit(peers) => Ok(peers.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classify_lists() {
        assert_eq!(PeerSource::classify(&[]), PeerSource::Coordinator);
        assert_eq!(PeerSource::classify(&strings(&["BOOT"])), PeerSource::Bootnode);

        let explicit = strings(&["/ip4/1.2.3.4/tcp/4001/p2p/QmA"]);
        assert_eq!(PeerSource::classify(&explicit), PeerSource::Explicit(&explicit));
    }

    #[test]
    fn sentinel_is_exact() {
        let cases: [&[&str]; 4] = [
            &["boot"],
            &["BOOT "],
            &["BOOT", "BOOT"],
            &["BOOT", "/ip4/1.2.3.4/tcp/4001"],
        ];

        for peers in cases {
            let peers = strings(peers);
            assert_eq!(PeerSource::classify(&peers), PeerSource::Explicit(&peers));
        }
    }

    #[test]
    fn empty_list_asks_for_bootnodes() {
        let resolved =
            resolve_initial_peers::<(), _>(&[], || Ok(strings(&["/ip4/9.9.9.9/tcp/4001"])))
                .unwrap();
        assert_eq!(resolved, strings(&["/ip4/9.9.9.9/tcp/4001"]));
    }

    #[test]
    fn bootnode_query_error_is_returned() {
        let err = resolve_initial_peers(&[], || Err("registry down")).unwrap_err();
        assert_eq!(err, "registry down");
    }

    #[test]
    fn boot_resolves_to_nothing_without_query() {
        let resolved = resolve_initial_peers::<(), _>(&strings(&["BOOT"]), || {
            panic!("bootnodes must not be queried")
        })
        .unwrap();
        assert!(resolved.is_empty());
    }
}
