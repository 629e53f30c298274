use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use swarm_node::{
    SwarmCoordinator,
    configs::{self, IdentityConfig},
    coordinator::FileRegistry,
    peers,
};

/// Swarm node launcher tools backed by a local registry file.
#[derive(Parser, Debug)]
#[command(name = "swarm-node")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Registry file shared by the nodes of this host
    #[arg(long, env = "SWARM_REGISTRY", default_value = "swarm-registry.json")]
    registry: PathBuf,

    /// JSON file holding an identity config, flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    identity: IdentityArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct IdentityArgs {
    /// EOA wallet private key, mutually exclusive with --org-id
    #[arg(long, env = "SWARM_WALLET_PRIVATE_KEY", hide_env_values = true)]
    wallet_private_key: Option<String>,

    /// Organization id, mutually exclusive with --wallet-private-key
    #[arg(long, env = "SWARM_ORG_ID")]
    org_id: Option<String>,

    /// Swarm coordinator contract address
    #[arg(long, env = "SWARM_CONTRACT_ADDRESS")]
    contract_address: Option<String>,
}

impl From<IdentityArgs> for IdentityConfig {
    fn from(args: IdentityArgs) -> Self {
        Self {
            wallet_private_key: args.wallet_private_key,
            modal_org_id: args.org_id,
            contract_address: args.contract_address.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the peers a node would dial, given an optional explicit list
    Peers {
        /// Comma-separated multiaddrs, or BOOT for the first node of a swarm
        #[arg(long, value_delimiter = ',')]
        initial_peers: Vec<String>,
    },
    /// Register a peer id under this node's identity
    Register { peer_id: String },
    /// Add a bootnode address to the registry
    AddBootnode { addr: String },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configs::load_json::<IdentityConfig>(path)
            .with_context(|| format!("loading identity config {}", path.display()))?,
        None => IdentityConfig::default(),
    }
    .merge(cli.identity.into());

    let registry = FileRegistry::new(&cli.registry, config.contract_address.clone());

    match cli.command {
        Command::Peers { initial_peers } => {
            let peers = peers::resolve_initial_peers(&initial_peers, || registry.get_bootnodes())
                .context("resolving initial peers")?;

            for peer in peers {
                println!("{peer}");
            }
        }
        Command::Register { peer_id } => {
            let identity = config.identity().context("invalid identity")?;
            let registry = registry.with_owner(identity.owner());

            info!("registering self with peer id: {peer_id}");
            registry
                .register_peer(&peer_id)
                .with_context(|| format!("registering {peer_id}"))?;
        }
        Command::AddBootnode { addr } => {
            registry
                .add_bootnode(&addr)
                .with_context(|| format!("adding bootnode {addr}"))?;
        }
    }

    Ok(())
}
