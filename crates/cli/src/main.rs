//! `joint` — manage search-engine clusters from the terminal.
//!
//! Thin front end over `joint-core` (registry) and `joint-relay`
//! (dispatch); all contracts live in the library crates.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use joint_core::{AesGcmCodec, ClusterProfileInput, ClusterRegistry, ConfigStore, Protocol};
use joint_relay::{ApiError, Method, RelayClient};

#[derive(Parser)]
#[command(name = "joint", version, about = "Search-engine cluster console")]
struct Cli {
    /// Config file location (defaults to ~/joint.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProtocolArg {
    Http,
    Https,
}

impl From<ProtocolArg> for Protocol {
    fn from(p: ProtocolArg) -> Self {
        match p {
            ProtocolArg::Http => Protocol::Http,
            ProtocolArg::Https => Protocol::Https,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List registered clusters.
    List,
    /// Register a new cluster.
    Add {
        /// User-facing cluster name; must be unique.
        name: String,
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: u16,
        #[arg(long, value_enum, default_value_t = ProtocolArg::Http)]
        protocol: ProtocolArg,
        /// Skip TLS certificate validation (https only).
        #[arg(long)]
        no_verify: bool,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove a cluster by id.
    Remove { id: String },
    /// Show one cluster profile.
    Show { id: String },
    /// Test the connection to a cluster.
    Test { id: String },
    /// List a cluster's nodes.
    Nodes { id: String },
    /// List a cluster's indices.
    Indices { id: String },
    /// Create an index.
    CreateIndex {
        id: String,
        name: String,
        #[arg(long, default_value_t = 1)]
        shards: u32,
        #[arg(long, default_value_t = 1)]
        replicas: u32,
    },
    /// Delete an index.
    DeleteIndex { id: String, name: String },
    /// Relay a raw HTTP request to a cluster.
    Request {
        id: String,
        method: String,
        path: String,
        /// JSON request body.
        #[arg(long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,joint_core=info,joint_relay=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let codec = Arc::new(AesGcmCodec::default());
    let store = match &cli.config {
        Some(path) => ConfigStore::new(path.clone(), codec),
        None => ConfigStore::open_default(codec)?,
    };
    let registry = ClusterRegistry::new(store);

    match cli.command {
        Command::List => {
            let clusters = registry.list().await?;
            if clusters.is_empty() {
                println!("no clusters registered");
            }
            for c in clusters {
                println!("{}  {}  {}", c.id, c.name, c.base_url());
            }
        }

        Command::Add {
            name,
            host,
            port,
            protocol,
            no_verify,
            username,
            password,
        } => {
            let profile = registry
                .create(ClusterProfileInput {
                    name,
                    protocol: protocol.into(),
                    host,
                    port,
                    verify: Some(!no_verify),
                    username,
                    password,
                })
                .await?;
            println!("registered {} ({})", profile.name, profile.id);
        }

        Command::Remove { id } => {
            registry.delete(&id).await?;
            println!("removed {id}");
        }

        Command::Show { id } => {
            let c = registry.get(&id).await?;
            println!("id:       {}", c.id);
            println!("name:     {}", c.name);
            println!("url:      {}", c.base_url());
            println!("verify:   {}", c.verify);
            println!("username: {}", c.username.as_deref().unwrap_or("-"));
        }

        Command::Test { id } => {
            let relay = RelayClient::new(registry)?;
            match relay.ping(&id).await {
                Ok(version) => println!("ok — server version {version}"),
                Err(ApiError::Status { status: 401 }) => {
                    anyhow::bail!("authentication failed (HTTP 401), check username/password")
                }
                Err(e) => return Err(e.into()),
            }
        }

        Command::Nodes { id } => {
            let relay = RelayClient::new(registry)?;
            for n in relay.cat_nodes(&id).await? {
                println!(
                    "{:<16} {:<12} master={} role={} cpu={}% ram={}% heap={}%",
                    n.ip, n.name, n.master, n.role, n.cpu, n.ram_percent, n.heap_percent
                );
            }
        }

        Command::Indices { id } => {
            let relay = RelayClient::new(registry)?;
            for i in relay.cat_indices(&id).await? {
                let docs = i
                    .docs_count
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:<7} {:<6} {:<32} docs={:<10} size={}",
                    i.health, i.status, i.name, docs, i.total_store
                );
            }
        }

        Command::CreateIndex {
            id,
            name,
            shards,
            replicas,
        } => {
            let relay = RelayClient::new(registry)?;
            relay.create_index(&id, &name, shards, replicas).await?;
            println!("created index {name}");
        }

        Command::DeleteIndex { id, name } => {
            let relay = RelayClient::new(registry)?;
            relay.delete_index(&id, &name).await?;
            println!("deleted index {name}");
        }

        Command::Request {
            id,
            method,
            path,
            data,
        } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .with_context(|| format!("unsupported HTTP method {method:?}"))?;
            let body: Option<serde_json::Value> = data
                .map(|d| serde_json::from_str(&d))
                .transpose()
                .context("request body is not valid JSON")?;

            let relay = RelayClient::new(registry)?;
            let envelope = relay.request(&id, method, &path, body.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}
