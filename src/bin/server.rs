//! permgraph REST server
//!
//! Run with: cargo run --features server --bin permgraph-server
//!
//! Endpoints:
//!   GET  /health            - Health check
//!   GET  /tree              - Permission catalog
//!   GET  /labels/:id        - Label for a permission id
//!   POST /selection/toggle  - Toggle an id in a selection
//!   POST /selection/rows    - Tree view rows for a selection
//!   POST /selection/graph   - Graph view for a selection
//!
//! Environment is read through `Config::from_env` (PORT, PERMGRAPH_API_URL, ...);
//! `--port` overrides PORT.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use permgraph::{catalog, server, Config};

#[derive(Debug, Parser)]
#[command(name = "permgraph-server", version, about = "Permission tree engine for the admin panel")]
struct Args {
    /// Listen address
    #[arg(long, env = "PERMGRAPH_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Listen port [default: PORT, else 3000]
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,permgraph=debug")))
        .init();

    let args = Args::parse();
    let cfg = Config::from_env()?;
    let port = args.port.unwrap_or(cfg.port);
    tracing::debug!(api_url = %cfg.api_url, token = cfg.api_token.is_some(), "loaded configuration");

    let tree = catalog();
    for (leaf, missing) in tree.dangling_dependencies() {
        tracing::warn!(leaf, missing, "dependency points outside the catalog");
    }

    let addr = format!("{}:{}", args.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, version = env!("CARGO_PKG_VERSION"), leaves = tree.leaf_ids().len(), "permgraph-server listening");
    axum::serve(listener, server::router(tree)).await?;
    Ok(())
}
