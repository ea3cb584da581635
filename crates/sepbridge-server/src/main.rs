//! sepbridge: IEEE 2030.5 read-only bridge over stdio JSON-RPC.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};

use sepbridge_client::{ClientError, Sep2Client};
use sepbridge_server::{PromptRegistry, RpcServer};
use sepbridge_tools::ToolRegistry;

/// SEP2 bridge - expose read-only IEEE 2030.5 resources as tools.
#[derive(Parser, Debug)]
#[command(name = "sepbridge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    // JSON format for production/container environments
    let json_logging = std::env::var("SEPBRIDGE_LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries the protocol; all diagnostics go to stderr.
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Build the SEP2 client from the environment, degrading to an absent
/// client on failure. The process keeps serving either way; only the
/// advertised tool surface shrinks.
fn initialize_client() -> Option<Arc<Sep2Client>> {
    match Sep2Client::from_env() {
        Ok(client) => {
            info!(server = %client.config().base_url, "SEP2 client initialized");
            Some(Arc::new(client))
        }
        Err(e @ (ClientError::Config(_) | ClientError::CredentialRead { .. })) => {
            error!("SEP2 configuration error: {e}");
            error!("data tools will be disabled; check the SEP2_* environment variables");
            None
        }
        Err(e) => {
            error!("failed to initialize SEP2 client: {e}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let client = initialize_client();
    let registry = ToolRegistry::for_client(client);
    let server = RpcServer::new(registry, PromptRegistry::new());

    info!("sepbridge server running on stdio");
    server
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
