//! Econ Estimation Server
//!
//! REST API server for project economics estimation.

use clap::Parser;
use econ_server::config::{build_config, CliArgs as ConfigCliArgs};
use econ_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Econ Estimation Server - REST API for effort, financial and risk analysis
#[derive(Parser, Debug)]
#[command(name = "econ_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "ECON_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "ECON_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ECON_LOG_LEVEL")]
    log_level: Option<String>,

    /// Largest Monte Carlo iteration count accepted per request
    #[arg(long, env = "ECON_MC_MAX_ITERATIONS")]
    mc_max_iterations: Option<usize>,

    /// Seed for Monte Carlo requests that do not carry one
    #[arg(long, env = "ECON_MC_SEED")]
    mc_seed: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl From<&Args> for ConfigCliArgs {
    fn from(args: &Args) -> Self {
        ConfigCliArgs {
            config_file: args.config.clone(),
            host: args.host.clone(),
            port: args.port,
            log_level: args.log_level.clone(),
            monte_carlo_max_iterations: args.mc_max_iterations,
            monte_carlo_seed: args.mc_seed,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = build_config(&ConfigCliArgs::from(&args))?;

    init_tracing(config.log_level.as_filter_str(), args.json_logs);

    tracing::info!("Econ Estimation Server v{}", econ_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        monte_carlo_max_iterations = config.monte_carlo_max_iterations,
        monte_carlo_seed = ?config.monte_carlo_seed,
        "Server configuration loaded"
    );

    let server = Server::new(config);
    tracing::info!(address = %server.config().socket_addr(), "Starting server");

    server.run().await?;

    Ok(())
}
