//! SPA route server
//!
//! Serves the application's route table over HTTP and exposes it on the
//! command line.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser request            ┌──────────────────────────────────────────────┐
//!     ───────────────────────────┼─▶ http server ──▶ routing table ──▶ matcher  │
//!                                │                        │                     │
//!                                │                        ▼                     │
//!     View shell / redirect      │                   Resolution                 │
//!     ◀──────────────────────────┼── response ◀──────────┘                      │
//!                                │                                              │
//!                                │  config · observability · lifecycle          │
//!                                └──────────────────────────────────────────────┘
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use spa_router::config::{load_config, AppConfig};
use spa_router::lifecycle::{startup, Shutdown};
use spa_router::observability::logging;
use spa_router::routing::{Location, RouteTable, RouteTarget, RouterMode};

#[derive(Parser)]
#[command(name = "spa-router")]
#[command(about = "Route table server for the single-page front end", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the route table over HTTP (default)
    Serve,
    /// Print the route table
    Routes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a URL or path against the route table
    Resolve {
        url: String,
        /// Read the route from the URL fragment
        #[arg(long)]
        hash: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = read_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            logging::init_logging(&config.observability);
            tracing::info!("spa-router v{} starting", env!("CARGO_PKG_VERSION"));
            tracing::info!(
                bind_address = %config.listener.bind_address,
                request_timeout_secs = config.timeouts.request_secs,
                "Configuration loaded"
            );

            let shutdown = Shutdown::new();
            startup::run(config, shutdown.subscribe()).await?;
            tracing::info!("Shutdown complete");
        }
        Commands::Routes { json } => {
            let table = RouteTable::with_options(config.routing.match_options());
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for route in table.routes() {
                    println!(
                        "{:<10} {:<10} {}",
                        route.name().unwrap_or("-"),
                        route.path.to_string(),
                        describe_target(&route.target)
                    );
                }
            }
        }
        Commands::Resolve { url, hash } => {
            let mode = if hash { RouterMode::Hash } else { config.routing.mode };
            let table = RouteTable::with_options(config.routing.match_options());
            let location = Location::parse(&url, mode)?;
            let resolution = table.resolve(&location);
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
    }

    Ok(())
}

fn read_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(AppConfig::default()),
    }
}

fn describe_target(target: &RouteTarget) -> String {
    match target {
        RouteTarget::View(view) => view.to_string(),
        RouteTarget::Redirect(to) => format!("redirect → {}", to),
    }
}
