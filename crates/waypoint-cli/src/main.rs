//! waypoint CLI
//!
//! Command-line tool for resolving paths against a route table.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use waypoint::{Params, Router};

/// Resolve URL paths against a declared route table.
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route table: a JSON array of `{"pattern": ..., "action": ...}`.
    #[arg(short, long, env = "WAYPOINT_ROUTES", default_value = "routes.json")]
    routes: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path and print the matched route as JSON.
    Resolve {
        /// Path to resolve.
        path: String,

        /// Query string, e.g. `?page=2`.
        #[arg(short, long)]
        query: Option<String>,
    },

    /// List declared routes in match order.
    List,

    /// Build a path for a declared pattern.
    UrlFor {
        /// Pattern exactly as declared.
        pattern: String,

        /// Parameters as `name=value`.
        params: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let router = load_routes(&cli.routes)?;

    match cli.command {
        Commands::Resolve { path, query } => {
            println!("{}", resolve(&router, &path, query.as_deref())?);
        }
        Commands::List => {
            for line in list(&router) {
                println!("{line}");
            }
        }
        Commands::UrlFor { pattern, params } => {
            let params = parse_params(&params)?;
            println!("{}", router.path_for(&pattern, &params)?);
        }
    }

    Ok(())
}

/// Loads and compiles a route table file.
fn load_routes(path: &Path) -> anyhow::Result<Router<Value>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read route table {}", path.display()))?;
    let table: Value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse route table {}", path.display()))?;

    let mut router = Router::new();
    router
        .init_from_value(&table)
        .with_context(|| format!("invalid route table {}", path.display()))?;

    info!(
        routes = router.routes().count(),
        "loaded route table from {}",
        path.display()
    );
    Ok(router)
}

/// Resolves a path and renders the result as pretty JSON.
fn resolve(router: &Router<Value>, path: &str, query: Option<&str>) -> anyhow::Result<String> {
    let route = router.find_matching_route(path, query)?;
    debug!(pattern = route.pattern, "resolved {path}");
    Ok(serde_json::to_string_pretty(&route)?)
}

/// Describes each declared route: pattern, matcher and parameter names.
fn list(router: &Router<Value>) -> Vec<String> {
    router
        .captures()
        .enumerate()
        .map(|(i, capture)| {
            format!(
                "{i}\t{}\t{}\t[{}]",
                capture.pattern(),
                capture.matcher(),
                capture.param_names().join(", ")
            )
        })
        .collect()
}

/// Parses `name=value` arguments.
fn parse_params(args: &[String]) -> anyhow::Result<Params> {
    let mut params = Params::new();
    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("expected name=value, got '{arg}'");
        };
        if name.is_empty() {
            bail!("parameter name is empty in '{arg}'");
        }
        params.insert(name, value);
    }
    Ok(params)
}
