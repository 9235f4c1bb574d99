//! route-trie: match request paths against a route table.
//!
//! ```text
//! route-trie --config routes.toml match /browse/JRA-1 "/issues?filter=10001"
//! route-trie --config routes.toml inspect
//! route-trie --config routes.toml watch < paths.txt
//! ```
//!
//! `match` and `watch` print one JSON document per request path (`null` when
//! nothing matches). Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use route_trie::config::{load_config, ConfigWatcher};
use route_trie::observability::logging::init_logging;
use route_trie::routing::{RouteSnapshot, RouteTable};
use route_trie::QueryParams;

#[derive(Parser)]
#[command(name = "route-trie")]
#[command(about = "Match request paths against a trie-indexed route table", long_about = None)]
struct Cli {
    /// Route table configuration (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Override the configured base path.
    #[arg(long)]
    base_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match one or more request paths (each may carry a `?query`)
    Match {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print every route with the trie key it is stored under
    Inspect,
    /// Match paths read from stdin while hot-reloading the config file
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    tracing::info!(
        config = ?cli.config,
        routes = config.routes.len(),
        base_path = ?config.base_path,
        "Configuration loaded"
    );

    let table = Arc::new(RouteTable::from_config(&config));

    match cli.command {
        Commands::Match { paths } => {
            let snapshot = table.snapshot();
            for path in &paths {
                println!("{}", lookup(&snapshot, cli.base_path.as_deref(), path)?);
            }
        }
        Commands::Inspect => {
            let snapshot = table.snapshot();
            for (key, route) in snapshot.trie.entries() {
                let key: Vec<String> = key.iter().map(ToString::to_string).collect();
                println!("/{:<40} {} ({})", key.join("/"), route.label(), route.path);
            }
        }
        Commands::Watch => {
            let poll_interval = Duration::from_secs(config.watch.poll_interval_secs);
            let (watcher, updates) = ConfigWatcher::new(&cli.config, poll_interval);
            let _watcher = watcher.run()?;

            let reloader = Arc::clone(&table);
            tokio::spawn(async move {
                reloader.apply_updates(updates).await;
            });

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        let Some(line) = line? else { break };
                        let path = line.trim();
                        if path.is_empty() {
                            continue;
                        }
                        println!("{}", lookup(&table.snapshot(), cli.base_path.as_deref(), path)?);
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Match one `path[?query]` argument and render the result as JSON.
fn lookup(
    snapshot: &RouteSnapshot,
    base_path_override: Option<&str>,
    target: &str,
) -> Result<String, serde_json::Error> {
    let (pathname, query) = match target.split_once('?') {
        Some((pathname, query)) => (pathname, Some(QueryParams::from_query_str(query))),
        None => (target, None),
    };
    let base_path = base_path_override.or(snapshot.base_path.as_deref());

    let found = snapshot.trie.match_route(pathname, query.as_ref(), base_path);
    serde_json::to_string(&found)
}
