//! gfwlist - Entry point.
//!
//! Loads the configured rule list, keeps it fresh in the background, and
//! answers routing queries read from stdin, one host or URL per line:
//!
//! ```text
//! $ echo www.google.com | gfwlist
//! blocked	www.google.com
//! ```

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gfwlist::blocklist::manager::ListManager;
use gfwlist::config::{Config, SourceLocation};
use gfwlist::store::RuleSetStore;

/// Answer queries from stdin until EOF.
async fn serve_stdin(store: Arc<RuleSetStore>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = BufWriter::new(tokio::io::stdout());

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let verdict = if store.is_blocked(query) {
            "blocked"
        } else {
            "direct"
        };
        stdout
            .write_all(format!("{verdict}\t{query}\n").as_bytes())
            .await
            .context("Failed to write answer")?;
        stdout.flush().await.context("Failed to write answer")?;
    }

    Ok(())
}

async fn run() -> Result<()> {
    let config_path = std::env::var("CONFIG_PATH")
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed("config.toml"));
    let config = Config::load(config_path.as_ref()).context("Failed to load configuration")?;

    // Initialize metrics (must be done early, before any metrics are recorded)
    gfwlist::metrics::init(&config.metrics).context("Failed to initialize metrics")?;
    if config.metrics.enabled {
        info!("Metrics enabled on {}", config.metrics.listen);
    }

    match &config.source.location {
        SourceLocation::File { path } => info!("List source: file {}", path.display()),
        SourceLocation::Remote { url } => info!("List source: {url}"),
    }
    info!("Inline rules: {}", config.rules.len());

    let manager = Arc::new(ListManager::new(&config).context("Failed to create list manager")?);
    manager
        .initialize()
        .await
        .context("Failed to load rule list")?;

    let store = manager.store();
    info!("Rule list loaded with {} rules", store.len());

    let refresh_handle = config.refresh_interval().map(|interval| {
        info!("Refreshing rule list every {} seconds", interval.as_secs());
        Arc::clone(&manager).spawn_refresh_task(interval)
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down...");
        }
        result = serve_stdin(store) => {
            if let Err(err) = result {
                warn!("Query loop stopped: {err:#}");
            }
        }
    }

    if let Some(handle) = refresh_handle {
        handle.abort();
    }

    info!("Shutdown complete.");
    Ok(())
}

fn main() -> Result<()> {
    // stdout carries answers, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let result = runtime.block_on(run());
    // a pending stdin read cannot be cancelled; don't wait for it
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}
