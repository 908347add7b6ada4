//! List manager with hot-reload support.
//!
//! The manager fetches the configured list, decodes and parses it off the
//! async runtime, and installs the result into the shared [`RuleSetStore`]
//! without interrupting queries.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::decode::{DecodeError, ListEncoding, decode};
use super::loader::{FileLoader, LoadError};
use super::remote::{RemoteLoadError, RemoteLoader};
use crate::config::{Config, SourceLocation};
use crate::metrics::RELOADS_TOTAL;
use crate::rules::RuleParser;
use crate::store::RuleSetStore;

/// Error type for list manager operations.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// Failed to load the list from a file.
    #[error("failed to load file list")]
    FileLoad(#[from] LoadError),

    /// Failed to load the list from a remote URL.
    #[error("failed to load remote list")]
    RemoteLoad(#[from] RemoteLoadError),

    /// The payload could not be decoded.
    #[error("failed to decode list")]
    Decode(#[from] DecodeError),

    /// The parsing task panicked or was cancelled.
    #[error("list parsing task failed")]
    Join(#[from] tokio::task::JoinError),
}

/// Keeps the active rule set in sync with the configured list source.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use gfwlist::blocklist::manager::ListManager;
/// use gfwlist::config::Config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::load("config.toml")?;
/// let manager = Arc::new(ListManager::new(&config)?);
/// manager.initialize().await?;
///
/// let store = manager.store();
/// println!("blocked: {}", store.is_blocked("www.example.com"));
///
/// let _refresh = Arc::clone(&manager).spawn_refresh_task(Duration::from_secs(3600));
/// # Ok(())
/// # }
/// ```
pub struct ListManager {
    /// Active rule set, shared with query handlers.
    store: Arc<RuleSetStore>,

    source: Source,

    encoding: ListEncoding,

    /// Inline rules from config, applied after the list.
    inline_rules: Vec<String>,
}

/// Configured list location with the loader it needs.
enum Source {
    File(PathBuf),
    Remote { url: String, loader: RemoteLoader },
}

impl ListManager {
    /// Cache file name of the remote list.
    const CACHE_NAME: &'static str = "gfwlist";

    /// Create a new list manager from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote loader cannot be created (only when
    /// the source is remote).
    pub fn new(config: &Config) -> Result<Self, ManagerError> {
        Self::with_cache_dir(config, config.cache_dir())
    }

    /// Create a new list manager with a custom cache directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote loader cannot be created.
    pub fn with_cache_dir(config: &Config, cache_dir: PathBuf) -> Result<Self, ManagerError> {
        let source = match &config.source.location {
            SourceLocation::File { path } => Source::File(path.clone()),
            SourceLocation::Remote { url } => Source::Remote {
                url: url.clone(),
                loader: RemoteLoader::with_timeout(cache_dir, config.request_timeout())?,
            },
        };

        Ok(Self {
            store: Arc::new(RuleSetStore::default()),
            source,
            encoding: config.source.encoding,
            inline_rules: config.rules.clone(),
        })
    }

    /// Get a shared reference to the rule set store.
    #[must_use]
    pub fn store(&self) -> Arc<RuleSetStore> {
        Arc::clone(&self.store)
    }

    /// Load the list for the first time.
    ///
    /// # Errors
    ///
    /// Returns the error of the first load. The store keeps its empty rule
    /// set in that case, which blocks nothing.
    pub async fn initialize(&self) -> Result<(), ManagerError> {
        self.refresh().await
    }

    /// Fetch, decode and parse the list, then install it.
    ///
    /// On failure the active rule set is left untouched.
    pub async fn refresh(&self) -> Result<(), ManagerError> {
        match self.reload().await {
            Ok(count) => {
                metrics::counter!(RELOADS_TOTAL, "result" => "ok").increment(1);
                tracing::info!(rules = count, "refreshed rule list");
                Ok(())
            }
            Err(err) => {
                metrics::counter!(RELOADS_TOTAL, "result" => "error").increment(1);
                tracing::warn!(error = ?err, "failed to refresh rule list");
                Err(err)
            }
        }
    }

    async fn reload(&self) -> Result<usize, ManagerError> {
        let payload = self.fetch().await?;
        let encoding = self.encoding;
        let inline_rules = self.inline_rules.clone();

        let rules = tokio::task::spawn_blocking(move || {
            let text = decode(&payload, encoding)?;
            let mut parser = RuleParser::new();
            parser.feed(&text);
            for rule in &inline_rules {
                parser.feed_line(rule);
            }
            Ok::<_, DecodeError>(parser.finish())
        })
        .await??;

        let count = rules.len();
        self.store.replace(rules);
        Ok(count)
    }

    /// Read the raw payload from the configured source.
    async fn fetch(&self) -> Result<Vec<u8>, ManagerError> {
        match &self.source {
            Source::File(path) => {
                tracing::debug!(path = ?path, "loading file list");
                Ok(FileLoader::load(path).await?)
            }
            Source::Remote { url, loader } => {
                tracing::debug!(url = %url, "loading remote list");
                Ok(loader.load_cached(Self::CACHE_NAME, url).await?)
            }
        }
    }

    /// Refresh the list every `interval` until the task is aborted.
    ///
    /// The first refresh happens one full interval after the call. Failures
    /// are logged and the previous rule set stays active.
    pub fn spawn_refresh_task(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                // errors are already logged by refresh
                let _ = self.refresh().await;
            }
        })
    }
}
