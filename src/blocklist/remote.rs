//! Remote URL list loader.
//!
//! This module provides functionality to fetch list payloads from remote URLs
//! with caching support for offline fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent header value for HTTP requests.
const USER_AGENT: &str = concat!("gfwlist/", env!("CARGO_PKG_VERSION"));

/// Error type for remote list loading operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteLoadError {
    /// HTTP request failed with a non-success status code.
    #[error("HTTP request failed for {url}: status {status}")]
    HttpStatus {
        /// URL that was requested.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// Network error during HTTP request.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// URL that was requested.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Timeout fetching the remote URL.
    #[error("timeout fetching {url}")]
    Timeout {
        /// URL that timed out.
        url: String,
    },

    /// Cache not available for fallback.
    #[error("cache not available: {0:?}")]
    CacheUnavailable(PathBuf),

    /// I/O error during cache operations.
    #[error("cache I/O error for {path:?}: {source}")]
    CacheIo {
        /// Path to the cache file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create HTTP client.
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Fetches list payloads from remote URLs.
pub struct RemoteLoader {
    client: Client,
    cache_dir: PathBuf,
}

impl RemoteLoader {
    /// Create a new remote loader with the specified cache directory and the
    /// default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(cache_dir: PathBuf) -> Result<Self, RemoteLoadError> {
        Self::with_timeout(cache_dir, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new remote loader with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_timeout(cache_dir: PathBuf, timeout: Duration) -> Result<Self, RemoteLoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(RemoteLoadError::ClientBuild)?;

        Ok(Self { client, cache_dir })
    }

    /// Fetch the raw payload at `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteLoadError`] if:
    /// - The HTTP request fails ([`RemoteLoadError::Network`])
    /// - The server returns a non-success status ([`RemoteLoadError::HttpStatus`])
    /// - The request times out ([`RemoteLoadError::Timeout`])
    pub async fn load(&self, url: &str) -> Result<Vec<u8>, RemoteLoadError> {
        let fetch_error = |err: reqwest::Error| {
            if err.is_timeout() {
                RemoteLoadError::Timeout {
                    url: url.to_string(),
                }
            } else {
                RemoteLoadError::Network {
                    url: url.to_string(),
                    source: err,
                }
            }
        };

        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        if !response.status().is_success() {
            return Err(RemoteLoadError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await.map_err(fetch_error)?;
        tracing::debug!(url = %url, bytes = body.len(), "fetched remote list");
        Ok(body.to_vec())
    }

    /// Fetch the payload at `url`, falling back to the cached copy.
    ///
    /// A successful fetch refreshes the cache file for `name`. When the fetch
    /// fails, the last cached payload is returned instead.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteLoadError`] if both the remote fetch and cache
    /// fallback fail.
    pub async fn load_cached(&self, name: &str, url: &str) -> Result<Vec<u8>, RemoteLoadError> {
        let cache_path = self.cache_path(name);

        match self.load(url).await {
            Ok(payload) => {
                // Best effort: a cache write failure doesn't fail the load
                if let Err(err) = self.save_cache(&cache_path, &payload).await {
                    tracing::warn!(
                        path = ?cache_path,
                        error = ?err,
                        "failed to save list to cache"
                    );
                }
                Ok(payload)
            }
            Err(err) => {
                tracing::warn!(
                    url = %url,
                    error = ?err,
                    "failed to fetch remote list, trying cache"
                );
                self.load_from_cache(&cache_path).await
            }
        }
    }

    /// Save content to the cache file.
    async fn save_cache(&self, cache_path: &Path, content: &[u8]) -> Result<(), RemoteLoadError> {
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| RemoteLoadError::CacheIo {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
        }

        let cache_io = |err| RemoteLoadError::CacheIo {
            path: cache_path.to_path_buf(),
            source: err,
        };

        let mut file = File::create(cache_path).await.map_err(cache_io)?;
        file.write_all(content).await.map_err(cache_io)?;
        file.flush().await.map_err(cache_io)?;

        tracing::debug!(path = ?cache_path, "saved list to cache");
        Ok(())
    }

    /// Load content from the cache file.
    async fn load_from_cache(&self, cache_path: &Path) -> Result<Vec<u8>, RemoteLoadError> {
        let payload = fs::read(cache_path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RemoteLoadError::CacheUnavailable(cache_path.to_path_buf())
            } else {
                RemoteLoadError::CacheIo {
                    path: cache_path.to_path_buf(),
                    source: err,
                }
            }
        })?;

        tracing::info!(path = ?cache_path, "loaded list from cache");
        Ok(payload)
    }

    /// Get the cache file path for a list name.
    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{name}.cache"))
    }
}

/// Returns the default cache directory for lists.
///
/// - Linux: `~/.cache/gfwlist/lists/`
/// - macOS: `~/Library/Caches/gfwlist/lists/`
/// - Windows: `{FOLDERID_LocalAppData}\gfwlist\lists\`
///
/// Falls back to `./cache/lists` if the cache directory cannot be determined.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().map_or_else(
        || PathBuf::from("./cache/lists"),
        |p| p.join("gfwlist").join("lists"),
    )
}
