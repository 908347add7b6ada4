//! Configuration loading and validation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::blocklist::decode::ListEncoding;
use crate::blocklist::remote::{DEFAULT_TIMEOUT_SECS, default_cache_dir};
use crate::error::{ConfigError, Result, ValidationError};

/// Main configuration for the gfwlist routing oracle.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the rule list comes from.
    pub source: SourceConfig,

    /// Extra rules, in list syntax, applied after the downloaded list.
    #[serde(default)]
    pub rules: Vec<String>,

    /// Seconds between list refreshes. No periodic refresh when unset.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,

    /// Timeout for fetching a remote list.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Directory where remote lists are cached for offline fallback.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// A rule list source.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSourceConfig")]
pub struct SourceConfig {
    pub location: SourceLocation,

    /// Encoding of the payload.
    pub encoding: ListEncoding,
}

/// Where a list payload is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Local file.
    File { path: PathBuf },
    /// HTTP(S) URL.
    Remote { url: String },
}

/// `[source]` table as written in the config file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSourceConfig {
    #[serde(rename = "type")]
    kind: SourceKind,
    path: Option<PathBuf>,
    url: Option<String>,
    #[serde(default)]
    encoding: ListEncoding,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum SourceKind {
    File,
    Remote,
}

impl TryFrom<RawSourceConfig> for SourceConfig {
    type Error = String;

    fn try_from(raw: RawSourceConfig) -> std::result::Result<Self, Self::Error> {
        let location = match (raw.kind, raw.path, raw.url) {
            (SourceKind::File, Some(path), None) => SourceLocation::File { path },
            (SourceKind::File, _, Some(_)) => {
                return Err("`url` is not allowed for a file source".into());
            }
            (SourceKind::File, None, None) => return Err("missing field `path`".into()),
            (SourceKind::Remote, None, Some(url)) => SourceLocation::Remote { url },
            (SourceKind::Remote, Some(_), _) => {
                return Err("`path` is not allowed for a remote source".into());
            }
            (SourceKind::Remote, None, None) => return Err("missing field `url`".into()),
        };

        Ok(Self {
            location,
            encoding: raw.encoding,
        })
    }
}

/// Metrics exporter settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Expose a Prometheus endpoint.
    #[serde(default)]
    pub enabled: bool,

    /// Address the Prometheus endpoint listens on.
    #[serde(default = "default_metrics_listen")]
    pub listen: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen: default_metrics_listen(),
        }
    }
}

const fn default_request_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_metrics_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9090))
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate().map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Cache directory, falling back to the platform default.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration.
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.refresh_interval_secs == Some(0) {
            return Err(ValidationError::ZeroRefreshInterval);
        }

        if self.request_timeout_secs == 0 {
            return Err(ValidationError::ZeroRequestTimeout);
        }

        if self.rules.iter().any(|rule| rule.trim().is_empty()) {
            return Err(ValidationError::EmptyRule);
        }

        match &self.source.location {
            SourceLocation::File { path } if path.as_os_str().is_empty() => {
                Err(ValidationError::EmptySourcePath)
            }
            SourceLocation::Remote { url } if url.is_empty() => {
                Err(ValidationError::EmptySourceUrl)
            }
            SourceLocation::Remote { url }
                if !url.starts_with("http://") && !url.starts_with("https://") =>
            {
                Err(ValidationError::InvalidSourceUrl { url: url.clone() })
            }
            _ => Ok(()),
        }
    }
}
