use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::failure::FailureCollector;
use crate::schema::DEFAULT_DELIMITED_SUFFIX;

/// Remote file tree the connector talks to (`[endpoint]` in config.toml).
///
/// Immutable once a connector is built from it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Base URL of the tree server, e.g. `http://localhost:3000/`.
    pub base_url: String,
    /// Path requested by the connectivity test; browsing `/` is redirected here.
    #[serde(default = "default_end_point")]
    pub end_point: String,
    /// Attach an `Authorization` header to every request.
    #[serde(default)]
    pub auth_enabled: bool,
    /// Authorization scheme, e.g. `Bearer`.
    #[serde(default)]
    pub auth_scheme: Option<String>,
    /// Credential sent after the scheme. Never logged.
    #[serde(default)]
    pub credential: Option<String>,
}

fn default_end_point() -> String {
    "/".to_string()
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            end_point: default_end_point(),
            auth_enabled: false,
            auth_scheme: None,
            credential: None,
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("end_point", &self.end_point)
            .field("auth_enabled", &self.auth_enabled)
            .field("auth_scheme", &self.auth_scheme)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Endpoint {
    /// Endpoint without auth for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Same endpoint with auth enabled.
    pub fn with_auth(mut self, scheme: impl Into<String>, credential: impl Into<String>) -> Self {
        self.auth_enabled = true;
        self.auth_scheme = Some(scheme.into());
        self.credential = Some(credential.into());
        self
    }

    /// Value of the `Authorization` header, if auth is enabled.
    pub fn authorization(&self) -> Option<String> {
        if !self.auth_enabled {
            return None;
        }
        Some(format!(
            "{} {}",
            self.auth_scheme.as_deref().unwrap_or_default(),
            self.credential.as_deref().unwrap_or_default()
        ))
    }

    /// Checks the fields needed before any request is attempted.
    pub fn validate(&self, collector: &mut FailureCollector) {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            collector.add_failure("Base URL is required.", Some("Enter a base URL."));
        } else {
            match url::Url::parse(base_url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => collector.add_failure(
                    format!("Unsupported URL scheme '{}'.", parsed.scheme()),
                    Some("Use an http:// or https:// base URL."),
                ),
                Err(e) => collector.add_failure(
                    format!("Invalid base URL: {}", e),
                    Some("Check BaseUrl."),
                ),
            }
        }

        if self.auth_enabled {
            if is_blank(self.auth_scheme.as_deref()) {
                collector.add_failure(
                    "Authorization type is required when auth is enabled.",
                    Some("Enter an auth type, e.g. Bearer."),
                );
            }
            if is_blank(self.credential.as_deref()) {
                collector.add_failure(
                    "API key is required when auth is enabled.",
                    Some("Enter an API key."),
                );
            }
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Transport settings (optional `[transport]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Follow HTTP redirects.
    pub follow_redirects: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            follow_redirects: true,
        }
    }
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sampling settings (optional `[sampling]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Upper bound on records returned by one sample call.
    pub max_sample_records: usize,
    /// File suffix that marks a delimited (CSV-like) file.
    pub delimited_suffix: String,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_sample_records: crate::sample::DEFAULT_SAMPLE_CAP,
            delimited_suffix: DEFAULT_DELIMITED_SUFFIX.to_string(),
        }
    }
}

/// Retry policy parameters (optional `[retry]` section). When absent the
/// transport makes exactly one attempt per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/treesource/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreesourceConfig {
    pub endpoint: Endpoint,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("treesource")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TreesourceConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TreesourceConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TreesourceConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
