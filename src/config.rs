//! Runtime configuration
//!
//! Read from the environment:
//!   PERMGRAPH_API_URL       - role store / user directory base URL
//!   PERMGRAPH_API_TOKEN     - bearer token sent with every store request
//!   PERMGRAPH_TIMEOUT_SECS  - optional per-request timeout
//!   PORT                    - listen port for permgraph-server

use std::time::Duration;

use reqwest::Url;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Always ends with '/', so relative joins keep the base path
    pub api_url: Url,
    pub api_token: Option<String>,
    pub timeout: Option<Duration>,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: base_url(DEFAULT_API_URL).expect("default url parses"),
            api_token: None,
            timeout: None,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary key lookup; missing keys fall back to defaults
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(get: F) -> Result<Self> {
        let mut cfg = Config::default();
        if let Some(url) = get("PERMGRAPH_API_URL") {
            cfg.api_url = base_url(&url)?;
        }
        cfg.api_token = get("PERMGRAPH_API_TOKEN").filter(|t| !t.is_empty());
        if let Some(secs) = get("PERMGRAPH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| Error::Config(format!("PERMGRAPH_TIMEOUT_SECS must be an integer, got '{secs}'")))?;
            cfg.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(port) = get("PORT") {
            cfg.port = port.parse().map_err(|_| Error::Config(format!("PORT must be a port number, got '{port}'")))?;
        }
        Ok(cfg)
    }
}

/// Parse a base URL, appending the trailing slash `Url::join` needs
pub fn base_url(raw: &str) -> Result<Url> {
    let raw = if raw.ends_with('/') { raw.to_string() } else { format!("{raw}/") };
    let url = Url::parse(&raw).map_err(|e| Error::Config(format!("invalid API url '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!("unsupported scheme '{other}'"))),
    }
}
