//! Proxy routing for REST traffic
//!
//! Settings can be toggled at runtime through [`crate::app::AppContext`].
//! Opening a proxy validates the URL and then checks that a well-known host
//! is reachable through it.

use reqwest::{Client, ClientBuilder, Proxy};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Host probed to confirm a proxy works
pub const DEFAULT_CHECK_URL: &str = "https://www.google.com";

/// Timeout for the reachability probe
const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Proxy errors
#[derive(Debug, Error)]
pub enum ProxyError {
    /// URL could not be used as a proxy
    #[error("Invalid proxy URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Proxy enabled without a URL
    #[error("Proxy enabled but no URL configured")]
    MissingUrl,
    /// Probe request through the proxy failed
    #[error("Proxy check against {check_url} failed: {source}")]
    Unreachable {
        check_url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Runtime proxy change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyCommand {
    /// Route through the given proxy URL
    Open(String),
    /// Connect directly
    Close,
}

/// Proxy configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxySettings {
    /// Whether REST traffic goes through the proxy
    #[serde(default)]
    pub enabled: bool,
    /// Proxy URL, e.g. `http://127.0.0.1:7890`
    #[serde(default)]
    pub url: Option<String>,
    /// URL probed when a proxy is opened
    #[serde(default = "default_check_url")]
    pub check_url: String,
}

fn default_check_url() -> String {
    DEFAULT_CHECK_URL.to_string()
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            check_url: default_check_url(),
        }
    }
}

impl ProxySettings {
    /// Settings with the given proxy switched on
    pub fn enabled(url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Proxy URL in effect, if any
    pub fn active_url(&self) -> Option<&str> {
        if self.enabled {
            self.url.as_deref()
        } else {
            None
        }
    }

    /// Switch the proxy on after validating the URL
    pub fn open(&mut self, url: &str) -> Result<(), ProxyError> {
        parse_proxy(url)?;
        self.enabled = true;
        self.url = Some(url.to_string());
        Ok(())
    }

    /// Switch the proxy off
    pub fn close(&mut self) {
        self.enabled = false;
        self.url = None;
    }

    /// Apply a runtime command
    pub fn apply_command(&mut self, command: &ProxyCommand) -> Result<(), ProxyError> {
        match command {
            ProxyCommand::Open(url) => self.open(url),
            ProxyCommand::Close => {
                self.close();
                Ok(())
            }
        }
    }

    /// Add the proxy to a client builder when enabled
    pub fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, ProxyError> {
        if !self.enabled {
            return Ok(builder.no_proxy());
        }
        let url = self.url.as_deref().ok_or(ProxyError::MissingUrl)?;
        Ok(builder.proxy(parse_proxy(url)?))
    }
}

fn parse_proxy(url: &str) -> Result<Proxy, ProxyError> {
    if url.trim().is_empty() {
        return Err(ProxyError::InvalidUrl {
            url: url.to_string(),
            reason: "empty".to_string(),
        });
    }
    Proxy::all(url).map_err(|e| ProxyError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Probe `check_url` with a HEAD request through the client
pub async fn check_reachable(client: &Client, check_url: &str) -> Result<(), ProxyError> {
    client
        .head(check_url)
        .timeout(CHECK_TIMEOUT)
        .send()
        .await
        .map_err(|source| ProxyError::Unreachable {
            check_url: check_url.to_string(),
            source,
        })?;
    tracing::debug!(check_url, "Proxy check passed");
    Ok(())
}
