use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Connection settings for the agent platform
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// API origin requests are joined against, e.g. `https://api.example.com`
    pub base_url: Url,
    /// Bearer credential; unset or empty means unauthenticated
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl PlatformConfig {
    /// Credential to attach to requests
    ///
    /// Empty strings count as unset so a `default("")` placeholder reads
    /// as no credential.
    pub fn credential(&self) -> Option<SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .cloned()
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is not HTTP(S) or the timeout
    /// is zero
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(format!(
                "platform.base_url must be http or https, got `{}`",
                self.base_url.scheme()
            ));
        }
        if self.timeout_secs == 0 {
            return Err("platform.timeout_secs must be greater than 0".to_owned());
        }
        Ok(())
    }

    /// Append the trailing slash `Url::join` needs to keep the whole path
    pub(crate) fn normalize(&mut self) {
        if !self.base_url.path().ends_with('/') {
            let path = format!("{}/", self.base_url.path());
            self.base_url.set_path(&path);
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}
