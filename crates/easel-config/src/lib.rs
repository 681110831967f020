#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod platform;

use serde::Deserialize;

pub use platform::PlatformConfig;

/// Top-level Easel configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Platform connection
    pub platform: PlatformConfig,
}
