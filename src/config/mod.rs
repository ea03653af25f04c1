//! Configuration management
//!
//! A configuration file describes the capabilities advertised by both sides
//! of an exchange:
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [answerer]
//! types = ["audio"]
//! transport.rtp = { address = "10.0.0.1", port = 5000 }
//! payloads = [{ id = 0, name = "PCMU", clock_rate = 8000 }]
//! ```
//!
//! Values can be overridden with `MEDIASPEC__<SECTION>__<KEY>` environment
//! variables.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::media::MediaSpec;
use crate::domain::shared::Result;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "MEDIASPEC";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub answerer: MediaSpec,
    #[serde(default)]
    pub offerer: MediaSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Load a configuration file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse a TOML document, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
