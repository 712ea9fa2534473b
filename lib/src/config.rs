//! Runtime settings.
//!
//! Layered with `figment`: built-in defaults, then `immo.toml` in the working
//! directory (optional), then `IMMO_*` environment variables.
//!
//! ```toml
//! geo_table = "data/zipcode-belgium.csv"
//! model = "models/immo-v1.json"
//! log_filter = "immo_estimator=debug,info"
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::StartupError;

pub const CONFIG_FILE: &str = "immo.toml";
pub const ENV_PREFIX: &str = "IMMO_";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Semicolon-separated postal code table with a `Geo Point` column.
    pub geo_table: PathBuf,
    /// Pretrained model artifact (`.json` or bincode).
    pub model: PathBuf,
    /// Schema descriptor JSON. The built-in `immo-v1` schema is used when unset.
    #[serde(default)]
    pub schema: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geo_table: PathBuf::from("data/zipcode-belgium.csv"),
            model: PathBuf::from("models/immo-v1.json"),
            schema: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from the default file and environment.
    pub fn load() -> Result<Self, StartupError> {
        Self::from_figment(Self::figment(CONFIG_FILE))
    }

    /// Provider stack with a custom config file path.
    pub fn figment(config_file: &str) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, StartupError> {
        Ok(figment.extract()?)
    }
}
