use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUMMARY: &str = "accommodation reservation";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    /// Used for `SUMMARY` when the request leaves it out or empty.
    pub default_summary: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            enable_swagger: true,
            port: 8080,
            default_summary: DEFAULT_SUMMARY.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_DEBUG, APP_ENABLE_SWAGGER, APP_PORT, APP_DEFAULT_SUMMARY
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("default_summary", DEFAULT_SUMMARY)?
            .build()?;

        config.try_deserialize()
    }
}
