//! Builds the `AppConfig` from config files layered with environment variables.
//! The config is loaded once at startup and handed to `App::build_from_config`,
//! nothing reads the process environment after that.

mod error;
mod types;

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, Environment, MarketingConfig, NetConfig};

/// Env vars with this prefix override file values, nested keys are split on `__`.
/// e.g. `APP_MARKETING_CONFIG__API_KEY`
pub const ENV_PREFIX: &str = "APP_";
pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

impl AppConfig {
    /// Loads `config/base.toml`, then `config/{environment}.toml`, then the `APP_` env vars.
    /// The environment is taken from `APP_ENVIRONMENT` and defaults to `local`.
    pub fn load() -> ConfigResult<Self> {
        let base_path = std::env::current_dir()?;
        let environment: Environment = std::env::var(ENVIRONMENT_VAR)
            .unwrap_or_else(|_| "local".into())
            .try_into()?;

        Self::load_from_dir(base_path.join("config"), environment)
    }

    pub fn load_from_dir(
        config_dir: impl AsRef<Path>,
        environment: Environment,
    ) -> ConfigResult<Self> {
        info!(
            "{:<20} - Initializing the configuration for: {}",
            "load_config",
            environment.as_ref()
        );
        let config_dir = config_dir.as_ref();
        let environment_filename = format!("{}.toml", environment.as_ref());

        let config = Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["ENVIRONMENT"]).split("__"))
            .merge(("environment", environment))
            .extract::<AppConfig>()
            .map_err(Box::new)?;

        if !config.marketing_config.is_complete() {
            tracing::warn!(
                "{:<20} - Marketing API key or list id is not configured, signups will fail",
                "load_config"
            );
        }

        Ok(config)
    }
}
