//! The configuration structs used to build the AppConfig, and their impls.
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::config::ConfigError;

// ###################################
// ->   STRUCTS
// ###################################
/// Controls whether internal error messages are echoed back to callers.
#[derive(AsRefStr, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,
    pub net_config: NetConfig,
    pub marketing_config: MarketingConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// Settings for the marketing-automation API.
/// `api_key` and `list_id` are optional here so the service can start without them,
/// every signup request checks that both are present.
#[derive(Deserialize, Clone, Debug)]
pub struct MarketingConfig {
    pub base_url: String,
    /// Pinned API revision, sent as the `revision` header.
    pub revision: String,
    pub api_key: Option<SecretString>,
    pub list_id: Option<String>,
}

// ###################################
// ->   IMPLs
// ###################################
impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl MarketingConfig {
    pub fn is_complete(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
            && self.list_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
