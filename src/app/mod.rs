use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    config::{AppConfig, Environment, MarketingConfig},
    signup::MarketingCredentials,
    web::{self, WebResult},
    MarketingClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let marketing_client = MarketingClient::new(
            &config.marketing_config.base_url,
            config.marketing_config.revision.clone(),
        )?;

        let app_state = AppState::new(
            marketing_client,
            config.marketing_config,
            config.environment,
        );

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

pub struct InternalState {
    pub marketing_client: MarketingClient,
    pub marketing_config: MarketingConfig,
    pub environment: Environment,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(
        marketing_client: MarketingClient,
        marketing_config: MarketingConfig,
        environment: Environment,
    ) -> Self {
        AppState(Arc::new(InternalState {
            marketing_client,
            marketing_config,
            environment,
        }))
    }
}

impl InternalState {
    /// The API key and list id, or a configuration error naming the missing value.
    /// The name only goes to the logs, callers get a generic message.
    pub fn credentials(&self) -> WebResult<MarketingCredentials> {
        let Some(api_key) = self
            .marketing_config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().is_empty())
        else {
            error!("{:<20} - marketing API key is not configured", "credentials");
            return Err(web::Error::ConfigMissing("api_key"));
        };
        let Some(list_id) = self
            .marketing_config
            .list_id
            .clone()
            .filter(|id| !id.is_empty())
        else {
            error!("{:<20} - marketing list id is not configured", "credentials");
            return Err(web::Error::ConfigMissing("list_id"));
        };

        Ok(MarketingCredentials { api_key, list_id })
    }
}
