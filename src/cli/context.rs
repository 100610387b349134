//! Command execution context
//!
//! Loads configuration, then builds and authenticates the API client once per run.

use log::{debug, info};

use crate::client::{EndorApi, EndorClient};
use crate::config::Config;
use crate::error::Result;

/// Everything a run needs after startup.
pub struct CommandContext {
    /// Authenticated API client
    pub client: EndorClient,
    /// Namespace the queries run in
    pub namespace: String,
}

impl CommandContext {
    /// Load config from `config_path` (or the default location), overlay the
    /// environment and exchange the credential for a session token.
    ///
    /// # Errors
    /// Missing credentials or namespace, or a failed token exchange.
    pub async fn new(config_path: Option<&str>) -> Result<Self> {
        let mut config = Config::load_at(config_path)?;
        config.apply_env();

        let credential = config.credential()?;
        let namespace = config.require_namespace()?.to_string();

        let client = EndorClient::new(config.api_host())?;
        debug!("Using API at {}", client.base_url());

        let token = client.authenticate(&credential).await?;
        client.set_token(token).await;
        info!("Authenticated; working in namespace {}", namespace);

        Ok(Self {
            client,
            namespace,
        })
    }
}
