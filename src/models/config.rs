//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Server settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HS256 key used to sign access tokens.
    pub secret: String,
    pub access_token_expire_minutes: i64,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Reads `config/default.yaml`, the `config/{APP_ENV}.yaml` profile
    /// (`local` by default) and `APP_*` environment variables, later sources
    /// overriding earlier ones.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
