use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl Config {
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat variables `PORT`, `ACCESS_TOKEN_SECRET`, `DATABASE_URL`
    /// 2. Nested variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, ...)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::builder(&run_mode)?
            .set_override_option("server.http_port", env::var("PORT").ok())?
            .set_override_option("jwt.secret", env::var("ACCESS_TOKEN_SECRET").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder(run_mode: &str) -> Result<Builder, ConfigError> {
        Ok(Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__").try_parsing(true)))
    }

    fn defaults() -> Result<Builder, ConfigError> {
        ConfigBuilder::builder()
            .set_default("server.http_port", Self::DEFAULT_HTTP_PORT)?
            .set_default("jwt.expiration_hours", Self::DEFAULT_EXPIRATION_HOURS)?
            .set_default("database.max_connections", Self::DEFAULT_MAX_CONNECTIONS)
    }
}
