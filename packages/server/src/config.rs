use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. `"*"` allows any origin.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// mysql://, postgres:// or sqlite:// URL.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// Create missing tables from the entity definitions on startup.
    pub sync_schema: bool,
    /// Upper bound on ids bound into a single `IN (...)` lookup.
    pub max_bind_params: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InspectionConfig {
    /// Assets written per transaction.
    pub chunk_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub inspection: InspectionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("TECSIM_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("server.cors.allow_origins", vec!["*"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout_secs", 8)?
            .set_default("database.sync_schema", false)?
            .set_default("database.max_bind_params", 1000)?
            .set_default("inspection.chunk_size", 10)?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., TECSIM__DATABASE__URL)
            .add_source(Environment::with_prefix("TECSIM").separator("__"))
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;
        config.inspection.chunk_size = config.inspection.chunk_size.max(1);
        config.database.max_bind_params = config.database.max_bind_params.max(1);
        Ok(config)
    }
}
