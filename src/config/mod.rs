// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, SchedulerConfig, ServerConfig,
    StorageBackend, StorageConfig,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment overrides look like `MISSION_SERVER__PORT=9000`
const ENV_PREFIX: &str = "MISSION";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; every key has a default and can be overridden
    /// through `MISSION_<SECTION>__<KEY>` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env_prefix(config_path, ENV_PREFIX)
    }

    fn load_with_env_prefix(
        config_path: &str,
        env_prefix: &str,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8787)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "daily-mission/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("storage.backend", "sqlite")?
            .set_default("storage.path", "data/missions.db")?
            .set_default("storage.table", "daily_misson")?
            .set_default("scheduler.enabled", true)?
            .set_default("scheduler.start_hour", 17)?
            .set_default("scheduler.end_hour", 23)?
            .set_default("scheduler.interval_minutes", 30)?
            .set_default("scheduler.utc", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
