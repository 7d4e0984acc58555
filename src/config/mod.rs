// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AiConfig, AppConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("COMPUTE").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Tokio-Hyper/1.0")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("routes.compute_path", "/compute")?
            .set_default("routes.health_path", "/healthz")?
            .set_default("routes.health_enabled", true)?
            .set_default("app.official_email", "ops@example.com")?
            // Fallback key used when GEMINI_API_KEY is unset; empty means
            // the service runs without credentials and AI requests will 503.
            .set_default("ai.api_key", "")?
            .set_default(
                "ai.models",
                vec![
                    "gemini-2.0-flash".to_string(),
                    "gemini-2.0-flash-lite".to_string(),
                    "gemini-1.5-flash".to_string(),
                ],
            )?
            .set_default(
                "ai.endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("ai.request_timeout_secs", 20)?;

        // The conventional variable name for the service wins over the file
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            builder = builder.set_override("ai.api_key", key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load configuration from the default "config.toml"
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_file() {
        let cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.routes.compute_path, "/compute");
        assert_eq!(cfg.routes.health_path, "/healthz");
        assert_eq!(cfg.ai.models.len(), 3);
        assert!(cfg.http.max_body_size > 0);
    }

    #[test]
    fn test_socket_addr_from_defaults() {
        let cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        let addr = cfg.get_socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8080);
    }
}
