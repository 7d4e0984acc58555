// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub routes: RoutesConfig,
    pub app: AppConfig,
    pub ai: AiConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Path of the multiplexed compute endpoint
    pub compute_path: String,
    /// Liveness probe path
    pub health_path: String,
    /// Enable the liveness probe endpoint
    pub health_enabled: bool,
}

/// Application identity configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Contact address echoed on every response envelope
    pub official_email: String,
}

/// External model service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// API key for the generative-language service.
    /// `GEMINI_API_KEY` in the environment overrides this; the configured
    /// value is the fallback when the variable is unset.
    pub api_key: String,
    /// Model identifiers tried in order until one answers
    pub models: Vec<String>,
    /// Base URL of the generative-language REST API
    pub endpoint: String,
    /// Timeout applied to each individual model attempt, in seconds
    pub request_timeout_secs: u64,
}
