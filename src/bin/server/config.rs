//! Server Configuration
//!
//! This module handles loading and managing server configuration.

use sales_api::config::ApplicationConfig;

/// Server runtime configuration derived from ApplicationConfig
///
/// This is the simplified view of the configuration the HTTP server works
/// with; the full `ApplicationConfig` stays available for wiring collaborators
/// (e.g. the token verifier).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen address in `host:port` form
    pub listen_addr: String,

    /// CSV file holding the dataset
    pub dataset_file: String,

    /// Whether the bearer-token guard is applied to query endpoints
    pub auth_enabled: bool,

    /// Whether the Prometheus metrics endpoint is exposed
    pub metrics_enabled: bool,

    /// CORS allowed origins (empty = allow all origins for development)
    pub cors_allowed_origins: Vec<String>,
}

impl From<ApplicationConfig> for ServerConfig {
    fn from(app_config: ApplicationConfig) -> Self {
        Self {
            listen_addr: app_config.listen_addr(),
            dataset_file: app_config.dataset.file,
            auth_enabled: app_config.auth.enabled,
            metrics_enabled: app_config.monitoring.metrics_enabled,
            cors_allowed_origins: app_config.server.cors_allowed_origins,
        }
    }
}

/// Load configuration from file or environment
///
/// Priority:
/// 1. `SALES_CONFIG` environment variable (path to TOML file)
/// 2. `./application.toml` in current directory
/// 3. Default configuration
///
/// Environment overrides (`CSV_FILE_NAME`, `IGNORE_AUTH_MIDDLEWARE`,
/// `SALES_HOST`, `SALES_PORT`, `RUST_LOG`) apply on top of whichever source
/// was used.
pub fn load_config_with_app() -> (ServerConfig, ApplicationConfig) {
    if let Ok(path) = std::env::var("SALES_CONFIG") {
        match ApplicationConfig::load_with_env(&path) {
            Ok(config) => {
                eprintln!("[config] Loaded configuration from: {}", path);
                return (ServerConfig::from(config.clone()), config);
            }
            Err(e) => {
                eprintln!(
                    "[config] Failed to load config from {}: {}. Trying defaults.",
                    path, e
                );
            }
        }
    }

    let app_toml_path = std::path::Path::new("application.toml");
    if app_toml_path.exists() {
        match ApplicationConfig::load_with_env("application.toml") {
            Ok(config) => {
                eprintln!("[config] Loaded configuration from application.toml");
                return (ServerConfig::from(config.clone()), config);
            }
            Err(e) => {
                eprintln!(
                    "[config] Failed to parse application.toml: {}. Using defaults.",
                    e
                );
            }
        }
    }

    eprintln!("[config] Using default configuration");
    let app_config = ApplicationConfig::from_env();
    (ServerConfig::from(app_config.clone()), app_config)
}
