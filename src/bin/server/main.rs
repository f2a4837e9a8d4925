//! Sales API HTTP Server
//!
//! This binary serves the read-only sales query API over a dataset loaded
//! once at startup.
//!
//! # Endpoints
//!
//! ## Query (bearer token required unless auth is disabled)
//! - `GET /sales-by-employee` - Sales for one employee within a date range
//! - `GET /sales-by-product` - Sales for one product within a date range
//! - `GET /sales-by-store` - Sales for one store within a date range
//! - `GET /statistics-by-employee` - Mean and total sales for one employee
//! - `GET /statistics-by-product` - Mean and total sales for one product
//! - `GET /statistics-by-store` - Mean and total sales for one store
//!
//! ## Public
//! - `GET /` - Service banner
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics
//!
//! # CLI Commands
//!
//! - `start` - Start the HTTP server (default if no command specified)
//! - `check-config` - Validate configuration file
//!
//! # Configuration
//!
//! The server reads configuration from:
//! 1. `SALES_CONFIG` environment variable (path to TOML file)
//! 2. `./application.toml` in current directory
//! 3. Default configuration
//!
//! with `CSV_FILE_NAME`, `IGNORE_AUTH_MIDDLEWARE`, `SALES_HOST`,
//! `SALES_PORT` and `RUST_LOG` environment overrides on top.

mod auth;
mod config;
mod handlers;
mod types;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use config::load_config_with_app;
use handlers::AppState;
use sales_api::auth::{StaticTokenVerifier, TokenVerifier};
use sales_api::Dataset;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

// =============================================================================
// Router and Server Setup
// =============================================================================

/// Build CORS layer from configuration
fn build_cors_layer(cors_origins: &[String]) -> CorsLayer {
    if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    }
}

/// Build the application router
///
/// The bearer guard is layered onto the query routes only; `/`, `/health`
/// and `/metrics` stay public. With auth disabled the guard is simply not
/// composed.
fn build_router(state: Arc<AppState>) -> Router {
    let mut public = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));
    if state.config.metrics_enabled {
        public = public.route("/metrics", get(handlers::metrics_text));
    }

    let mut protected = Router::new()
        .route("/sales-by-employee", get(handlers::sales_by_employee))
        .route("/sales-by-product", get(handlers::sales_by_product))
        .route("/sales-by-store", get(handlers::sales_by_store))
        .route(
            "/statistics-by-employee",
            get(handlers::statistics_by_employee),
        )
        .route(
            "/statistics-by-product",
            get(handlers::statistics_by_product),
        )
        .route("/statistics-by-store", get(handlers::statistics_by_store));

    if state.config.auth_enabled {
        protected = protected.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));
    } else {
        warn!("Auth guard disabled - query endpoints are open");
    }

    public
        .merge(protected)
        .with_state(state.clone())
        .layer(build_cors_layer(&state.config.cors_allowed_origins))
}

/// Graceful shutdown signal handler
///
/// Handles signal registration failures by logging a warning and waiting
/// indefinitely (the server must then be killed forcefully) instead of
/// panicking during startup.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                warn!(
                    error = %e,
                    "Ctrl+C handler installation failed - graceful shutdown unavailable"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "SIGTERM handler installation failed - SIGTERM shutdown unavailable"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

// =============================================================================
// CLI Definition
// =============================================================================

/// Sales API - read-only HTTP query service over a sales dataset
#[derive(Parser)]
#[command(name = "sales-server")]
#[command(version)]
#[command(about = "Read-only sales query API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file (overrides SALES_CONFIG env var)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Override listen address (e.g., 0.0.0.0:8000)
    #[arg(short, long, global = true)]
    listen: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Start,

    /// Validate configuration file without starting the server
    CheckConfig,
}

// =============================================================================
// CLI Command Handlers
// =============================================================================

/// Validate configuration and print summary
fn cmd_check_config() -> Result<(), Box<dyn std::error::Error>> {
    let (config, app_config) = load_config_with_app();
    app_config.validate()?;

    println!("Configuration is valid!");
    println!();
    println!("Server Settings:");
    println!("  Listen address: {}", config.listen_addr);
    println!("  Dataset file: {}", config.dataset_file);
    println!();
    println!("Auth:");
    println!("  Enabled: {}", config.auth_enabled);
    println!();
    println!("Monitoring:");
    println!("  Metrics enabled: {}", config.metrics_enabled);
    println!("  Log level: {}", app_config.monitoring.log_level);

    Ok(())
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Apply config path override if specified via CLI
    if let Some(config_path) = &cli.config {
        std::env::set_var("SALES_CONFIG", config_path);
    }

    if let Some(Commands::CheckConfig) = &cli.command {
        return cmd_check_config();
    }

    let (mut config, app_config) = load_config_with_app();

    // Apply CLI override for the listen address
    if let Some(listen) = &cli.listen {
        config.listen_addr = listen.clone();
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_config.monitoring.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Sales API Server v{}", env!("CARGO_PKG_VERSION"));
    app_config.validate()?;

    // Load the dataset exactly once; any failure here is fatal and the
    // server never starts serving.
    let dataset = match Dataset::load_csv(&config.dataset_file) {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            error!(file = %config.dataset_file, error = %e, "Failed to load dataset");
            return Err(e.into());
        }
    };

    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(StaticTokenVerifier::from_config(&app_config.auth));

    let state = Arc::new(AppState {
        dataset,
        config: config.clone(),
        verifier,
    });

    let app = build_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
