pub mod barcode;
pub mod config;
pub mod db;
pub mod jobs;
pub mod models;
pub mod presentation;
pub mod scan;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding shell (desktop UI or a test harness).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} core starting v{}", config::APP_NAME, config::APP_VERSION);
}
