//! Rentdesk - rental fleet administration core
//!
//! Domain core for a vehicle-rental admin dashboard: record models, a
//! subscribable record store, rental pricing/billing arithmetic and the
//! cross-collection lifecycle rules that keep vehicles, rentals and bills
//! consistent. The presentation layer and the hosted identity provider are
//! external collaborators and plug in through [`AppState`].

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all consumers of the core
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire up all services against the given record store
    pub fn new(config: AppConfig, store: store::SharedStore) -> Self {
        let services = services::Services::new(store, &config);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

/// Initialize tracing for an embedding shell.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &config::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("rentdesk={}", config.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
