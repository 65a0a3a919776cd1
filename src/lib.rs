// Library exports for binary tools and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use config::Config;
use store::OfferStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OfferStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn OfferStore>, config: Config) -> Self {
        Self { store, config: Arc::new(config) }
    }
}
