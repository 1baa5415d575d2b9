use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::UserStore;

/// Shared application state, constructed once at startup and handed to the
/// router. Replaces module-level singletons with an explicit context.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    pub fn new(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        Self { store, config: Arc::new(config) }
    }
}
