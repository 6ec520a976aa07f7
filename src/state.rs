use crate::config::Config;
use crate::store::VendorStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: VendorStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: VendorStore::new(config.data_file.clone()),
            config: Arc::new(config),
        }
    }
}
