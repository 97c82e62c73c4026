// Application state module
// Shared, process-scoped collaborators handed to every request and timer tick

use std::sync::Arc;

use super::types::Config;
use crate::store::MissionStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn MissionStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn MissionStore>) -> Self {
        Self { config, store }
    }
}
