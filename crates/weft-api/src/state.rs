use std::sync::Arc;

use crate::config::Config;
use weft_engine::Engine;
use weft_store::ThreadStore;

/// Shared application state passed to all handlers. Everything is behind
/// an `Arc` so requests share one store and one engine.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ThreadStore>,
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ThreadStore>, engine: Engine) -> Self {
        Self {
            config: Arc::new(config),
            store,
            engine: Arc::new(engine),
        }
    }
}
