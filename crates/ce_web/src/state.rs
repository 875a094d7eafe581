use ce_core::ArticleStore;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}
