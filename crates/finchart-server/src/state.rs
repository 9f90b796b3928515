use std::sync::Arc;

use finchart::analyst::Analyst;

/// Shared application state. The analyst, and the provider client inside it,
/// is built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub analyst: Arc<Analyst>,
}

impl AppState {
    pub fn new(analyst: Analyst) -> Self {
        Self {
            analyst: Arc::new(analyst),
        }
    }
}
