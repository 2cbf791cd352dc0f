use std::sync::Arc;

use crate::config::Config;
use crate::personality::predictor::TraitModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Fitted once at startup; read-only afterwards, so no locking.
    pub model: Arc<TraitModel>,
    pub config: Config,
}
