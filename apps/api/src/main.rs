mod config;
mod errors;
mod ml;
mod pdf;
mod personality;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::personality::dataset::Dataset;
use crate::personality::predictor::TraitModel;
use crate::personality::tips::missing_tip_labels;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume trait service v{}", env!("CARGO_PKG_VERSION"));

    // Dataset and model problems are fatal: nothing can be served without them.
    let dataset = Dataset::load(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset {}", config.dataset_path.display()))?;
    for (category, count) in dataset.label_counts() {
        info!("  {category}: {count} records");
    }

    let params = config.training_params();
    let model = tokio::task::spawn_blocking(move || TraitModel::train(dataset, &params))
        .await
        .context("spawn_blocking failed while training the model")??;
    info!(
        "Model ready: {} trees, vocabulary of {} terms",
        model.summary().trees,
        model.summary().vocabulary_size
    );

    let missing: Vec<&str> = missing_tip_labels().iter().map(|c| c.as_str()).collect();
    if !missing.is_empty() {
        warn!(
            "No improvement tip is keyed by these labels; predictions for them show the default tip: {}",
            missing.join(", ")
        );
    }

    let state = AppState {
        model: Arc::new(model),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
