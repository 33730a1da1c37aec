use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use dialens_core::config::{path_from_env_value, session_ttl_from_env_value};
use dialens_core::constants::{
    DEFAULT_COMBINED_MODEL_PATH, DEFAULT_LIFESTYLE_MODEL_PATH, DEFAULT_MAP_DATA_PATH,
};
use dialens_core::{CoreConfig, Models};

/// Main entry point for the DiaLens application
///
/// Loads both classification models once, then serves the REST API
/// (default 0.0.0.0:3000). The service refuses to start if either model
/// artifact is missing or invalid.
///
/// # Environment Variables
/// - `DIALENS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DIALENS_LIFESTYLE_MODEL`: lifestyle-only model artifact
///   (default: "models/lifestyle_model.json")
/// - `DIALENS_COMBINED_MODEL`: lifestyle + lab model artifact
///   (default: "models/combined_model.json")
/// - `DIALENS_MAP_DATA`: world diabetes dataset (default: "data/diabetes_world_data.csv")
/// - `DIALENS_SESSION_TTL_SECS`: idle seconds before a session is discarded (default: 1800)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration or session ttl is invalid,
/// - either model artifact cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dialens_run=info".parse()?)
                .add_directive("dialens_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("DIALENS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::new(
        path_from_env_value(
            std::env::var("DIALENS_LIFESTYLE_MODEL").ok(),
            DEFAULT_LIFESTYLE_MODEL_PATH,
        ),
        path_from_env_value(
            std::env::var("DIALENS_COMBINED_MODEL").ok(),
            DEFAULT_COMBINED_MODEL_PATH,
        ),
        path_from_env_value(std::env::var("DIALENS_MAP_DATA").ok(), DEFAULT_MAP_DATA_PATH),
    )?
    .with_session_ttl(session_ttl_from_env_value(
        std::env::var("DIALENS_SESSION_TTL_SECS").ok(),
    )?)?);

    let models = match Models::load(&cfg) {
        Ok(models) => Arc::new(models),
        Err(e) => {
            tracing::error!("failed to load models, refusing to start: {}", e);
            return Err(e.into());
        }
    };

    if !cfg.map_data_path().is_file() {
        tracing::warn!(
            "map data not found at {}; results will omit the world map",
            cfg.map_data_path().display()
        );
    }

    let state = AppState::new(cfg.clone(), models);

    // Periodically drop idle sessions.
    let sessions = state.sessions.clone();
    let mut sweep = tokio::time::interval(cfg.session_ttl());
    tokio::spawn(async move {
        loop {
            sweep.tick().await;
            let expired = sessions.sweep();
            if expired > 0 {
                tracing::info!("discarded {} idle sessions", expired);
            }
        }
    });

    let app = api_rest::router(state);

    tracing::info!("++ Starting DiaLens REST on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
