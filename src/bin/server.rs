//! Car price prediction server.
//!
//! Loads the serialized regression artifact once at startup and serves
//! predictions over HTTP. A failed model load does not abort the
//! process: the service stays up and answers 503 until restarted with
//! a working artifact.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=models/model.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Bind port (default: 8080)
//! - `MODEL_PATH` - Serialized model artifact (default: models/model.json)
//! - `CURRENT_YEAR` - Reference year for age derivation (default: 2025)

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Result;
use carprice::application::ml::{PriceEstimator, SmartCoreEstimator};
use carprice::application::prediction_service::PredictionService;
use carprice::config::Config;
use carprice::interfaces::http;
use tracing::{Level, error, info};
use tracing_subscriber::prelude::*;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Car Price API {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: ModelPath={:?}, CurrentYear={}",
        config.model_path, config.current_year
    );

    // One load attempt, before any traffic. No retry, no hot-reload.
    let estimator: Option<Arc<dyn PriceEstimator>> =
        match SmartCoreEstimator::load(&config.model_path) {
            Ok(estimator) => {
                info!(
                    "Model ready: {} ({})",
                    estimator.name(),
                    estimator.version()
                );
                Some(Arc::new(estimator))
            }
            Err(e) => {
                error!("Failed to load model from {:?}: {:#}", config.model_path, e);
                error!("Serving in NOT READY state; /predict will return 503.");
                None
            }
        };

    let state = web::Data::new(http::AppState {
        service: PredictionService::new(estimator, config.current_year),
    });

    let bind_address = format!("{}:{}", config.host, config.port);
    info!("Server listening on http://{}", bind_address);
    info!("Endpoints:");
    info!("   GET  /health    - Liveness check");
    info!("   GET  /ready     - Model readiness");
    info!("   GET  /metadata  - Model description");
    info!("   POST /predict   - Price prediction");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(http::json_config())
            .configure(http::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
