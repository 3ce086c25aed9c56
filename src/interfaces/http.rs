use actix_web::{HttpResponse, Responder, error::InternalError, web};
use serde::Serialize;
use tracing::error;

use crate::application::prediction_service::PredictionService;
use crate::domain::car::CarDescription;
use crate::domain::errors::PredictionError;

/// Shared per-process state. Built once at startup; request handlers
/// only ever read it.
pub struct AppState {
    pub service: PredictionService,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ErrorBody {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ReadyBody {
    model_loaded: bool,
}

#[derive(Debug, Serialize)]
struct PredictionBody {
    predicted_price_gbp: f64,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthBody { status: "healthy" })
}

async fn ready(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ReadyBody {
        model_loaded: state.service.is_ready(),
    })
}

async fn metadata(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.service.metadata())
}

async fn predict(state: web::Data<AppState>, payload: web::Json<CarDescription>) -> HttpResponse {
    let car = payload.into_inner().normalized();

    if let Err(e) = car.validate() {
        error!("Validation failed: {}", e);
        return HttpResponse::UnprocessableEntity().json(ErrorBody::new(e.to_string()));
    }

    match state.service.predict_price(&car) {
        Ok(price) => HttpResponse::Ok().json(PredictionBody {
            predicted_price_gbp: price,
        }),
        Err(e @ PredictionError::ModelUnavailable) => {
            error!("Prediction attempted but model is not loaded");
            HttpResponse::ServiceUnavailable().json(ErrorBody::new(e.to_string()))
        }
        Err(e @ PredictionError::Failed { .. }) => {
            error!("{}", e);
            HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string()))
        }
    }
}

/// JSON extractor config returning a structured 400 body instead of
/// actix's plain-text default. The serde message names the offending
/// field ("missing field `Mileage`", unknown field, type error).
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/ready", web::get().to(ready))
        .route("/metadata", web::get().to(metadata))
        .route("/predict", web::post().to(predict));
}
