use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::LoanApplication;
use super::DecisionEngine;

/// Router builder exposing the eligibility prediction endpoint.
pub fn decision_router(engine: Arc<DecisionEngine>) -> Router {
    Router::new()
        .route("/api/v1/loans/predict", post(predict_handler))
        .with_state(engine)
}

/// Validates the application at the construction boundary, maps a missing
/// model to 503, and otherwise returns the complete decision.
pub(crate) async fn predict_handler(
    State(engine): State<Arc<DecisionEngine>>,
    axum::Json(application): axum::Json<LoanApplication>,
) -> Response {
    if !engine.is_ready() {
        let payload = json!({
            "error": "eligibility model is not loaded",
        });
        return (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response();
    }

    if let Err(error) = application.validate() {
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let decision = engine.decide(&application);
    (StatusCode::OK, axum::Json(decision)).into_response()
}
