use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::LoanApplication;
use super::LoanDecider;

/// Router builder exposing the decision and policy endpoints.
pub fn decision_router(decider: Arc<LoanDecider>) -> Router {
    Router::new()
        .route("/api/v1/loans/decisions", post(decide_handler))
        .route("/api/v1/loans/policy", get(policy_handler))
        .with_state(decider)
}

pub(crate) async fn decide_handler(
    State(decider): State<Arc<LoanDecider>>,
    Json(application): Json<LoanApplication>,
) -> Response {
    match decider.evaluate(&application) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler(State(decider): State<Arc<LoanDecider>>) -> Response {
    (StatusCode::OK, Json(decider.policy().clone())).into_response()
}
