use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use log::error;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::{
    AppState, Result, ServeErr,
    predict::{IrisFeatures, PredictionResult, predict},
};

#[derive(Debug, Serialize)]
struct Status {
    message: &'static str,
    model_loaded: bool,
    target_names: Vec<String>,
}

/// Builds the application router over `state`. Any origin may call it.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/ui", get(ui_handler))
        .route("/predict", post(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root_handler(State(state): State<AppState>) -> Json<Status> {
    let target_names = state
        .model
        .as_ref()
        .map(|context| context.target_names.clone())
        .unwrap_or_default();

    Json(Status {
        message: "Iris Classifier API is running.",
        model_loaded: state.model.is_some(),
        target_names,
    })
}

async fn ui_handler(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.ui_path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("failed to read {}: {e}", state.ui_path.display());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>UI file not found</h1>"),
            )
                .into_response()
        }
    }
}

async fn predict_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<IrisFeatures>, JsonRejection>,
) -> Result<Json<PredictionResult>> {
    let Json(features) = payload.map_err(|e| ServeErr::InvalidInput(e.body_text()))?;
    predict(state.model.as_deref(), &features).map(Json)
}
