use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use finchart::models::response::NormalizedResponse;
use serde_json::Value;
use tracing::info;

async fn handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<NormalizedResponse>, ApiError> {
    let Json(body) = body?;
    let response = state.analyst.reply_to_value(body).await?;

    info!(
        has_tool_use = response.has_tool_use,
        chart = response.chart_data.is_some(),
        "finance reply ready"
    );
    Ok(Json(response))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/finance", post(handler))
        .with_state(state)
}
