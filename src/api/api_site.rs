use crate::api::{hooks, logs_api, modmail};
use crate::common::state::AppState;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/hooks/github", post(hooks::github_push))
        .route("/webhooks/github", post(hooks::github_push))
        .nest("/modmail", modmail::router(state))
        .merge(logs_api::router(state))
}

async fn index() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "hello there, this api doesnt do anything lmao",
    }))
}
