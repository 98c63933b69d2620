use crate::api::RequestContext;
use crate::api::guards::require_api_token;
use crate::common::error::ServiceResponse;
use crate::common::state::AppState;
use crate::entities::logs::{LogDocument, MessageDocument};
use crate::models::api_users::ApiUser;
use crate::models::logs::{CloseLogArgs, CreateLogArgs, CreatedLog};
use crate::usecases::logs;
use axum::extract::{Extension, Path};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/logs", post(create))
        .route("/logs/{key}", get(fetch))
        .route("/logs/{key}/messages", post(append_message))
        .route("/logs/{key}/close", post(close))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_token,
        ))
}

async fn create(
    ctx: RequestContext,
    Extension(owner): Extension<ApiUser>,
    Json(args): Json<CreateLogArgs>,
) -> ServiceResponse<CreatedLog> {
    let created = logs::create(&ctx, &owner, args).await?;
    Ok(Json(created))
}

async fn fetch(
    ctx: RequestContext,
    Extension(owner): Extension<ApiUser>,
    Path(key): Path<String>,
) -> ServiceResponse<LogDocument> {
    let document = logs::fetch_document(&ctx, &owner, &key).await?;
    Ok(Json(document))
}

async fn append_message(
    ctx: RequestContext,
    Extension(owner): Extension<ApiUser>,
    Path(key): Path<String>,
    Json(message): Json<MessageDocument>,
) -> ServiceResponse<Value> {
    logs::append_message(&ctx, &owner, &key, message).await?;
    Ok(Json(json!({ "success": true })))
}

async fn close(
    ctx: RequestContext,
    Extension(owner): Extension<ApiUser>,
    Path(key): Path<String>,
    Json(args): Json<CloseLogArgs>,
) -> ServiceResponse<Value> {
    logs::close(&ctx, &owner, &key, args).await?;
    Ok(Json(json!({ "success": true })))
}
