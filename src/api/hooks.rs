use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::common::signatures::SIGNATURE_HEADER;
use crate::usecases::deploys;
use axum::Json;
use axum::body::Bytes;
use axum::http::HeaderMap;
use serde_json::{Value, json};

/// GitHub push webhook: pull and restart the server.
pub async fn github_push(
    ctx: RequestContext,
    headers: HeaderMap,
    body: Bytes,
) -> ServiceResponse<Value> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    deploys::verify_push(&ctx, &body, signature)?;
    deploys::spawn_restart(ctx);
    Ok(Json(json!({ "success": true })))
}
