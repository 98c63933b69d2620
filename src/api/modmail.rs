use crate::api::RequestContext;
use crate::api::guards::require_oauth_token;
use crate::api::main_site::{already_logged_in, logged_in};
use crate::common::error::{AppError, ServiceResponse, ServiceResult};
use crate::common::state::AppState;
use crate::entities::oauth_tokens::OAuthToken;
use crate::models::instances::ModmailInfo;
use crate::usecases::{instances, oauth_tokens};
use axum::body::Bytes;
use axum::extract::{Extension, Query};
use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router, middleware};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Value, json};

pub fn router(state: &AppState) -> Router<AppState> {
    let github = Router::new()
        .route("/github/userinfo", get(userinfo))
        .route("/github/logout", get(logout))
        .route("/github/update-repository", get(update_repository))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_oauth_token,
        ));
    Router::new()
        .route("/", get(info).post(heartbeat))
        .route("/github/callback", get(callback))
        .route("/logged-in", get(logged_in))
        .route("/already-logged-in", get(already_logged_in))
        .merge(github)
}

async fn info(ctx: RequestContext) -> ServiceResponse<ModmailInfo> {
    let info = instances::fetch_info(&ctx).await?;
    Ok(Json(info))
}

async fn heartbeat(ctx: RequestContext, body: Bytes) -> ServiceResponse<Value> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| AppError::ModmailInvalidPayload)?;
    instances::upsert(&ctx, payload).await?;
    Ok(Json(json!({ "success": "true" })))
}

#[derive(Deserialize)]
pub struct GithubCallbackArgs {
    pub code: String,
    pub token: String,
}

async fn callback(
    ctx: RequestContext,
    Query(args): Query<GithubCallbackArgs>,
) -> ServiceResult<Redirect> {
    let base_url = format!("{}/modmail", ctx.settings.site_url("api"));
    match oauth_tokens::link(&ctx, &args.code, &args.token).await? {
        Some(user) => {
            let url = Url::parse_with_params(
                &format!("{base_url}/logged-in"),
                &[("username", user.login.as_str())],
            )?;
            Ok(Redirect::to(url.as_str()))
        }
        None => Ok(Redirect::to(&format!("{base_url}/already-logged-in"))),
    }
}

async fn userinfo(
    ctx: RequestContext,
    Extension(token): Extension<OAuthToken>,
) -> ServiceResponse<Value> {
    let profile = oauth_tokens::fetch_profile(&ctx, &token).await?;
    Ok(Json(json!({
        "error": false,
        "message": "User data retrieved.",
        "user": profile,
    })))
}

async fn logout(
    ctx: RequestContext,
    Extension(token): Extension<OAuthToken>,
) -> ServiceResponse<Value> {
    oauth_tokens::unlink(&ctx, &token).await?;
    Ok(Json(json!({ "error": false, "message": "User logged out." })))
}

async fn update_repository(
    ctx: RequestContext,
    Extension(token): Extension<OAuthToken>,
) -> ServiceResponse<Value> {
    let (profile, data) = oauth_tokens::update_repository(&ctx, &token).await?;
    Ok(Json(json!({
        "error": false,
        "message": "Updated modmail.",
        "user": profile,
        "data": data,
    })))
}
