use crate::api::session;
use crate::common::error::{AppError, ServiceResult};
use crate::common::state::AppState;
use crate::common::tokens::parse_authorization;
use crate::usecases::{api_users, oauth_tokens};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_authorization)
}

/// Resolves the api token to its [`ApiUser`](crate::models::api_users::ApiUser).
pub async fn require_api_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ServiceResult<Response> {
    let Some(token) = authorization(request.headers()) else {
        return Err(AppError::Unauthorized);
    };
    let user = api_users::fetch_by_token(&state, token).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolves a modmail bot's token to its linked GitHub credentials.
pub async fn require_oauth_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ServiceResult<Response> {
    let Some(token) = authorization(request.headers()) else {
        return Err(AppError::OAuthUserNotFound);
    };
    let token = oauth_tokens::fetch_one(&state, token).await?;
    request.extensions_mut().insert(token);
    Ok(next.run(request).await)
}

pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> ServiceResult<Response> {
    let session = session::load(&state, &jar).await?;
    if !session.logged_in {
        let login_url = format!("{}/login", state.settings.main_url());
        return Ok(Redirect::to(&login_url).into_response());
    }
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
