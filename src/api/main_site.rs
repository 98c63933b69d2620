use crate::adapters::github;
use crate::api::RequestContext;
use crate::api::guards::require_login;
use crate::api::redirects;
use crate::api::session;
use crate::common::error::ServiceResult;
use crate::common::state::AppState;
use crate::common::templates::{self, PageContext};
use crate::entities::sessions::WebSession;
use crate::usecases::{api_users, sessions};
use axum::extract::{Extension, Query};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Router, middleware};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use serde::Deserialize;
use tower_http::services::ServeDir;

const STATIC_DIR: &str = "static";
const OAUTH_SCOPE: &str = "public_repo";

pub fn router(state: &AppState) -> Router<AppState> {
    let logout_route = get(logout).route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_login,
    ));
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/logout", logout_route)
        .route("/callback", get(callback))
        .route("/logged-in", get(logged_in))
        .route("/already-logged-in", get(already_logged_in))
        .route("/{path}", get(redirects::short_redirect))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
}

async fn index(ctx: RequestContext, jar: CookieJar) -> ServiceResult<Html<String>> {
    let session = session::load(&ctx, &jar).await?;
    let html = templates::render(
        "index.html",
        context! {
            title => "Modmail",
            message => "DM to contact mods!",
            page => PageContext::new(ctx.settings, session.user),
        },
    )?;
    Ok(Html(html))
}

async fn login(ctx: RequestContext, jar: CookieJar) -> ServiceResult<Redirect> {
    let session = session::load(&ctx, &jar).await?;
    if session.logged_in {
        return Ok(Redirect::to(&ctx.settings.site_url("dashboard")));
    }
    let url = github::authorize_url(&ctx.settings.github_client_id, OAUTH_SCOPE)?;
    Ok(Redirect::to(&url))
}

async fn logout(
    ctx: RequestContext,
    jar: CookieJar,
    Extension(session): Extension<WebSession>,
) -> ServiceResult<(CookieJar, Redirect)> {
    sessions::clear(&ctx, session.session_id).await?;
    let jar = jar.remove(session::cookie(ctx.settings, session.session_id));
    let index_url = format!("{}/", ctx.settings.main_url());
    Ok((jar, Redirect::to(&index_url)))
}

#[derive(Deserialize)]
pub struct CallbackArgs {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// GitHub redirects here after the dashboard login.
async fn callback(
    ctx: RequestContext,
    jar: CookieJar,
    Query(args): Query<CallbackArgs>,
) -> ServiceResult<Response> {
    let Some(code) = args.code else {
        let error = args.error.unwrap_or_default();
        return Ok(format!("error: {error}").into_response());
    };
    let (user, token) = api_users::login(&ctx, &code).await?;

    // fresh id on every login
    let session = WebSession {
        logged_in: true,
        user: Some(user),
        token: Some(token),
        ..WebSession::new()
    };
    sessions::save(&ctx, &session).await?;

    let jar = jar.add(session::cookie(ctx.settings, session.session_id));
    let redirect = Redirect::to(&ctx.settings.site_url("dashboard"));
    Ok((jar, redirect).into_response())
}

#[derive(Deserialize)]
pub struct LoggedInArgs {
    pub username: Option<String>,
}

pub async fn logged_in(
    ctx: RequestContext,
    Query(args): Query<LoggedInArgs>,
) -> ServiceResult<Html<String>> {
    let username = args.username.as_deref().unwrap_or("there");
    let html = templates::render(
        "message.html",
        context! {
            title => format!("Hey {username}!"),
            message => "You can now go back to discord and use the <code>update</code> command.",
            page => PageContext::new(ctx.settings, None),
        },
    )?;
    Ok(Html(html))
}

pub async fn already_logged_in(ctx: RequestContext) -> ServiceResult<Html<String>> {
    let html = templates::render(
        "message.html",
        context! {
            title => "Already Logged In!",
            message => "Please use the <code>github logout</code> command and logout first.",
            page => PageContext::new(ctx.settings, None),
        },
    )?;
    Ok(Html(html))
}
