use crate::api::RequestContext;
use crate::api::guards::require_login;
use crate::common::error::{AppError, ServiceResult};
use crate::common::state::AppState;
use crate::common::templates::{self, PageContext};
use crate::entities::sessions::WebSession;
use crate::usecases::api_users;
use axum::extract::Extension;
use axum::response::Html;
use axum::routing::get;
use axum::{Router, middleware};
use minijinja::context;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login))
}

async fn index(
    ctx: RequestContext,
    Extension(session): Extension<WebSession>,
) -> ServiceResult<Html<String>> {
    let Some(user) = session.user else {
        return Err(AppError::Unauthorized);
    };
    let dashboard = api_users::fetch_dashboard(&ctx, user.id).await?;
    let html = templates::render(
        "dashboard.html",
        context! {
            title => "Hey there!",
            token => dashboard.token,
            has_starred => dashboard.has_starred,
            page => PageContext::new(ctx.settings, Some(user)),
        },
    )?;
    Ok(Html(html))
}
