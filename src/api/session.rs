use crate::common::context::Context;
use crate::common::error::ServiceResult;
use crate::entities::sessions::WebSession;
use crate::settings::AppSettings;
use crate::usecases::sessions;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub async fn load<C: Context>(ctx: &C, jar: &CookieJar) -> ServiceResult<WebSession> {
    sessions::load(ctx, session_id(jar)).await
}

/// Shared by every subdomain outside of development.
pub fn cookie(settings: &AppSettings, session_id: Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    if !settings.development {
        cookie.set_domain(settings.domain.clone());
        cookie.set_secure(true);
    }
    cookie
}
