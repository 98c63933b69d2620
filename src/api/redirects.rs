use crate::common::error::{AppError, ServiceResult};
use crate::common::state::AppState;
use axum::Router;
use axum::extract::Path;
use axum::response::Redirect;
use axum::routing::get;

const REDIRECTS: [(&str, &str); 3] = [
    ("github", "https://github.com/kyb3r"),
    ("discord", "https://discord.gg/etJNHCQ"),
    ("source", "https://github.com/kyb3r/webserver"),
];

pub fn resolve(path: &str) -> Option<&'static str> {
    REDIRECTS
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, url)| *url)
}

pub async fn short_redirect(Path(path): Path<String>) -> ServiceResult<Redirect> {
    match resolve(&path) {
        Some(url) => Ok(Redirect::to(url)),
        None => Err(AppError::RedirectsNotFound),
    }
}

pub fn repo_router() -> Router<AppState> {
    Router::new().route("/{repo}", get(repo))
}

async fn repo(Path(repo): Path<String>) -> Redirect {
    Redirect::to(&format!("https://github.com/{repo}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_short_links() {
        assert_eq!(resolve("discord"), Some("https://discord.gg/etJNHCQ"));
        assert_eq!(resolve("source"), Some("https://github.com/kyb3r/webserver"));
        assert_eq!(resolve("GitHub"), None);
        assert_eq!(resolve("login"), None);
    }
}
