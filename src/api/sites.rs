use crate::api::{api_site, dashboard, logs, main_site, redirects};
use crate::common::state::AppState;
use axum::Router;
use axum::extract::Request;
use axum::http::header::HOST;
use axum::response::IntoResponse;
use tower::ServiceExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Site {
    Main,
    Logs,
    Api,
    Dashboard,
    Repo,
}

impl Site {
    /// Picks the site from a `Host` header value, ignoring any port.
    pub fn resolve(host: &str) -> Self {
        let host = host.split(':').next().unwrap_or(host);
        match host.split_once('.') {
            Some(("logs", _)) => Site::Logs,
            Some(("api", _)) => Site::Api,
            Some(("dashboard", _)) => Site::Dashboard,
            Some(("repo", _)) => Site::Repo,
            _ => Site::Main,
        }
    }

    /// Mount point in development mode.
    pub const fn prefix(self) -> &'static str {
        match self {
            Site::Main => "/",
            Site::Logs => "/logs",
            Site::Api => "/api",
            Site::Dashboard => "/dashboard",
            Site::Repo => "/repo",
        }
    }
}

#[derive(Clone)]
pub struct Sites {
    main: Router,
    logs: Router,
    api: Router,
    dashboard: Router,
    repo: Router,
}

impl Sites {
    pub fn new(state: &AppState) -> Self {
        Self {
            main: main_site::router(state).with_state(state.clone()),
            logs: logs::router().with_state(state.clone()),
            api: api_site::router(state).with_state(state.clone()),
            dashboard: dashboard::router(state).with_state(state.clone()),
            repo: redirects::repo_router().with_state(state.clone()),
        }
    }

    fn get(&self, site: Site) -> &Router {
        match site {
            Site::Main => &self.main,
            Site::Logs => &self.logs,
            Site::Api => &self.api,
            Site::Dashboard => &self.dashboard,
            Site::Repo => &self.repo,
        }
    }

    pub fn nested(self) -> Router {
        Router::new()
            .nest(Site::Logs.prefix(), self.logs)
            .nest(Site::Api.prefix(), self.api)
            .nest(Site::Dashboard.prefix(), self.dashboard)
            .nest(Site::Repo.prefix(), self.repo)
            .merge(self.main)
    }

    pub fn by_host(self) -> Router {
        Router::new().fallback(move |request: Request| async move {
            let site = request
                .headers()
                .get(HOST)
                .and_then(|host| host.to_str().ok())
                .or_else(|| request.uri().host())
                .map(Site::resolve)
                .unwrap_or(Site::Main);
            self.get(site)
                .clone()
                .oneshot(request)
                .await
                .into_response()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_subdomains() {
        assert_eq!(Site::resolve("logs.modmail.tk"), Site::Logs);
        assert_eq!(Site::resolve("api.modmail.tk"), Site::Api);
        assert_eq!(Site::resolve("dashboard.modmail.tk"), Site::Dashboard);
        assert_eq!(Site::resolve("repo.modmail.tk"), Site::Repo);
        assert_eq!(Site::resolve("modmail.tk"), Site::Main);
        assert_eq!(Site::resolve("www.modmail.tk"), Site::Main);
    }

    #[test]
    fn ignores_ports() {
        assert_eq!(Site::resolve("logs.modmail.tk:8000"), Site::Logs);
        assert_eq!(Site::resolve("localhost:8000"), Site::Main);
    }
}
