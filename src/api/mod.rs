use crate::adapters::discord;
use crate::common::context::Context;
use crate::common::error::ErrorReport;
use crate::common::init;
use crate::common::redis_pool::{PoolResult, RedisPool};
use crate::common::state::AppState;
use crate::settings::AppSettings;
use async_trait::async_trait;
use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::Response;
use discord_webhook2::webhook::DiscordWebhook;
use sqlx::{MySql, Pool};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api_site;
pub mod dashboard;
pub mod guards;
pub mod hooks;
pub mod logs;
pub mod logs_api;
pub mod main_site;
pub mod modmail;
pub mod redirects;
pub mod session;
pub mod sites;

pub struct RequestContext {
    pub db: Pool<MySql>,
    pub redis: RedisPool,
    pub http: reqwest::Client,
    pub webhook: Option<Arc<DiscordWebhook>>,
    pub settings: &'static AppSettings,
}

impl From<&AppState> for RequestContext {
    fn from(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            redis: state.redis.clone(),
            http: state.http.clone(),
            webhook: state.webhook.clone(),
            settings: state.settings,
        }
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from(state))
    }
}

#[async_trait]
impl Context for RequestContext {
    fn db(&self) -> &Pool<MySql> {
        &self.db
    }

    async fn redis(&self) -> PoolResult {
        self.redis.get().await
    }

    fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn webhook(&self) -> Option<&DiscordWebhook> {
        self.webhook.as_deref()
    }

    fn settings(&self) -> &'static AppSettings {
        self.settings
    }
}

/// Every site of the service. In development the sites are mounted under path
/// prefixes of one server, otherwise they are picked by the request's host.
pub fn router(state: AppState) -> Router {
    let sites = sites::Sites::new(&state);
    let app = match state.settings.development {
        true => sites.nested(),
        false => sites.by_host(),
    };
    app.layer(middleware::from_fn_with_state(state, report_errors))
        .layer(TraceLayer::new_for_http())
}

/// Forwards unexpected failures to the operator channel without holding up
/// the response.
async fn report_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    if let Some(ErrorReport(detail)) = response.extensions().get::<ErrorReport>().cloned() {
        tokio::spawn(async move {
            let url = uri.to_string();
            let _ = discord::server_error(state.webhook(), method.as_str(), &url, &detail).await;
        });
    }
    response
}

pub async fn serve(settings: &'static AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let app = router(state.clone());

    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, development = settings.development, "Serving modmail-web");
    let _ = discord::server_started(state.webhook(), &settings.domain).await;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    let _ = discord::server_stopped(state.webhook(), &settings.domain).await;
    Ok(())
}

async fn shutdown_signal() {
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };
    tokio::select! {
        _ = signal::ctrl_c() => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
