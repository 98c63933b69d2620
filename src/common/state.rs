use crate::common::context::Context;
use crate::common::redis_pool::{PoolResult, RedisPool};
use crate::settings::AppSettings;
use async_trait::async_trait;
use discord_webhook2::webhook::DiscordWebhook;
use sqlx::{MySql, Pool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<MySql>,
    pub redis: RedisPool,
    pub http: reqwest::Client,
    pub webhook: Option<Arc<DiscordWebhook>>,
    pub settings: &'static AppSettings,
}

#[async_trait]
impl Context for AppState {
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
