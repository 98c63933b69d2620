use crate::common::redis_pool::PoolResult;
use crate::settings::AppSettings;
use async_trait::async_trait;
use discord_webhook2::webhook::DiscordWebhook;
use sqlx::{MySql, Pool};

#[async_trait]
pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<MySql>;
    async fn redis(&self) -> PoolResult;
    fn http(&self) -> &reqwest::Client;
    fn webhook(&self) -> Option<&DiscordWebhook>;
    fn settings(&self) -> &'static AppSettings;
}
