use crate::common::env::FromEnv;
use std::env;
use std::net::IpAddr;
use std::ops::Deref;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::Level;

const DEFAULT_RESTART_COMMAND: &str = "git pull && pm2 restart webserver";

pub struct AppSettings {
    pub level: Level,
    pub app_host: IpAddr,
    pub app_port: u16,
    pub development: bool,
    pub domain: String,
    pub password: String,

    pub database_url: String,
    pub db_max_connections: usize,
    pub db_wait_timeout: Duration,

    pub redis_url: String,
    pub redis_max_connections: usize,
    pub redis_connection_timeout: Duration,
    pub redis_response_timeout: Duration,
    pub redis_wait_timeout: Duration,

    pub http_timeout: Duration,
    pub session_ttl: Duration,

    pub github_client_id: String,
    pub github_secret: String,
    pub modmail_github_client_id: String,
    pub modmail_github_secret: String,

    pub restart_command: String,
    pub discord_webhook_url: Option<String>,
}

impl AppSettings {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();

        let level = Level::from_env("LOG_LEVEL")?;
        let app_host = IpAddr::from_env("APP_HOST")?;
        let app_port = u16::from_env("APP_PORT")?;
        let development = bool::from_env_or("DEVELOPMENT", false)?;
        let domain = env::var("DOMAIN")?;
        let password = env::var("PASSWORD")?;

        let database_url = env::var("DATABASE_URL")?;
        let db_max_connections = usize::from_env("DB_MAX_CONNECTIONS")?;
        let db_wait_timeout_secs = u64::from_env("DB_WAIT_TIMEOUT_SECS")?;
        let db_wait_timeout = Duration::from_secs(db_wait_timeout_secs);

        let redis_url = env::var("REDIS_URL")?;
        let redis_max_connections = usize::from_env("REDIS_MAX_CONNECTIONS")?;
        let redis_connection_timeout_secs = u64::from_env("REDIS_CONNECTION_TIMEOUT_SECS")?;
        let redis_connection_timeout = Duration::from_secs(redis_connection_timeout_secs);
        let redis_response_timeout_secs = u64::from_env("REDIS_RESPONSE_TIMEOUT_SECS")?;
        let redis_response_timeout = Duration::from_secs(redis_response_timeout_secs);
        let redis_wait_timeout_secs = u64::from_env("REDIS_WAIT_TIMEOUT_SECS")?;
        let redis_wait_timeout = Duration::from_secs(redis_wait_timeout_secs);

        let http_timeout_secs = u64::from_env("HTTP_TIMEOUT_SECS")?;
        let http_timeout = Duration::from_secs(http_timeout_secs);
        let session_ttl_secs = u64::from_env("SESSION_TTL_SECS")?;
        let session_ttl = Duration::from_secs(session_ttl_secs);

        let github_client_id = env::var("GITHUB_CLIENT_ID")?;
        let github_secret = env::var("GITHUB_SECRET")?;
        let modmail_github_client_id = env::var("MODMAIL_GITHUB_CLIENT_ID")?;
        let modmail_github_secret = env::var("MODMAIL_GITHUB_SECRET")?;

        let restart_command =
            env::var("RESTART_COMMAND").unwrap_or_else(|_| DEFAULT_RESTART_COMMAND.to_owned());
        let discord_webhook_url = env::var("DISCORD_WEBHOOK_URL").ok();

        Ok(AppSettings {
            level,
            app_host,
            app_port,
            development,
            domain,
            password,

            database_url,
            db_max_connections,
            db_wait_timeout,

            redis_url,
            redis_max_connections,
            redis_connection_timeout,
            redis_response_timeout,
            redis_wait_timeout,

            http_timeout,
            session_ttl,

            github_client_id,
            github_secret,
            modmail_github_client_id,
            modmail_github_secret,

            restart_command,
            discord_webhook_url,
        })
    }

    pub fn get() -> &'static AppSettings {
        settings()
    }

    /// Public base url of a subdomain site, e.g. `https://logs.modmail.tk`.
    /// In development every site lives under a path prefix of the local server.
    pub fn site_url(&self, subdomain: &str) -> String {
        match self.development {
            true => format!("http://localhost:{}/{subdomain}", self.app_port),
            false => format!("https://{subdomain}.{}", self.domain),
        }
    }

    pub fn main_url(&self) -> String {
        match self.development {
            true => format!("http://localhost:{}", self.app_port),
            false => format!("https://{}", self.domain),
        }
    }
}

pub fn settings() -> &'static AppSettings {
    static SETTINGS: LazyLock<AppSettings> =
        LazyLock::new(|| AppSettings::load_from_env().expect("Failed to load settings"));
    SETTINGS.deref()
}
