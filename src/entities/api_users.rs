use chrono::{DateTime, Utc};

#[derive(Debug, sqlx::FromRow)]
pub struct ApiUser {
    pub user_id: i64,
    pub username: String,
    pub token: String,
    pub github_access_token: String,
    pub iat: DateTime<Utc>,
}
