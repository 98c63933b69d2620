use crate::entities::api_users::ApiUser as ApiUserEntity;
use chrono::{DateTime, Utc};

/// A GitHub account that logged into the dashboard and holds an api token.
#[derive(Clone, Debug)]
pub struct ApiUser {
    pub user_id: i64,
    pub username: String,
    pub token: String,
    pub github_access_token: String,
    pub issued_at: DateTime<Utc>,
}

impl From<ApiUserEntity> for ApiUser {
    fn from(value: ApiUserEntity) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            token: value.token,
            github_access_token: value.github_access_token,
            issued_at: value.iat,
        }
    }
}
