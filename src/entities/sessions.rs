use crate::models::github::GithubUser;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Browser session as stored in redis.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WebSession {
    pub session_id: Uuid,
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<GithubUser>,
    #[serde(default)]
    pub token: Option<String>,
}

impl WebSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            logged_in: false,
            user: None,
            token: None,
        }
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
