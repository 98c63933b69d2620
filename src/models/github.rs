use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// Reply of the OAuth token endpoint when asked for JSON.
#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GitObject {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct GitRef {
    pub object: GitObject,
}

/// What the modmail api returns about a linked GitHub account.
#[derive(Debug, Serialize)]
pub struct GithubProfile {
    pub username: String,
    pub avatar_url: String,
    pub url: String,
}

impl From<GithubUser> for GithubProfile {
    fn from(user: GithubUser) -> Self {
        Self {
            username: user.login,
            avatar_url: user.avatar_url,
            url: user.html_url,
        }
    }
}
