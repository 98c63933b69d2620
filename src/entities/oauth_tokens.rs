#[derive(Clone, Debug, sqlx::FromRow)]
pub struct OAuthToken {
    pub token: String,
    pub provider: String,
    pub access_token: String,
}
