use crate::common::context::Context;
use crate::entities::oauth_tokens::OAuthToken;

const TABLE_NAME: &str = "oauth_tokens";
const READ_FIELDS: &str = "token, provider, access_token";

pub async fn fetch_one<C: Context>(ctx: &C, provider: &str, token: &str) -> sqlx::Result<OAuthToken> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE provider = ? AND token = ?"
    );
    sqlx::query_as(QUERY)
        .bind(provider)
        .bind(token)
        .fetch_one(ctx.db())
        .await
}

/// Fails with a unique violation when the token is already linked.
pub async fn create<C: Context>(
    ctx: &C,
    provider: &str,
    token: &str,
    access_token: &str,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (token, provider, access_token) VALUES (?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(token)
        .bind(provider)
        .bind(access_token)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn delete<C: Context>(ctx: &C, provider: &str, token: &str) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "DELETE FROM ",
        TABLE_NAME,
        " WHERE provider = ? AND token = ?"
    );
    sqlx::query(QUERY)
        .bind(provider)
        .bind(token)
        .execute(ctx.db())
        .await?;
    Ok(())
}
