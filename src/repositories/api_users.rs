use crate::common::context::Context;
use crate::entities::api_users::ApiUser;

const TABLE_NAME: &str = "api_users";
const READ_FIELDS: &str = "user_id, username, token, github_access_token, iat";

pub async fn fetch_one<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<ApiUser> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE user_id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_one(ctx.db())
        .await
}

pub async fn fetch_one_by_token<C: Context>(ctx: &C, token: &str) -> sqlx::Result<ApiUser> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE token = ?"
    );
    sqlx::query_as(QUERY).bind(token).fetch_one(ctx.db()).await
}

pub async fn update_access_token<C: Context>(
    ctx: &C,
    user_id: i64,
    github_access_token: &str,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET github_access_token = ? WHERE user_id = ?"
    );
    sqlx::query(QUERY)
        .bind(github_access_token)
        .bind(user_id)
        .execute(ctx.db())
        .await?;
    Ok(())
}

pub async fn upsert<C: Context>(
    ctx: &C,
    user_id: i64,
    username: &str,
    token: &str,
    github_access_token: &str,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (user_id, username, token, github_access_token, iat) VALUES (?, ?, ?, ?, UTC_TIMESTAMP(6))",
        " ON DUPLICATE KEY UPDATE username = VALUES(username), token = VALUES(token),",
        " github_access_token = VALUES(github_access_token), iat = VALUES(iat)"
    );
    sqlx::query(QUERY)
        .bind(user_id)
        .bind(username)
        .bind(token)
        .bind(github_access_token)
        .execute(ctx.db())
        .await?;
    Ok(())
}
