use crate::common::context::Context;
use crate::entities::logs::{Log, LogDocument, MessageDocument, UserDocument};
use sqlx::types::Json;

const TABLE_NAME: &str = "logs";
const READ_FIELDS: &str = "log_key, user_id, open, document, created_at, updated_at";

pub async fn fetch_one<C: Context>(ctx: &C, key: &str) -> sqlx::Result<Log> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE log_key = ?"
    );
    sqlx::query_as(QUERY).bind(key).fetch_one(ctx.db()).await
}

pub async fn fetch_one_by_user<C: Context>(ctx: &C, user_id: i64, key: &str) -> sqlx::Result<Log> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE user_id = ? AND log_key = ?"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .bind(key)
        .fetch_one(ctx.db())
        .await
}

/// Fails with a unique violation when `document.key` is taken.
pub async fn create<C: Context>(
    ctx: &C,
    user_id: Option<i64>,
    document: &LogDocument,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (log_key, user_id, open, document) VALUES (?, ?, ?, ?)"
    );
    sqlx::query(QUERY)
        .bind(&document.key)
        .bind(user_id)
        .bind(document.open)
        .bind(Json(document))
        .execute(ctx.db())
        .await?;
    Ok(())
}

/// Returns whether a row was updated.
pub async fn append_message<C: Context>(
    ctx: &C,
    key: &str,
    message: &MessageDocument,
) -> anyhow::Result<bool> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET document = JSON_ARRAY_APPEND(document, '$.messages', CAST(? AS JSON))",
        " WHERE log_key = ?"
    );
    let message = serde_json::to_string(message)?;
    let result = sqlx::query(QUERY)
        .bind(message)
        .bind(key)
        .execute(ctx.db())
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Closes an open thread. Returns whether a row was updated, which is false
/// for unknown keys and threads that are already closed.
pub async fn close<C: Context>(
    ctx: &C,
    key: &str,
    closed_at: &str,
    closer: &UserDocument,
) -> anyhow::Result<bool> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET open = FALSE, document = JSON_SET(document,",
        " '$.open', CAST('false' AS JSON),",
        " '$.closed_at', ?,",
        " '$.closer', CAST(? AS JSON))",
        " WHERE log_key = ? AND open IS TRUE"
    );
    let closer = serde_json::to_string(closer)?;
    let result = sqlx::query(QUERY)
        .bind(closed_at)
        .bind(closer)
        .bind(key)
        .execute(ctx.db())
        .await?;
    Ok(result.rows_affected() > 0)
}
