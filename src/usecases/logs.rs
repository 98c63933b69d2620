use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::common::tokens::token_hex;
use crate::entities::logs::{Log, LogDocument, MessageDocument};
use crate::models::api_users::ApiUser;
use crate::models::logs::{CloseLogArgs, CreateLogArgs, CreatedLog, LogRecord, Message};
use crate::repositories::{api_users, logs};
use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

const KEY_BYTES: usize = 6;
const MAX_KEY_ATTEMPTS: usize = 5;

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode(log: Log) -> ServiceResult<LogRecord> {
    LogRecord::try_from(log.document.0).or_else(unexpected)
}

/// Public view of a thread, as served by the logs site.
pub async fn fetch_record<C: Context>(ctx: &C, key: &str) -> ServiceResult<LogRecord> {
    match logs::fetch_one(ctx, key).await {
        Ok(log) => decode(log),
        Err(sqlx::Error::RowNotFound) => Err(AppError::LogsNotFound),
        Err(e) => unexpected(e),
    }
}

/// A thread looked up under the api user that created it.
pub async fn fetch_user_record<C: Context>(
    ctx: &C,
    user_id: i64,
    key: &str,
) -> ServiceResult<LogRecord> {
    match api_users::fetch_one(ctx, user_id).await {
        Ok(_) => {}
        Err(sqlx::Error::RowNotFound) => return Err(AppError::LogsUserNotFound),
        Err(e) => return unexpected(e),
    }
    match logs::fetch_one_by_user(ctx, user_id, key).await {
        Ok(log) => decode(log),
        Err(sqlx::Error::RowNotFound) => Err(AppError::LogsKeyNotFound),
        Err(e) => unexpected(e),
    }
}

async fn fetch_owned<C: Context>(ctx: &C, owner: &ApiUser, key: &str) -> ServiceResult<Log> {
    match logs::fetch_one_by_user(ctx, owner.user_id, key).await {
        Ok(log) => Ok(log),
        Err(sqlx::Error::RowNotFound) => Err(AppError::LogsNotFound),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_document<C: Context>(
    ctx: &C,
    owner: &ApiUser,
    key: &str,
) -> ServiceResult<LogDocument> {
    let log = fetch_owned(ctx, owner, key).await?;
    Ok(log.document.0)
}

pub async fn create<C: Context>(
    ctx: &C,
    owner: &ApiUser,
    args: CreateLogArgs,
) -> ServiceResult<CreatedLog> {
    let mut document = LogDocument {
        key: String::new(),
        open: true,
        created_at: args.created_at.unwrap_or_else(now_timestamp),
        closed_at: None,
        channel_id: args.channel_id,
        guild_id: args.guild_id,
        creator: args.creator,
        recipient: args.recipient,
        closer: None,
        messages: vec![],
    };
    if let Err(e) = LogRecord::try_from(document.clone()) {
        warn!(user_id = owner.user_id, "Rejected new thread: {e}");
        return Err(AppError::DecodingRequestFailed);
    }

    for _ in 0..MAX_KEY_ATTEMPTS {
        document.key = token_hex(KEY_BYTES);
        match logs::create(ctx, Some(owner.user_id), &document).await {
            Ok(()) => {
                info!(user_id = owner.user_id, key = %document.key, "Created thread log");
                let url = format!("{}/{}", ctx.settings().site_url("logs"), document.key);
                return Ok(CreatedLog {
                    key: document.key,
                    url,
                });
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!(key = %document.key, "Log key collision, retrying");
            }
            Err(e) => return unexpected(e),
        }
    }
    Err(AppError::LogsKeyExhausted)
}

pub async fn append_message<C: Context>(
    ctx: &C,
    owner: &ApiUser,
    key: &str,
    message: MessageDocument,
) -> ServiceResult<()> {
    if let Err(e) = Message::try_from(message.clone()) {
        warn!(key, "Rejected thread message: {e}");
        return Err(AppError::DecodingRequestFailed);
    }
    let log = fetch_owned(ctx, owner, key).await?;
    if !log.open {
        return Err(AppError::LogsAlreadyClosed);
    }
    match logs::append_message(ctx, key, &message).await? {
        true => Ok(()),
        false => Err(AppError::LogsNotFound),
    }
}

pub async fn close<C: Context>(
    ctx: &C,
    owner: &ApiUser,
    key: &str,
    args: CloseLogArgs,
) -> ServiceResult<()> {
    let log = fetch_owned(ctx, owner, key).await?;
    if !log.open {
        return Err(AppError::LogsAlreadyClosed);
    }

    let mut document = log.document.0;
    document.open = false;
    document.closed_at = Some(args.closed_at.unwrap_or_else(now_timestamp));
    document.closer = Some(args.closer);
    if let Err(e) = LogRecord::try_from(document.clone()) {
        warn!(key, "Rejected thread close: {e}");
        return Err(AppError::DecodingRequestFailed);
    }

    let (Some(closed_at), Some(closer)) = (&document.closed_at, &document.closer) else {
        return Err(AppError::DecodingRequestFailed);
    };
    match logs::close(ctx, key, closed_at, closer).await? {
        true => {
            info!(key, closer = %closer.name, "Closed thread log");
            Ok(())
        }
        // lost a race with another close
        false => Err(AppError::LogsAlreadyClosed),
    }
}
