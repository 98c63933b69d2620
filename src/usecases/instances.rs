use crate::adapters::github;
use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::models::instances::{self, InstanceMetadata, ModmailInfo, REQUIRED_KEYS};
use crate::repositories::instances as instances_repo;
use serde_json::Value;
use tracing::warn;

pub async fn fetch_info<C: Context>(ctx: &C) -> ServiceResult<ModmailInfo> {
    let latest_version = match github::fetch_bot_source(ctx).await {
        Ok(source) => instances::parse_bot_version(&source),
        Err(_) => None,
    };
    if latest_version.is_none() {
        warn!("Could not determine the latest modmail version");
    }
    let instances = instances_repo::count(ctx).await?;
    Ok(ModmailInfo {
        latest_version,
        instances,
    })
}

/// Validates a bot heartbeat and stores it.
pub fn parse_metadata(payload: Value) -> ServiceResult<(i64, i64, InstanceMetadata)> {
    let Some(object) = payload.as_object() else {
        return Err(AppError::ModmailInvalidPayload);
    };
    if REQUIRED_KEYS.iter().any(|key| !object.contains_key(*key)) {
        return Err(AppError::ModmailInvalidPayload);
    }
    let metadata: InstanceMetadata =
        serde_json::from_value(payload).map_err(|_| AppError::ModmailInvalidPayload)?;
    let bot_id = metadata.bot_id.to_i64();
    let guild_id = metadata.guild_id.to_i64();
    match (bot_id, guild_id) {
        (Some(bot_id), Some(guild_id)) => Ok((bot_id, guild_id, metadata)),
        _ => Err(AppError::ModmailInvalidPayload),
    }
}

pub async fn upsert<C: Context>(ctx: &C, payload: Value) -> ServiceResult<()> {
    let (bot_id, guild_id, metadata) = parse_metadata(payload)?;
    instances_repo::upsert(ctx, bot_id, guild_id, &metadata).await?;
    Ok(())
}
