use crate::common::context::Context;
use crate::models::instances::InstanceMetadata;

const TABLE_NAME: &str = "modmail_instances";

pub async fn count<C: Context>(ctx: &C) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!("SELECT COUNT(*) FROM ", TABLE_NAME);
    sqlx::query_scalar(QUERY).fetch_one(ctx.db()).await
}

pub async fn upsert<C: Context>(
    ctx: &C,
    bot_id: i64,
    guild_id: i64,
    metadata: &InstanceMetadata,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (bot_id, bot_name, guild_id, guild_name, member_count, uptime, version)",
        " VALUES (?, ?, ?, ?, ?, ?, ?)",
        " ON DUPLICATE KEY UPDATE bot_name = VALUES(bot_name), guild_id = VALUES(guild_id),",
        " guild_name = VALUES(guild_name), member_count = VALUES(member_count),",
        " uptime = VALUES(uptime), version = VALUES(version)"
    );
    sqlx::query(QUERY)
        .bind(bot_id)
        .bind(&metadata.bot_name)
        .bind(guild_id)
        .bind(&metadata.guild_name)
        .bind(metadata.member_count)
        .bind(metadata.uptime_text())
        .bind(&metadata.version)
        .execute(ctx.db())
        .await?;
    Ok(())
}
