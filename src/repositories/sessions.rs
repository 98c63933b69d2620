use crate::common::context::Context;
use crate::common::redis_json::Json;
use crate::entities::sessions::WebSession;
use redis::AsyncCommands;
use uuid::Uuid;

fn make_key(session_id: Uuid) -> String {
    format!("modmail:web:sessions:{session_id}")
}

pub async fn fetch_one<C: Context>(ctx: &C, session_id: Uuid) -> anyhow::Result<Option<WebSession>> {
    let mut redis = ctx.redis().await?;
    let session: Option<Json<WebSession>> = redis.get(make_key(session_id)).await?;
    Ok(session.map(Json::into_inner))
}

pub async fn save<C: Context>(ctx: &C, session: &WebSession, ttl_secs: u64) -> anyhow::Result<()> {
    let mut redis = ctx.redis().await?;
    let _: () = redis
        .set_ex(make_key(session.session_id), Json(session), ttl_secs)
        .await?;
    Ok(())
}

pub async fn delete<C: Context>(ctx: &C, session_id: Uuid) -> anyhow::Result<()> {
    let mut redis = ctx.redis().await?;
    let _: () = redis.del(make_key(session_id)).await?;
    Ok(())
}
