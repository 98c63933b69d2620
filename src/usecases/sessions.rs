use crate::common::context::Context;
use crate::common::error::ServiceResult;
use crate::entities::sessions::WebSession;
use crate::repositories::sessions;
use uuid::Uuid;

/// The stored session for `session_id`, or a fresh anonymous one.
pub async fn load<C: Context>(ctx: &C, session_id: Option<Uuid>) -> ServiceResult<WebSession> {
    let Some(session_id) = session_id else {
        return Ok(WebSession::new());
    };
    match sessions::fetch_one(ctx, session_id).await? {
        Some(session) => Ok(session),
        None => Ok(WebSession::new()),
    }
}

pub async fn save<C: Context>(ctx: &C, session: &WebSession) -> ServiceResult<()> {
    let ttl = ctx.settings().session_ttl.as_secs();
    sessions::save(ctx, session, ttl).await?;
    Ok(())
}

pub async fn clear<C: Context>(ctx: &C, session_id: Uuid) -> ServiceResult<()> {
    sessions::delete(ctx, session_id).await?;
    Ok(())
}
