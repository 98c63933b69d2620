use crate::adapters::github;
use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::oauth_tokens::OAuthToken;
use crate::models::github::{GithubProfile, GithubUser};
use crate::repositories::oauth_tokens;
use tracing::info;

pub const PROVIDER_GITHUB: &str = "github";

pub async fn fetch_one<C: Context>(ctx: &C, token: &str) -> ServiceResult<OAuthToken> {
    match oauth_tokens::fetch_one(ctx, PROVIDER_GITHUB, token).await {
        Ok(token) => Ok(token),
        Err(sqlx::Error::RowNotFound) => Err(AppError::OAuthUserNotFound),
        Err(e) => unexpected(e),
    }
}

/// Links a bot's token to a GitHub account. `None` means the token was
/// already linked.
pub async fn link<C: Context>(
    ctx: &C,
    code: &str,
    bot_token: &str,
) -> ServiceResult<Option<GithubUser>> {
    let settings = ctx.settings();
    let access_token = github::exchange_code(
        ctx,
        &settings.modmail_github_client_id,
        &settings.modmail_github_secret,
        code,
    )
    .await?;

    match oauth_tokens::create(ctx, PROVIDER_GITHUB, bot_token, &access_token).await {
        Ok(()) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Ok(None),
        Err(e) => return unexpected(e),
    }
    let user = github::fetch_user(ctx, &access_token).await?;
    info!(login = %user.login, "Linked modmail bot to GitHub");
    Ok(Some(user))
}

pub async fn fetch_profile<C: Context>(ctx: &C, token: &OAuthToken) -> ServiceResult<GithubProfile> {
    let user = github::fetch_user(ctx, &token.access_token).await?;
    Ok(GithubProfile::from(user))
}

pub async fn unlink<C: Context>(ctx: &C, token: &OAuthToken) -> ServiceResult<()> {
    oauth_tokens::delete(ctx, PROVIDER_GITHUB, &token.token).await?;
    Ok(())
}

/// Merges upstream into the linked account's fork.
pub async fn update_repository<C: Context>(
    ctx: &C,
    token: &OAuthToken,
) -> ServiceResult<(GithubProfile, Option<serde_json::Value>)> {
    let user = github::fetch_user(ctx, &token.access_token).await?;
    let data = github::update_repository(ctx, &token.access_token, &user.login).await?;
    info!(login = %user.login, updated = data.is_some(), "Updated modmail fork");
    Ok((GithubProfile::from(user), data))
}
