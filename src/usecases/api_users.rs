use crate::adapters::github;
use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::common::tokens::token_hex;
use crate::models::api_users::ApiUser;
use crate::models::github::GithubUser;
use crate::repositories::api_users;
use tracing::info;

const TOKEN_BYTES: usize = 15;

pub async fn fetch_by_token<C: Context>(ctx: &C, token: &str) -> ServiceResult<ApiUser> {
    match api_users::fetch_one_by_token(ctx, token).await {
        Ok(user) => Ok(ApiUser::from(user)),
        Err(sqlx::Error::RowNotFound) => Err(AppError::Unauthorized),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_one<C: Context>(ctx: &C, user_id: i64) -> ServiceResult<ApiUser> {
    match api_users::fetch_one(ctx, user_id).await {
        Ok(user) => Ok(ApiUser::from(user)),
        Err(sqlx::Error::RowNotFound) => Err(AppError::Unauthorized),
        Err(e) => unexpected(e),
    }
}

/// Completes the dashboard OAuth flow. Returning users keep their api token,
/// new users are issued one.
pub async fn login<C: Context>(ctx: &C, code: &str) -> ServiceResult<(GithubUser, String)> {
    let settings = ctx.settings();
    let access_token =
        github::exchange_code(ctx, &settings.github_client_id, &settings.github_secret, code)
            .await?;
    let user = github::fetch_user(ctx, &access_token).await?;

    match api_users::fetch_one(ctx, user.id).await {
        Ok(existing) => {
            api_users::update_access_token(ctx, user.id, &access_token).await?;
            info!(user_id = user.id, login = %user.login, "Api user logged in");
            Ok((user, existing.token))
        }
        Err(sqlx::Error::RowNotFound) => {
            let token = token_hex(TOKEN_BYTES);
            api_users::upsert(ctx, user.id, &user.login, &token, &access_token).await?;
            info!(user_id = user.id, login = %user.login, "Issued api token");
            Ok((user, token))
        }
        Err(e) => unexpected(e),
    }
}

pub struct Dashboard {
    pub token: String,
    pub has_starred: bool,
}

pub async fn fetch_dashboard<C: Context>(ctx: &C, user_id: i64) -> ServiceResult<Dashboard> {
    let user = fetch_one(ctx, user_id).await?;
    let has_starred = github::has_starred(ctx, &user.github_access_token).await?;
    Ok(Dashboard {
        token: user.token,
        has_starred,
    })
}
