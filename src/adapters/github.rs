use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::models::github::{AccessTokenResponse, GitRef, GithubUser};
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use serde_json::json;

const OAUTH_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const OAUTH_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_BASE_URL: &str = "https://api.github.com";
const API_MEDIA_TYPE: &str = "application/vnd.github+json";

pub const UPSTREAM_OWNER: &str = "kyb3r";
pub const UPSTREAM_REPO: &str = "modmail";
pub const UPSTREAM_BRANCH: &str = "master";
const BOT_SOURCE_URL: &str = "https://raw.githubusercontent.com/kyb3r/modmail/master/bot.py";

pub fn authorize_url(client_id: &str, scope: &str) -> ServiceResult<String> {
    let url = Url::parse_with_params(
        OAUTH_AUTHORIZE_URL,
        &[("client_id", client_id), ("scope", scope)],
    )?;
    Ok(url.into())
}

pub async fn exchange_code<C: Context>(
    ctx: &C,
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> ServiceResult<String> {
    let response: AccessTokenResponse = ctx
        .http()
        .post(OAUTH_TOKEN_URL)
        .header(ACCEPT, "application/json")
        .query(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    match response.access_token {
        Some(access_token) => Ok(access_token),
        None => {
            tracing::warn!(
                error = ?response.error,
                description = ?response.error_description,
                "GitHub refused the OAuth code"
            );
            Err(AppError::OAuthExchangeFailed)
        }
    }
}

fn api_get<C: Context>(ctx: &C, access_token: &str, path: &str) -> reqwest::RequestBuilder {
    ctx.http()
        .get(format!("{API_BASE_URL}{path}"))
        .header(ACCEPT, API_MEDIA_TYPE)
        .bearer_auth(access_token)
}

fn api_post<C: Context>(ctx: &C, access_token: &str, path: &str) -> reqwest::RequestBuilder {
    ctx.http()
        .post(format!("{API_BASE_URL}{path}"))
        .header(ACCEPT, API_MEDIA_TYPE)
        .bearer_auth(access_token)
}

pub async fn fetch_user<C: Context>(ctx: &C, access_token: &str) -> ServiceResult<GithubUser> {
    let user = api_get(ctx, access_token, "/user")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(user)
}

pub async fn has_starred<C: Context>(ctx: &C, access_token: &str) -> ServiceResult<bool> {
    let path = format!("/user/starred/{UPSTREAM_OWNER}/{UPSTREAM_REPO}");
    let response = api_get(ctx, access_token, &path).send().await?;
    match response.status() {
        StatusCode::NO_CONTENT => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        _ => {
            response.error_for_status()?;
            Ok(false)
        }
    }
}

pub async fn fork_repository<C: Context>(ctx: &C, access_token: &str) -> ServiceResult<()> {
    let path = format!("/repos/{UPSTREAM_OWNER}/{UPSTREAM_REPO}/forks");
    api_post(ctx, access_token, &path)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// Merges upstream `master` into the user's fork. `None` means the fork was
/// already up to date.
pub async fn update_repository<C: Context>(
    ctx: &C,
    access_token: &str,
    login: &str,
) -> ServiceResult<Option<serde_json::Value>> {
    let ref_path =
        format!("/repos/{UPSTREAM_OWNER}/{UPSTREAM_REPO}/git/refs/heads/{UPSTREAM_BRANCH}");
    let upstream: GitRef = api_get(ctx, access_token, &ref_path)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let merge_path = format!("/repos/{login}/{UPSTREAM_REPO}/merges");
    let response = api_post(ctx, access_token, &merge_path)
        .json(&json!({
            "base": UPSTREAM_BRANCH,
            "head": upstream.object.sha,
            "commit_message": "Updating bot",
        }))
        .send()
        .await?
        .error_for_status()?;
    match response.status() {
        StatusCode::NO_CONTENT => Ok(None),
        _ => Ok(Some(response.json().await?)),
    }
}

pub async fn fetch_bot_source<C: Context>(ctx: &C) -> ServiceResult<String> {
    let source = ctx
        .http()
        .get(BOT_SOURCE_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_encodes_params() {
        let url = authorize_url("e54e4ff0f234ee9f22aa", "public_repo").unwrap();
        assert_eq!(
            url,
            "https://github.com/login/oauth/authorize?client_id=e54e4ff0f234ee9f22aa&scope=public_repo"
        );
    }
}
