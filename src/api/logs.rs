use crate::api::RequestContext;
use crate::common::error::{AppError, ServiceResult};
use crate::common::state::AppState;
use crate::models::logs::LogRecord;
use crate::transcripts::{render_html, render_plain_text};
use crate::usecases::logs;
use axum::Router;
use axum::extract::Path;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(transcript))
        .route("/raw/{key}", get(raw_transcript))
        .route("/{id}/{key}", get(user_transcript))
}

async fn transcript(ctx: RequestContext, Path(key): Path<String>) -> ServiceResult<Html<String>> {
    let log = logs::fetch_record(&ctx, &key).await?;
    let html = render_html(&log, Utc::now())?;
    Ok(Html(html))
}

fn plain_text(log: &LogRecord) -> Response {
    let headers = [(CONTENT_TYPE, "text/plain; charset=utf-8")];
    (headers, render_plain_text(log)).into_response()
}

async fn raw_transcript(ctx: RequestContext, Path(key): Path<String>) -> ServiceResult<Response> {
    let log = logs::fetch_record(&ctx, &key).await?;
    Ok(plain_text(&log))
}

async fn user_transcript(
    ctx: RequestContext,
    Path((user_id, key)): Path<(String, String)>,
) -> ServiceResult<Response> {
    let user_id = user_id.parse().map_err(|_| AppError::LogsUserNotFound)?;
    let log = logs::fetch_user_record(&ctx, user_id, &key).await?;
    Ok(plain_text(&log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::logs::User;
    use axum::http::StatusCode;
    use chrono::TimeZone;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn open_log() -> LogRecord {
        let recipient = User {
            id: 1,
            name: "kyb3r".into(),
            discriminator: "0001".into(),
            avatar_url: None,
            is_mod: false,
        };
        LogRecord {
            key: "a1b2c3d4e5f6".into(),
            open: true,
            created_at: Utc.with_ymd_and_hms(2019, 1, 5, 12, 0, 0).unwrap(),
            closed_at: None,
            channel_id: 10,
            guild_id: 20,
            creator: recipient.clone(),
            recipient,
            closer: None,
            messages: vec![],
        }
    }

    #[tokio::test]
    async fn raw_transcript_is_plain_text() {
        let response = plain_text(&open_log());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let body = body_text(response).await;
        assert!(body.starts_with("Thread created at 05 Jan 2019 - 12:00 UTC\n"));
    }

    #[tokio::test]
    async fn missing_log_is_not_found() {
        let response = AppError::LogsNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not found");
    }

    #[tokio::test]
    async fn missing_user_log_messages() {
        let response = AppError::LogsUserNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "User not found");

        let response = AppError::LogsKeyNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not Found");
    }
}
