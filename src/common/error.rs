use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

/// Carried on 500 responses so the error reporting middleware can forward
/// the failure to the operator channel.
#[derive(Clone, Debug)]
pub struct ErrorReport(pub Arc<str>);

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    let e = e.into();
    error!("An unexpected error has occurred at {caller}: {e}");
    Err(AppError::Unexpected(Arc::from(format!("{caller}: {e:?}"))))
}

#[derive(Debug)]
pub enum AppError {
    Unexpected(Arc<str>),
    Unauthorized,
    DecodingRequestFailed,

    HooksInvalidSignature,

    LogsNotFound,
    LogsUserNotFound,
    LogsKeyNotFound,
    LogsAlreadyClosed,
    LogsKeyExhausted,

    ModmailInvalidPayload,

    OAuthUserNotFound,
    OAuthExchangeFailed,

    RedirectsNotFound,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn as_str(&self) -> &str {
        self.code()
    }

    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected(_) => "unexpected",
            AppError::Unauthorized => "unauthorized",
            AppError::DecodingRequestFailed => "decoding_request_failed",

            AppError::HooksInvalidSignature => "hooks.invalid_signature",

            AppError::LogsNotFound => "logs.not_found",
            AppError::LogsUserNotFound => "logs.user_not_found",
            AppError::LogsKeyNotFound => "logs.key_not_found",
            AppError::LogsAlreadyClosed => "logs.already_closed",
            AppError::LogsKeyExhausted => "logs.key_exhausted",

            AppError::ModmailInvalidPayload => "modmail.invalid_payload",

            AppError::OAuthUserNotFound => "oauth.user_not_found",
            AppError::OAuthExchangeFailed => "oauth.exchange_failed",

            AppError::RedirectsNotFound => "redirects.not_found",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected(_) => "something went wrong xd",
            AppError::Unauthorized => "Unauthorized",
            AppError::DecodingRequestFailed => "Failed to decode request",

            AppError::HooksInvalidSignature => "fuck off",

            AppError::LogsNotFound => "Not found",
            AppError::LogsUserNotFound => "User not found",
            AppError::LogsKeyNotFound => "Not Found",
            AppError::LogsAlreadyClosed => "This thread has already been closed.",
            AppError::LogsKeyExhausted => "Could not allocate a unique log key.",

            AppError::ModmailInvalidPayload => "invalid payload",

            AppError::OAuthUserNotFound => "Unable to find user. Please go through OAuth.",
            AppError::OAuthExchangeFailed => "GitHub did not issue an access token.",

            AppError::RedirectsNotFound => "Not Found",
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::DecodingRequestFailed
            | AppError::ModmailInvalidPayload
            | AppError::OAuthExchangeFailed => StatusCode::BAD_REQUEST,

            AppError::Unauthorized | AppError::HooksInvalidSignature => StatusCode::UNAUTHORIZED,

            AppError::OAuthUserNotFound => StatusCode::FORBIDDEN,

            AppError::LogsNotFound
            | AppError::LogsUserNotFound
            | AppError::LogsKeyNotFound
            | AppError::RedirectsNotFound => StatusCode::NOT_FOUND,

            AppError::LogsAlreadyClosed => StatusCode::CONFLICT,

            AppError::Unexpected(_) | AppError::LogsKeyExhausted => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status_code();
        let code = self.code();
        let message = self.message();
        match self {
            AppError::OAuthUserNotFound => {
                let body = json!({ "error": true, "message": message });
                (status, Json(body)).into_response()
            }
            AppError::ModmailInvalidPayload => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            AppError::LogsAlreadyClosed
            | AppError::LogsKeyExhausted
            | AppError::OAuthExchangeFailed => {
                (status, Json(ErrorResponse { code, message })).into_response()
            }
            AppError::Unexpected(detail) => {
                let mut response = (status, message).into_response();
                response.extensions_mut().insert(ErrorReport(detail));
                response
            }
            _ => (status, message).into_response(),
        }
    }
}
