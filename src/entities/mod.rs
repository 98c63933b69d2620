pub mod api_users;
pub mod logs;
pub mod oauth_tokens;
pub mod sessions;
