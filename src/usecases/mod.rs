pub mod api_users;
pub mod deploys;
pub mod instances;
pub mod logs;
pub mod oauth_tokens;
pub mod sessions;
