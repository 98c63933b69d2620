pub mod api_users;
pub mod github;
pub mod instances;
pub mod logs;
