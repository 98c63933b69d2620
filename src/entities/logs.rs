use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::fmt;

pub const DEFAULT_MESSAGE_TYPE: &str = "thread_message";

fn default_message_type() -> String {
    DEFAULT_MESSAGE_TYPE.to_owned()
}

/// Discord ids are written either as JSON strings or as integers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Snowflake {
    Int(i64),
    Str(String),
}

impl Snowflake {
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Snowflake::Int(id) => Some(*id),
            Snowflake::Str(id) => id.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snowflake::Int(id) => write!(f, "{id}"),
            Snowflake::Str(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserDocument {
    pub id: Snowflake,
    pub name: String,
    pub discriminator: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(rename = "mod")]
    pub is_mod: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MessageDocument {
    pub message_id: Snowflake,
    pub timestamp: String,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub author: UserDocument,
    #[serde(rename = "type", default = "default_message_type")]
    pub message_type: String,
}

/// A modmail thread as the bot stores it.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LogDocument {
    pub key: String,
    pub open: bool,
    pub created_at: String,
    #[serde(default)]
    pub closed_at: Option<String>,
    pub channel_id: Snowflake,
    pub guild_id: Snowflake,
    pub creator: UserDocument,
    pub recipient: UserDocument,
    #[serde(default)]
    pub closer: Option<UserDocument>,
    pub messages: Vec<MessageDocument>,
}

#[derive(sqlx::FromRow)]
pub struct Log {
    pub log_key: String,
    pub user_id: Option<i64>,
    pub open: bool,
    pub document: Json<LogDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
