use crate::entities::logs::{LogDocument, MessageDocument, Snowflake, UserDocument};
use crate::transcripts::groups::{MessageGroup, message_groups};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::entities::logs::DEFAULT_MESSAGE_TYPE;
pub const SYSTEM_MESSAGE_TYPE: &str = "system";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid id `{0}`")]
    InvalidId(String),
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),
    #[error("closed thread is missing `{0}`")]
    MissingCloseField(&'static str),
    #[error("open thread has `{0}` set")]
    UnexpectedCloseField(&'static str),
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub discriminator: String,
    pub avatar_url: Option<String>,
    pub is_mod: bool,
}

/// The same account acting as staff and as the recipient are two users.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.is_mod == other.is_mod
    }
}

impl Eq for User {}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.discriminator)
    }
}

impl User {
    pub fn default_avatar_url(&self) -> String {
        let index = self.discriminator.parse::<u32>().unwrap_or(0) % 5;
        format!("https://cdn.discordapp.com/embed/avatars/{index}.png")
    }

    pub fn display_avatar_url(&self) -> String {
        match self.avatar_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => self.default_avatar_url(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub attachments: Vec<String>,
    pub author: User,
    pub message_type: String,
}

#[derive(Clone, Debug)]
pub struct LogRecord {
    pub key: String,
    pub open: bool,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub channel_id: i64,
    pub guild_id: i64,
    pub creator: User,
    pub recipient: User,
    pub closer: Option<User>,
    pub messages: Vec<Message>,
}

impl LogRecord {
    pub fn message_groups(&self) -> Vec<MessageGroup<'_>> {
        message_groups(&self.messages)
    }
}

/// Accepts RFC 3339 as well as the offset-less ISO form (`2019-01-05T12:00:00.123456`),
/// which is read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DecodeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DecodeError::InvalidTimestamp(value.to_owned()))
}

fn parse_id(id: &Snowflake) -> Result<i64, DecodeError> {
    id.to_i64()
        .ok_or_else(|| DecodeError::InvalidId(id.to_string()))
}

impl TryFrom<UserDocument> for User {
    type Error = DecodeError;
    fn try_from(value: UserDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&value.id)?,
            name: value.name,
            discriminator: value.discriminator,
            avatar_url: value.avatar_url,
            is_mod: value.is_mod,
        })
    }
}

impl TryFrom<MessageDocument> for Message {
    type Error = DecodeError;
    fn try_from(value: MessageDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&value.message_id)?,
            created_at: parse_timestamp(&value.timestamp)?,
            content: value.content,
            attachments: value.attachments,
            author: User::try_from(value.author)?,
            message_type: value.message_type,
        })
    }
}

impl TryFrom<LogDocument> for LogRecord {
    type Error = DecodeError;
    fn try_from(value: LogDocument) -> Result<Self, Self::Error> {
        let (closed_at, closer) = match (value.open, value.closed_at, value.closer) {
            (true, None, None) => (None, None),
            (true, Some(_), _) => return Err(DecodeError::UnexpectedCloseField("closed_at")),
            (true, None, Some(_)) => return Err(DecodeError::UnexpectedCloseField("closer")),
            (false, None, _) => return Err(DecodeError::MissingCloseField("closed_at")),
            (false, Some(_), None) => return Err(DecodeError::MissingCloseField("closer")),
            (false, Some(closed_at), Some(closer)) => {
                (Some(parse_timestamp(&closed_at)?), Some(User::try_from(closer)?))
            }
        };
        let messages = value
            .messages
            .into_iter()
            .map(Message::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            key: value.key,
            open: value.open,
            created_at: parse_timestamp(&value.created_at)?,
            closed_at,
            channel_id: parse_id(&value.channel_id)?,
            guild_id: parse_id(&value.guild_id)?,
            creator: User::try_from(value.creator)?,
            recipient: User::try_from(value.recipient)?,
            closer,
            messages,
        })
    }
}

/// Body of `POST /logs`.
#[derive(Debug, Deserialize)]
pub struct CreateLogArgs {
    pub channel_id: Snowflake,
    pub guild_id: Snowflake,
    pub creator: UserDocument,
    pub recipient: UserDocument,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /logs/{key}/close`.
#[derive(Debug, Deserialize)]
pub struct CloseLogArgs {
    pub closer: UserDocument,
    #[serde(default)]
    pub closed_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedLog {
    pub key: String,
    pub url: String,
}
