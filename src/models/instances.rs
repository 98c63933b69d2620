use crate::entities::logs::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const REQUIRED_KEYS: [&str; 7] = [
    "guild_id",
    "guild_name",
    "member_count",
    "uptime",
    "version",
    "bot_id",
    "bot_name",
];

/// Heartbeat a modmail bot posts about itself.
#[derive(Debug, Deserialize)]
pub struct InstanceMetadata {
    pub guild_id: Snowflake,
    pub guild_name: String,
    pub member_count: i64,
    pub uptime: Value,
    pub version: String,
    pub bot_id: Snowflake,
    pub bot_name: String,
}

impl InstanceMetadata {
    /// Uptime is sent as a number of seconds by some versions and as a
    /// preformatted string by others.
    pub fn uptime_text(&self) -> String {
        match &self.uptime {
            Value::String(uptime) => uptime.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModmailInfo {
    pub latest_version: Option<String>,
    pub instances: i64,
}

/// Reads `__version__ = '2.13.4'` out of the bot's source.
pub fn parse_bot_version(source: &str) -> Option<String> {
    source.lines().find_map(|line| {
        let (name, value) = line.split_once('=')?;
        if name.trim() != "__version__" {
            return None;
        }
        let version = value.trim().trim_matches(|c| c == '\'' || c == '"');
        (!version.is_empty()).then(|| version.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_version_assignment() {
        let source = "import discord\n\n__version__ = '2.13.4'\n\nclass ModmailBot:\n";
        assert_eq!(parse_bot_version(source).as_deref(), Some("2.13.4"));
        assert_eq!(parse_bot_version("VERSION = \"1\""), None);
    }

    #[test]
    fn uptime_accepts_numbers_and_strings() {
        let mut payload = json!({
            "guild_id": "515071617815019520",
            "guild_name": "Modmail",
            "member_count": 1200,
            "uptime": 3600.5,
            "version": "2.13.4",
            "bot_id": 1,
            "bot_name": "Modmail",
        });
        let metadata: InstanceMetadata = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(metadata.uptime_text(), "3600.5");

        payload["uptime"] = json!("1 day, 2 hours");
        let metadata: InstanceMetadata = serde_json::from_value(payload).unwrap();
        assert_eq!(metadata.uptime_text(), "1 day, 2 hours");
    }
}
