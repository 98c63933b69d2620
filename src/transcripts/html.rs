use crate::common::templates;
use crate::models::logs::{LogRecord, Message, SYSTEM_MESSAGE_TYPE, User};
use crate::transcripts::groups::{MessageGroup, message_groups};
use crate::transcripts::humanize::humanize_since;
use crate::transcripts::markdown;
use chrono::{DateTime, Utc};
use minijinja::context;
use serde::Serialize;

pub const SYSTEM_AVATAR_URL: &str =
    "https://discordapp.com/assets/f78426a064bc9dd24847519259bc42af.png";
const TEMPLATE_NAME: &str = "logbase.html";
const DISPLAY_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Serialize)]
struct UserView {
    id: String,
    name: String,
    discriminator: String,
    tag: String,
    avatar_url: String,
    is_mod: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            discriminator: user.discriminator.clone(),
            tag: user.to_string(),
            avatar_url: user.display_avatar_url(),
            is_mod: user.is_mod,
        }
    }
}

#[derive(Serialize)]
struct AttachmentView {
    url: String,
    filename: String,
    is_image: bool,
}

impl AttachmentView {
    fn new(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let filename = path.rsplit('/').next().unwrap_or(path).to_owned();
        let is_image = filename
            .rsplit_once('.')
            .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        Self {
            url: url.to_owned(),
            filename,
            is_image,
        }
    }
}

#[derive(Serialize)]
struct MessageView {
    id: String,
    created_at: String,
    timestamp: String,
    content: String,
    attachments: Vec<AttachmentView>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            created_at: message.created_at.format(DISPLAY_TIME_FORMAT).to_string(),
            timestamp: message.created_at.to_rfc3339(),
            content: markdown::sanitize(&message.content),
            attachments: message
                .attachments
                .iter()
                .map(|url| AttachmentView::new(url))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct GroupView {
    author: UserView,
    message_type: String,
    is_system: bool,
    avatar_url: String,
    created_at: String,
    messages: Vec<MessageView>,
}

impl From<&MessageGroup<'_>> for GroupView {
    fn from(group: &MessageGroup<'_>) -> Self {
        let is_system = group.message_type == SYSTEM_MESSAGE_TYPE;
        let avatar_url = match is_system {
            true => SYSTEM_AVATAR_URL.to_owned(),
            false => group.author.display_avatar_url(),
        };
        let created_at = group
            .messages
            .first()
            .map(|m| m.created_at.format(DISPLAY_TIME_FORMAT).to_string())
            .unwrap_or_default();
        Self {
            author: UserView::from(group.author),
            message_type: group.message_type.to_owned(),
            is_system,
            avatar_url,
            created_at,
            messages: group.messages.iter().map(|m| MessageView::from(*m)).collect(),
        }
    }
}

#[derive(Serialize)]
struct TranscriptView {
    key: String,
    open: bool,
    created_at: String,
    closed_at: Option<String>,
    closed_ago: Option<String>,
    creator: UserView,
    recipient: UserView,
    closer: Option<UserView>,
    message_count: usize,
    groups: Vec<GroupView>,
}

impl TranscriptView {
    fn new(log: &LogRecord, now: DateTime<Utc>) -> Self {
        let groups = message_groups(&log.messages);
        Self {
            key: log.key.clone(),
            open: log.open,
            created_at: log.created_at.format(DISPLAY_TIME_FORMAT).to_string(),
            closed_at: log
                .closed_at
                .map(|t| t.format(DISPLAY_TIME_FORMAT).to_string()),
            closed_ago: log.closed_at.map(|t| humanize_since(t, now)),
            creator: UserView::from(&log.creator),
            recipient: UserView::from(&log.recipient),
            closer: log.closer.as_ref().map(UserView::from),
            message_count: log.messages.len(),
            groups: groups.iter().map(GroupView::from).collect(),
        }
    }
}

/// Full HTML document for a thread. `now` anchors the relative close time.
pub fn render_html(log: &LogRecord, now: DateTime<Utc>) -> Result<String, minijinja::Error> {
    let view = TranscriptView::new(log, now);
    templates::render(TEMPLATE_NAME, context! { log => view })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::logs::DEFAULT_MESSAGE_TYPE;
    use chrono::{TimeDelta, TimeZone};

    fn user(id: i64, name: &str, is_mod: bool) -> User {
        User {
            id,
            name: name.into(),
            discriminator: "0003".into(),
            avatar_url: None,
            is_mod,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 5, 12, 0, 0).unwrap()
    }

    fn message(id: i64, author: &User, seconds: i64, content: &str) -> Message {
        Message {
            id,
            created_at: t0() + TimeDelta::seconds(seconds),
            content: content.into(),
            attachments: vec![],
            author: author.clone(),
            message_type: DEFAULT_MESSAGE_TYPE.into(),
        }
    }

    fn closed_log(messages: Vec<Message>) -> LogRecord {
        let recipient = user(1, "kyb3r", false);
        LogRecord {
            key: "a1b2c3d4e5f6".into(),
            open: false,
            created_at: t0(),
            closed_at: Some(t0() + TimeDelta::hours(1)),
            channel_id: 10,
            guild_id: 20,
            creator: recipient.clone(),
            recipient,
            closer: Some(user(2, "fourjr", true)),
            messages,
        }
    }

    #[test]
    fn renders_full_document() {
        let a = user(1, "kyb3r", false);
        let log = closed_log(vec![message(1, &a, 0, "**help** @everyone")]);
        let html = render_html(&log, t0() + TimeDelta::days(3)).unwrap();
        assert!(html.trim_start().starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<strong>help</strong>"));
        assert!(html.contains(r#"<span class="mention">@everyone</span>"#));
        assert!(html.contains("2 days ago"));
        assert!(html.contains("kyb3r#0003"));
        // discriminator 3 -> default avatar 3
        assert!(html.contains("https://cdn.discordapp.com/embed/avatars/3.png"));
    }

    #[test]
    fn escapes_user_supplied_names() {
        let sneaky = user(1, "<img src=x>", false);
        let log = closed_log(vec![message(1, &sneaky, 0, "hi")]);
        let html = render_html(&log, t0()).unwrap();
        assert!(!html.contains("<img src=x>"));
    }

    #[test]
    fn same_author_messages_share_a_group() {
        let a = user(1, "kyb3r", false);
        let b = user(2, "fourjr", true);
        let log = closed_log(vec![
            message(1, &a, 0, "first"),
            message(2, &a, 10, "second"),
            message(3, &b, 20, "reply"),
        ]);
        let view = TranscriptView::new(&log, t0());
        assert_eq!(view.groups.len(), 2);
        assert_eq!(view.groups[0].messages.len(), 2);
        assert_eq!(view.groups[1].author.tag, "fourjr#0003");
        assert_eq!(view.closed_ago.as_deref(), Some("in an hour"));
    }

    #[test]
    fn system_groups_use_system_avatar() {
        let b = user(2, "fourjr", true);
        let mut note = message(1, &b, 0, "Thread moved");
        note.message_type = SYSTEM_MESSAGE_TYPE.into();
        let view = TranscriptView::new(&closed_log(vec![note]), t0());
        assert!(view.groups[0].is_system);
        assert_eq!(view.groups[0].avatar_url, SYSTEM_AVATAR_URL);
    }

    #[test]
    fn classifies_attachments() {
        let image = AttachmentView::new("https://cdn.discordapp.com/attachments/1/2/Cat.PNG?size=4");
        assert_eq!(image.filename, "Cat.PNG");
        assert!(image.is_image);
        let file = AttachmentView::new("https://cdn.discordapp.com/attachments/1/2/notes.txt");
        assert!(!file.is_image);
    }
}
