use crate::models::logs::{Message, User};
use chrono::TimeDelta;

const GROUP_WINDOW: TimeDelta = TimeDelta::seconds(60);

/// A run of consecutive messages sent by one author with one message type.
#[derive(Debug)]
pub struct MessageGroup<'a> {
    pub author: &'a User,
    pub message_type: &'a str,
    pub messages: Vec<&'a Message>,
}

impl<'a> MessageGroup<'a> {
    fn new(first: &'a Message) -> Self {
        Self {
            author: &first.author,
            message_type: &first.message_type,
            messages: Vec::new(),
        }
    }
}

fn is_different(current: &Message, next: &Message) -> bool {
    next.created_at - current.created_at > GROUP_WINDOW
        || next.author != current.author
        || next.message_type != current.message_type
}

/// Splits messages, in stored order, into groups. A message is compared with the
/// one after it; when they differ the current group ends with that message and
/// the next group starts from the following message's author.
pub fn message_groups(messages: &[Message]) -> Vec<MessageGroup<'_>> {
    let Some(first) = messages.first() else {
        return Vec::new();
    };

    let mut groups = Vec::new();
    let mut current = MessageGroup::new(first);
    for (index, message) in messages.iter().enumerate() {
        current.messages.push(message);
        let next = messages.get(index + 1).unwrap_or(message);
        if is_different(message, next) {
            groups.push(current);
            current = MessageGroup::new(next);
        }
    }
    groups.push(current);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::logs::DEFAULT_MESSAGE_TYPE;
    use chrono::{DateTime, TimeZone, Utc};

    fn user(id: i64, is_mod: bool) -> User {
        User {
            id,
            name: format!("user{id}"),
            discriminator: "0001".into(),
            avatar_url: None,
            is_mod,
        }
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 5, 12, 0, 0).unwrap() + TimeDelta::seconds(seconds)
    }

    fn message(id: i64, author: &User, seconds: i64) -> Message {
        Message {
            id,
            created_at: at(seconds),
            content: format!("message {id}"),
            attachments: vec![],
            author: author.clone(),
            message_type: DEFAULT_MESSAGE_TYPE.into(),
        }
    }

    fn ids(groups: &[MessageGroup<'_>]) -> Vec<Vec<i64>> {
        groups
            .iter()
            .map(|group| group.messages.iter().map(|m| m.id).collect())
            .collect()
    }

    #[test]
    fn no_messages_no_groups() {
        assert!(message_groups(&[]).is_empty());
    }

    #[test]
    fn same_author_within_window_is_one_group() {
        let a = user(1, false);
        let messages = vec![message(1, &a, 0), message(2, &a, 50), message(3, &a, 100)];
        let groups = message_groups(&messages);
        assert_eq!(ids(&groups), vec![vec![1, 2, 3]]);
        assert_eq!(groups[0].author, &a);
    }

    #[test]
    fn alternating_authors_split_on_adjacency() {
        let a = user(1, false);
        let b = user(2, true);
        let messages = vec![message(1, &a, 0), message(2, &b, 30), message(3, &a, 40)];
        let groups = message_groups(&messages);
        assert_eq!(ids(&groups), vec![vec![1], vec![2], vec![3]]);
        assert_eq!(groups[0].author, &a);
        assert_eq!(groups[1].author, &b);
        assert_eq!(groups[2].author, &a);
    }

    #[test]
    fn gap_over_a_minute_splits() {
        let a = user(1, false);
        let messages = vec![message(1, &a, 0), message(2, &a, 61)];
        assert_eq!(ids(&message_groups(&messages)), vec![vec![1], vec![2]]);
    }

    #[test]
    fn gap_of_exactly_a_minute_does_not_split() {
        let a = user(1, false);
        let messages = vec![message(1, &a, 0), message(2, &a, 60)];
        assert_eq!(ids(&message_groups(&messages)), vec![vec![1, 2]]);
    }

    #[test]
    fn mod_flag_alone_splits() {
        let as_recipient = user(1, false);
        let as_mod = user(1, true);
        let messages = vec![message(1, &as_recipient, 0), message(2, &as_mod, 5)];
        let groups = message_groups(&messages);
        assert_eq!(ids(&groups), vec![vec![1], vec![2]]);
        assert!(groups[1].author.is_mod);
    }

    #[test]
    fn type_change_splits() {
        let a = user(1, true);
        let mut note = message(2, &a, 5);
        note.message_type = "system".into();
        let messages = vec![message(1, &a, 0), note, message(3, &a, 10)];
        let groups = message_groups(&messages);
        assert_eq!(ids(&groups), vec![vec![1], vec![2], vec![3]]);
        assert_eq!(groups[1].message_type, "system");
    }

    #[test]
    fn boundary_message_ends_its_group() {
        let a = user(1, false);
        let b = user(2, true);
        let messages = vec![
            message(1, &a, 0),
            message(2, &a, 10),
            message(3, &b, 20),
            message(4, &b, 25),
        ];
        let groups = message_groups(&messages);
        assert_eq!(ids(&groups), vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(groups[1].author, &b);
    }
}
