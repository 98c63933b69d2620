use crate::models::logs::{LogRecord, Message};
use crate::transcripts::groups::message_groups;
use std::fmt::{self, Write};

const SEPARATOR_UNIT: &str = "----------------";
const THREAD_TIME_FORMAT: &str = "%d %b %Y - %H:%M UTC";
const MESSAGE_TIME_FORMAT: &str = "%d/%m %H:%M";

fn separator<W: Write>(out: &mut W, units: usize) -> fmt::Result {
    writeln!(out, "{}", SEPARATOR_UNIT.repeat(units))
}

fn write_message<W: Write>(out: &mut W, message: &Message) -> fmt::Result {
    let role = match message.author.is_mod {
        true => "[M]",
        false => "[R]",
    };
    writeln!(
        out,
        "{} {role} {}: {}",
        message.created_at.format(MESSAGE_TIME_FORMAT),
        message.author,
        message.content
    )?;
    for attachment in &message.attachments {
        writeln!(out, "Attachment: {attachment}")?;
    }
    Ok(())
}

fn write_transcript<W: Write>(out: &mut W, log: &LogRecord) -> fmt::Result {
    writeln!(
        out,
        "Thread created at {}",
        log.created_at.format(THREAD_TIME_FORMAT)
    )?;
    if log.creator == log.recipient {
        writeln!(out, "[R] {} created a modmail thread.", log.creator)?;
    } else {
        writeln!(
            out,
            "[M] {} created a thread with [R] {}",
            log.creator, log.recipient
        )?;
    }
    separator(out, 3)?;

    let groups = message_groups(&log.messages);
    for (index, group) in groups.iter().enumerate() {
        for message in &group.messages {
            write_message(out, message)?;
        }
        // groups also split on time gaps and type changes; only a new author
        // gets a separator
        if let Some(next) = groups.get(index + 1) {
            if next.author != group.author {
                separator(out, 2)?;
            }
        }
    }

    if let (false, Some(closer), Some(closed_at)) = (log.open, &log.closer, log.closed_at) {
        if !log.messages.is_empty() {
            separator(out, 3)?;
        }
        writeln!(out, "[M] {closer} closed the modmail thread.")?;
        writeln!(out, "Thread closed at {}", closed_at.format(THREAD_TIME_FORMAT))?;
    }
    Ok(())
}

/// Plain text transcript, one newline terminated line per entry.
pub fn render_plain_text(log: &LogRecord) -> String {
    log.to_string()
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_transcript(f, self)
    }
}
