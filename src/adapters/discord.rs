use crate::common::error::ServiceResult;
use discord_webhook2::message::Message;
use discord_webhook2::webhook::DiscordWebhook;
use iso8061_timestamp::Timestamp;

const INFO_COLOR: u32 = 0x7289DA;
const SUCCESS_COLOR: u32 = 0x43B581;
const WARN_COLOR: u32 = 0xFAA61A;
const ERROR_COLOR: u32 = 0xF04747;

/// Longest error text forwarded to the channel.
pub const MAX_ERROR_LENGTH: usize = 1000;

pub async fn server_started(webhook: Option<&DiscordWebhook>, domain: &str) -> ServiceResult<()> {
    send(webhook, "Server Started", &format!("`{domain}` is up."), None, SUCCESS_COLOR).await
}

pub async fn server_stopped(webhook: Option<&DiscordWebhook>, domain: &str) -> ServiceResult<()> {
    send(webhook, "Server Stopped", &format!("`{domain}` is shutting down."), None, WARN_COLOR)
        .await
}

pub async fn server_updating(webhook: Option<&DiscordWebhook>, domain: &str) -> ServiceResult<()> {
    let description = format!("Received a push, pulling and restarting `{domain}`.");
    send(webhook, "Server Update", &description, None, INFO_COLOR).await
}

pub async fn server_error(
    webhook: Option<&DiscordWebhook>,
    method: &str,
    url: &str,
    error: &str,
) -> ServiceResult<()> {
    let error = truncate(error, MAX_ERROR_LENGTH);
    let description = format!("`{method} {url}`\n```\n{error}\n```");
    send(webhook, "Unexpected Error", &description, None, ERROR_COLOR).await
}

/// Cuts `text` to at most `max` bytes on a character boundary.
pub fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

pub async fn send(
    webhook: Option<&DiscordWebhook>,
    title: &str,
    description: &str,
    url: Option<&str>,
    color: u32,
) -> ServiceResult<()> {
    let Some(webhook) = webhook else {
        tracing::warn!(title, description, url, "Discord Webhook url not set");
        return Ok(());
    };

    webhook
        .send(&Message::new(|message| {
            message.embed(|embed| {
                embed
                    .description(description)
                    .author(|author| {
                        let author = author.name(title);
                        match url {
                            Some(url) => author.url(url),
                            None => author,
                        }
                    })
                    .color(color)
                    .footer(|footer| footer.text("modmail.tk"))
                    .timestamp(Timestamp::now_utc())
            })
        }))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc");
        // 'é' is two bytes, cutting inside it backs off
        assert_eq!(truncate("aé", 2), "a");
    }

    #[tokio::test]
    async fn missing_webhook_is_not_an_error() {
        assert!(server_started(None, "modmail.tk").await.is_ok());
    }
}
