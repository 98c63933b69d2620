use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, html};

const MENTIONS: [&str; 2] = ["@everyone", "@here"];
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];
const BLOCKED_DESTINATION: &str = "#";

fn markdown_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

/// Keeps link and image targets with an allowed scheme, anything else
/// (including scheme-less targets) points nowhere. Email autolinks get their
/// `mailto:` prefix from the writer.
fn safe_destination(link_type: LinkType, dest_url: CowStr<'_>) -> CowStr<'_> {
    if link_type == LinkType::Email {
        return dest_url;
    }
    let allowed = dest_url
        .split_once(':')
        .map(|(scheme, _)| SAFE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    match allowed {
        true => dest_url,
        false => CowStr::Borrowed(BLOCKED_DESTINATION),
    }
}

fn next_mention(text: &str) -> Option<(usize, &'static str)> {
    MENTIONS
        .iter()
        .filter_map(|mention| text.find(mention).map(|index| (index, *mention)))
        .min_by_key(|(index, _)| *index)
}

/// Splits text around mass mentions so only the mention is wrapped in markup.
fn mention_events(text: CowStr<'_>) -> Vec<Event<'_>> {
    if next_mention(&text).is_none() {
        return vec![Event::Text(text)];
    }
    let mut events = Vec::new();
    let mut rest: &str = &text;
    while let Some((index, mention)) = next_mention(rest) {
        if index > 0 {
            events.push(Event::Text(CowStr::from(rest[..index].to_owned())));
        }
        let span = format!(r#"<span class="mention">{mention}</span>"#);
        events.push(Event::Html(CowStr::from(span)));
        rest = &rest[index + mention.len()..];
    }
    if !rest.is_empty() {
        events.push(Event::Text(CowStr::from(rest.to_owned())));
    }
    events
}

/// Message content as an HTML fragment. Raw HTML in the source is escaped,
/// link targets are limited to web and mail schemes, a lone wrapping
/// paragraph is dropped and newlines become line breaks.
pub fn sanitize(content: &str) -> String {
    let events = Parser::new_ext(content, markdown_options()).flat_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) | Event::Text(raw) => mention_events(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => vec![Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(link_type, dest_url),
            title,
            id,
        })],
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => vec![Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(link_type, dest_url),
            title,
            id,
        })],
        event => vec![event],
    });
    let mut rendered = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut rendered, events);

    let rendered = rendered.trim_end();
    let fragment = match rendered
        .strip_prefix("<p>")
        .and_then(|inner| inner.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner,
        _ => rendered,
    };
    fragment.replace('\n', "<br>")
}
