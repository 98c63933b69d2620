//! Rendering of stored modmail threads into readable transcripts.
//!
//! Everything here is pure: the same [`LogRecord`](crate::models::logs::LogRecord)
//! always renders to the same output, so handlers can call into it without
//! any coordination.

pub mod groups;
pub mod html;
pub mod humanize;
pub mod markdown;
pub mod plain_text;

pub use groups::{MessageGroup, message_groups};
pub use html::render_html;
pub use plain_text::render_plain_text;
