//! Plain-text rendering of the widget for the terminal front-end.

use std::fmt::Write;

use crate::conversation::{Message, Role};
use crate::widget::WidgetState;

pub const TITLE: &str = "✈️ SillyTakesOff Assistant";
pub const TEASER: &str = "💬 Hi! I’m your SillyTakesOff Assistant.";
pub const FOOTER: &str = "Powered by Uriel";
pub const PLACEHOLDER: &str = "Type your message...";

const RULE: &str = "────────────────────────────────────────";

/// One display line for a message.
#[must_use]
pub fn message_line(message: &Message) -> String {
    let label = match message.role() {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!("{label}: {}", message.text())
}

/// Render the whole widget: the teaser when closed, the panel when open.
#[must_use]
pub fn render(widget: &WidgetState) -> String {
    let mut out = String::new();
    if !widget.is_open() {
        let _ = writeln!(out, "{TEASER}");
        let _ = writeln!(out, "[/open to chat]");
        return out;
    }

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{RULE}");
    for message in widget.conversation() {
        let _ = writeln!(out, "{}", message_line(message));
    }
    let _ = writeln!(out, "{RULE}");
    let draft = widget.draft();
    if draft.is_empty() {
        let _ = writeln!(out, "> {PLACEHOLDER}");
    } else {
        let _ = writeln!(out, "> {draft}");
    }
    let _ = writeln!(out, "{FOOTER}");
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
