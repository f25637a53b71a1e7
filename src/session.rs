//! Terminal session — line input driving a widget.
//!
//! DESIGN
//! ======
//! Each chat line starts a send with `begin_send` and parks its webhook call
//! in a `FuturesUnordered`. The loop selects between the next input line and
//! the next finished call, so input keeps flowing while replies are pending
//! and replies are recorded in the order they finish. At end of input the
//! remaining calls are drained; `/quit` abandons them.

use std::io::Write;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::render::render;
use crate::webhook::ReplySource;
use crate::widget::WidgetState;

pub const CLOSED_HINT: &str = "panel is closed; type /open first";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Open,
    Close,
    Toggle,
    Quit,
    Say(&'a str),
}

#[must_use]
pub fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "/open" => Command::Open,
        "/close" => Command::Close,
        "/toggle" => Command::Toggle,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Say(line),
    }
}

/// Run the line loop until input ends or `/quit`, writing a fresh render
/// after every change.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub async fn run<R, S, W>(widget: &mut WidgetState, source: &S, input: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    S: ReplySource + ?Sized,
    W: Write,
{
    let mut lines = input.lines();
    let mut replies = FuturesUnordered::new();
    write!(out, "{}", render(widget))?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Command::Open => widget.open(),
                    Command::Close => widget.close(),
                    Command::Toggle => widget.toggle(),
                    Command::Quit => return Ok(()),
                    Command::Say(text) => {
                        widget.set_draft(text);
                        let Some(pending) = widget.begin_send() else {
                            if !widget.is_open() {
                                writeln!(out, "{CLOSED_HINT}")?;
                            }
                            continue;
                        };
                        replies.push(async move {
                            let outcome = source.deliver(pending.text()).await;
                            (pending, outcome)
                        });
                    }
                }
            }
            Some((pending, outcome)) = replies.next(), if !replies.is_empty() => {
                widget.complete(pending, outcome);
            }
        }
        write!(out, "{}", render(widget))?;
    }

    debug!(pending = replies.len(), "input closed; draining replies");
    while let Some((pending, outcome)) = replies.next().await {
        widget.complete(pending, outcome);
        write!(out, "{}", render(widget))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
