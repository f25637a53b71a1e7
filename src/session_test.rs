use super::*;
use crate::conversation::{GREETING, Message};
use crate::webhook::DeliveryError;
use crate::widget::SendPhase;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

// =========================================================================
// GatedSource
// =========================================================================

/// "first" blocks until "second" is sent; anything else echoes.
#[derive(Default)]
struct GatedSource {
    gate: Notify,
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ReplySource for GatedSource {
    async fn fetch_reply(&self, text: &str) -> Result<String, DeliveryError> {
        self.calls.lock().unwrap().push(text.to_owned());
        match text {
            "first" => {
                self.gate.notified().await;
                Ok("reply to first".into())
            }
            "second" => {
                self.gate.notify_one();
                Ok("reply to second".into())
            }
            "down" => Err(DeliveryError::Transport("refused".into())),
            other => Ok(format!("echo {other}")),
        }
    }
}

async fn run_script(widget: &mut WidgetState, source: &GatedSource, script: &str) -> String {
    let mut out = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), run(widget, source, script.as_bytes(), &mut out))
        .await
        .expect("session stalled")
        .unwrap();
    String::from_utf8(out).unwrap()
}

fn texts(widget: &WidgetState) -> Vec<&str> {
    widget.conversation().iter().map(Message::text).collect()
}

// =========================================================================
// parse_command
// =========================================================================

#[test]
fn parse_known_commands() {
    assert_eq!(parse_command("/open"), Command::Open);
    assert_eq!(parse_command(" /close "), Command::Close);
    assert_eq!(parse_command("/toggle"), Command::Toggle);
    assert_eq!(parse_command("/quit"), Command::Quit);
    assert_eq!(parse_command("/exit"), Command::Quit);
}

#[test]
fn parse_other_lines_are_said_verbatim() {
    assert_eq!(parse_command("  Book a flight "), Command::Say("  Book a flight "));
    assert_eq!(parse_command("/unknown"), Command::Say("/unknown"));
}

// =========================================================================
// run
// =========================================================================

#[tokio::test]
async fn input_keeps_flowing_while_reply_pending() {
    let source = GatedSource::default();
    let mut widget = WidgetState::new();

    run_script(&mut widget, &source, "/open\nfirst\nsecond\n").await;

    assert_eq!(texts(&widget), [GREETING, "first", "second", "reply to second", "reply to first"]);
    assert_eq!(widget.phase(), SendPhase::Idle);
}

#[tokio::test]
async fn simple_exchange_renders_reply() {
    let source = GatedSource::default();
    let mut widget = WidgetState::new();

    let output = run_script(&mut widget, &source, "/open\nBook a flight\n").await;

    assert_eq!(texts(&widget), [GREETING, "Book a flight", "echo Book a flight"]);
    assert!(output.contains("assistant: echo Book a flight"));
}

#[tokio::test]
async fn closed_panel_refuses_lines() {
    let source = GatedSource::default();
    let mut widget = WidgetState::new();

    let output = run_script(&mut widget, &source, "hello\n").await;

    assert!(output.contains(CLOSED_HINT));
    assert!(widget.conversation().is_empty());
    assert!(source.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_lines_send_nothing() {
    let source = GatedSource::default();
    let mut widget = WidgetState::new();

    run_script(&mut widget, &source, "/open\n\n   \n").await;

    assert_eq!(texts(&widget), [GREETING]);
    assert!(source.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transport_failure_shows_fallback() {
    let source = GatedSource::default();
    let mut widget = WidgetState::new();

    run_script(&mut widget, &source, "/open\ndown\n").await;

    assert_eq!(texts(&widget).last(), Some(&"❌ Error: Unable to connect to the server."));
}

#[tokio::test]
async fn quit_stops_reading() {
    let source = GatedSource::default();
    let mut widget = WidgetState::new();

    run_script(&mut widget, &source, "/open\n/quit\nafter\n").await;

    assert_eq!(texts(&widget), [GREETING]);
}

#[tokio::test]
async fn closing_does_not_drop_pending_reply() {
    let source = GatedSource::default();
    let mut widget = WidgetState::new();

    run_script(&mut widget, &source, "/open\nhi\n/close\n").await;

    assert!(!widget.is_open());
    assert_eq!(texts(&widget), [GREETING, "hi", "echo hi"]);
}
