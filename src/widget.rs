//! Chat widget state — open flag, draft input, and the send cycle.
//!
//! DESIGN
//! ======
//! A send is split into `begin_send` (append the user message, clear the
//! draft) and `complete` (append the assistant message). The webhook call in
//! between does not borrow the widget, so a second send can start before the
//! first one resolves. Nothing orders completions: replies land in whatever
//! order their calls finish.

use tracing::{debug, info};

use crate::conversation::{Conversation, Message};
use crate::webhook::{ReplySource, SendOutcome};

/// Whether any send is awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
}

/// A send whose user message is in the conversation but whose reply is not.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending send must be completed to append its reply"]
pub struct PendingSend {
    text: String,
}

impl PendingSend {
    /// The text to hand to the webhook.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    is_open: bool,
    draft_input: String,
    conversation: Conversation,
    in_flight: usize,
}

impl WidgetState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        if self.is_open {
            return;
        }
        self.is_open = true;
        if self.conversation.ensure_greeting() {
            debug!("greeting injected");
        }
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Flip between open and closed, as the floating button does.
    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft_input
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_input = text.into();
    }

    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn phase(&self) -> SendPhase {
        if self.in_flight == 0 { SendPhase::Idle } else { SendPhase::Sending }
    }

    /// Start a send from the current draft.
    ///
    /// Returns `None` and changes nothing when the panel is closed or the
    /// draft is blank. Otherwise appends the user message verbatim, clears the
    /// draft, and returns the pending send.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        if !self.is_open || self.draft_input.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.draft_input);
        self.conversation.append(Message::user(text.clone()));
        self.in_flight += 1;
        info!(in_flight = self.in_flight, "chat message sent");
        Some(PendingSend { text })
    }

    /// Finish a send by appending the assistant message for `outcome`.
    pub fn complete(&mut self, pending: PendingSend, outcome: SendOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(sent_len = pending.text.len(), delivered = outcome.is_delivered(), "chat reply recorded");
        self.conversation.append(Message::assistant(outcome.into_text()));
    }

    /// Send the current draft through `source` and record the reply.
    ///
    /// Returns `false` when the panel was closed or the draft was blank.
    pub async fn submit<S: ReplySource + ?Sized>(&mut self, source: &S) -> bool {
        let Some(pending) = self.begin_send() else {
            return false;
        };
        let outcome = source.deliver(pending.text()).await;
        self.complete(pending, outcome);
        true
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;
