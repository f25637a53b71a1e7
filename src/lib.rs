//! Floating chat widget that forwards user text to a webhook.
//!
//! DESIGN
//! ======
//! `conversation` holds the message history, `webhook` talks to the remote
//! endpoint and normalizes its reply, and `widget` ties the two together
//! behind the open/closed panel state. `render` draws the widget as text and
//! `session` drives it from line input.

pub mod conversation;
pub mod render;
pub mod session;
pub mod webhook;
pub mod widget;

pub use conversation::{Conversation, Message, Role};
pub use webhook::{DeliveryError, ReplySource, SendOutcome, WebhookClient, WebhookConfig};
pub use widget::{PendingSend, SendPhase, WidgetState};
