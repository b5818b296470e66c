//! Client-side chat session state.
//!
//! Models the floating chat widget: a panel that is open or closed, a
//! transcript seeded with a greeting, and at most one request in flight.
//! The server keeps no chat state; each request carries its own history.

use clubsite_types::chat::{Turn, TurnRole};
use serde::Serialize;

/// Greeting every session starts with.
pub const GREETING: &str =
    "Merhaba! Ben TeknoAsistan. Kulübümüz hakkında merak ettiğiniz her şeyi bana sorabilirsiniz.";

/// Shown when the server answered with an error status.
pub const ERROR_RESPONSE_REPLY: &str = "Üzgünüm, bir hata oluştu. Lütfen tekrar deneyin.";

/// Shown when the request never got a response.
pub const CONNECTION_ERROR_REPLY: &str = "Bağlantı hatası oluştu.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

/// How an in-flight request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Reply(String),
    ErrorResponse,
    ConnectionError,
}

/// Body of the request sent for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundChat {
    pub message: String,
    pub history: Vec<Turn>,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    panel: PanelState,
    turns: Vec<Turn>,
    pending: bool,
    history_window: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(GREETING, 6)
    }
}

impl ChatSession {
    /// A closed session whose transcript holds only `greeting`.
    pub fn new(greeting: impl Into<String>, history_window: usize) -> Self {
        Self {
            panel: PanelState::Closed,
            turns: vec![Turn::assistant(greeting)],
            pending: false,
            history_window,
        }
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn is_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Open a closed panel or close an open one. The transcript survives.
    pub fn toggle(&mut self) {
        self.panel = match self.panel {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        };
    }

    /// A click outside the panel closes it.
    pub fn outside_click(&mut self) {
        self.panel = PanelState::Closed;
    }

    /// Whether `input` would be accepted by [`ChatSession::submit`].
    pub fn can_submit(&self, input: &str) -> bool {
        !self.pending && !input.trim().is_empty()
    }

    /// Append the user turn and produce the request to send.
    ///
    /// Returns `None` (and changes nothing) for blank input or while a
    /// request is pending. `history` holds the turns before this one, cut to
    /// the history window.
    pub fn submit(&mut self, input: &str) -> Option<OutboundChat> {
        if !self.can_submit(input) {
            return None;
        }
        let message = input.trim().to_string();
        let start = self.turns.len().saturating_sub(self.history_window);
        let history = self.turns[start..].to_vec();

        self.turns.push(Turn::user(message.clone()));
        self.pending = true;
        Some(OutboundChat { message, history })
    }

    /// Record the outcome of the pending request as one assistant turn.
    ///
    /// Ignored when nothing is pending, so each submission yields exactly
    /// one assistant turn.
    pub fn complete(&mut self, outcome: TurnOutcome) -> Option<&Turn> {
        if !self.pending {
            return None;
        }
        let text = match outcome {
            TurnOutcome::Reply(text) => text,
            TurnOutcome::ErrorResponse => ERROR_RESPONSE_REPLY.to_string(),
            TurnOutcome::ConnectionError => CONNECTION_ERROR_REPLY.to_string(),
        };
        self.turns.push(Turn::assistant(text));
        self.pending = false;
        self.turns.last()
    }

    /// Most recent assistant turn, if any.
    pub fn last_reply(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == TurnRole::Assistant)
    }
}
