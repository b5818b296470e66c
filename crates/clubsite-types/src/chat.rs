//! Chat-assistant types: turns, reply segments, and the HTTP wire shapes.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Route the `[ACTION:MEMBERS]` directive links to.
pub const MEMBERS_ROUTE: &str = "/members";

/// Label of the members call-to-action.
pub const MEMBERS_LINK_LABEL: &str = "Üyeleri Görüntüle";

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message in a chat session. Never mutated after creation.
///
/// Older clients send the text under `content`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    #[serde(alias = "content")]
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// One renderable piece of an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplySegment {
    /// Plain text, internal newlines preserved.
    PlainText { text: String },
    /// Call-to-action link to the members page.
    ActionLink,
    /// A labelled button. `url` is empty when the directive was malformed.
    Button {
        url: String,
        label: String,
        external: bool,
    },
}

impl ReplySegment {
    /// Target of a link-like segment, `None` for plain text.
    pub fn href(&self) -> Option<&str> {
        match self {
            ReplySegment::PlainText { .. } => None,
            ReplySegment::ActionLink => Some(MEMBERS_ROUTE),
            ReplySegment::Button { url, .. } => Some(url),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<Turn>,
}

/// Successful response of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub segments: Vec<ReplySegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_accepts_content_alias() {
        let turn: Turn = serde_json::from_str(r#"{"role":"assistant","content":"Merhaba"}"#).unwrap();
        assert_eq!(turn, Turn::assistant("Merhaba"));
    }

    #[test]
    fn test_turn_serializes_text() {
        let json = serde_json::to_value(Turn::user("Selam")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["text"], "Selam");
    }

    #[test]
    fn test_chat_request_history_defaults_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"Projelerimiz neler?"}"#).unwrap();
        assert_eq!(req.message.as_deref(), Some("Projelerimiz neler?"));
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_reply_segment_tagging() {
        let seg = ReplySegment::Button {
            url: "/news/1".to_string(),
            label: "Devamını Oku".to_string(),
            external: false,
        };
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["type"], "button");
        assert_eq!(json["external"], false);
        assert_eq!(ReplySegment::ActionLink.href(), Some("/members"));
    }

    #[test]
    fn test_turn_role_parse() {
        assert_eq!("Assistant".parse::<TurnRole>().unwrap(), TurnRole::Assistant);
        assert!("system".parse::<TurnRole>().is_err());
    }
}
