//! Reply markup parser.
//!
//! Assistant replies are plain text with two inline directives:
//!
//! - `[ACTION:MEMBERS]` becomes a link to the members page.
//! - `[BUTTON:<url>|<label>]` becomes a button. The separator is the last
//!   `|`; when there is none the last `:` is used instead, so
//!   `[BUTTON:/news/7:Oku]` works but `[BUTTON:http://host:8080]` splits
//!   at the port.
//!
//! Parsing never fails: text that does not form a complete directive is
//! left in the surrounding plain text.

use std::sync::LazyLock;

use clubsite_types::chat::ReplySegment;
use regex::Regex;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[ACTION:MEMBERS\]|\[BUTTON:([^\]]*)\]").expect("directive pattern is valid")
});

/// Split a reply into ordered segments.
///
/// The reply is trimmed first. Text between directives keeps its inner
/// whitespace; whitespace-only stretches are dropped.
pub fn parse_reply(reply: &str) -> Vec<ReplySegment> {
    let reply = reply.trim();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in DIRECTIVE.captures_iter(reply) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut segments, &reply[cursor..whole.start()]);
        segments.push(match caps.get(1) {
            Some(inner) => parse_button(inner.as_str()),
            None => ReplySegment::ActionLink,
        });
        cursor = whole.end();
    }
    push_text(&mut segments, &reply[cursor..]);
    segments
}

/// The reply with every directive removed.
pub fn plain_text(reply: &str) -> String {
    parse_reply(reply)
        .into_iter()
        .filter_map(|segment| match segment {
            ReplySegment::PlainText { text } => Some(text),
            _ => None,
        })
        .collect()
}

fn push_text(segments: &mut Vec<ReplySegment>, text: &str) {
    if !text.trim().is_empty() {
        segments.push(ReplySegment::PlainText {
            text: text.to_string(),
        });
    }
}

fn parse_button(inner: &str) -> ReplySegment {
    match inner.rfind('|').or_else(|| inner.rfind(':')) {
        Some(at) => {
            let url = inner[..at].trim();
            ReplySegment::Button {
                external: url.starts_with("http"),
                url: url.to_string(),
                label: inner[at + 1..].trim().to_string(),
            }
        }
        None => ReplySegment::Button {
            url: String::new(),
            label: inner.trim().to_string(),
            external: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ReplySegment {
        ReplySegment::PlainText {
            text: s.to_string(),
        }
    }

    fn button(url: &str, label: &str, external: bool) -> ReplySegment {
        ReplySegment::Button {
            url: url.to_string(),
            label: label.to_string(),
            external,
        }
    }

    #[test]
    fn test_no_directives_is_single_trimmed_segment() {
        assert_eq!(
            parse_reply("  Merhaba, nasıl yardımcı olabilirim?\n"),
            vec![text("Merhaba, nasıl yardımcı olabilirim?")]
        );
    }

    #[test]
    fn test_blank_reply_has_no_segments() {
        assert!(parse_reply("").is_empty());
        assert!(parse_reply(" \n\t ").is_empty());
    }

    #[test]
    fn test_members_action() {
        let segments =
            parse_reply("Web sitemizden tüm üyelerimizi inceleyebilirsiniz. [ACTION:MEMBERS]");
        assert_eq!(
            segments,
            vec![
                text("Web sitemizden tüm üyelerimizi inceleyebilirsiniz. "),
                ReplySegment::ActionLink,
            ]
        );
    }

    #[test]
    fn test_internal_and_external_buttons() {
        let segments = parse_reply(
            "Roket projemiz hazır. [BUTTON:/projects/42|Devamını Oku] Kayıt: [BUTTON:https://forms.example/kayit|Başvuru Yap]",
        );
        assert_eq!(
            segments,
            vec![
                text("Roket projemiz hazır. "),
                button("/projects/42", "Devamını Oku", false),
                text(" Kayıt: "),
                button("https://forms.example/kayit", "Başvuru Yap", true),
            ]
        );
    }

    #[test]
    fn test_pipe_wins_over_port_colon() {
        let segments = parse_reply("[BUTTON:https://example.com:8443/kayit|Kayıt Ol]");
        assert_eq!(
            segments,
            vec![button("https://example.com:8443/kayit", "Kayıt Ol", true)]
        );
    }

    #[test]
    fn test_colon_fallback_splits_at_last_colon() {
        assert_eq!(
            parse_reply("[BUTTON:/news/7:Oku]"),
            vec![button("/news/7", "Oku", false)]
        );
        assert_eq!(
            parse_reply("[BUTTON:https://example.com:Kayıt Ol]"),
            vec![button("https://example.com", "Kayıt Ol", true)]
        );
        // No pipe: a port number is taken as the label.
        assert_eq!(
            parse_reply("[BUTTON:http://localhost:8080]"),
            vec![button("http://localhost", "8080", true)]
        );
    }

    #[test]
    fn test_button_without_separator() {
        assert_eq!(
            parse_reply("[BUTTON:Devamını Oku]"),
            vec![button("", "Devamını Oku", false)]
        );
    }

    #[test]
    fn test_unterminated_directive_stays_text() {
        let segments = parse_reply("Detaylar için [BUTTON:/news/1|Oku");
        assert_eq!(segments, vec![text("Detaylar için [BUTTON:/news/1|Oku")]);
    }

    #[test]
    fn test_unknown_action_stays_text() {
        let segments = parse_reply("Bakınız [ACTION:EVENTS]");
        assert_eq!(segments, vec![text("Bakınız [ACTION:EVENTS]")]);
    }

    #[test]
    fn test_adjacent_directives_drop_whitespace_gaps() {
        let segments = parse_reply("[BUTTON:/projects/1|A] \n [BUTTON:/projects/2|B][ACTION:MEMBERS]");
        assert_eq!(
            segments,
            vec![
                button("/projects/1", "A", false),
                button("/projects/2", "B", false),
                ReplySegment::ActionLink,
            ]
        );
    }

    #[test]
    fn test_plain_text_removes_each_directive_once() {
        let reply = "Merhaba. [ACTION:MEMBERS] Daha fazlası [BUTTON:/news/1|Oku] son.";
        assert_eq!(plain_text(reply), "Merhaba.  Daha fazlası  son.");
    }

    #[test]
    fn test_reparsing_plain_text_finds_no_directives() {
        let reply = "Etkinlik yarın [BUTTON:https://x.example/form|Başvuru Yap] görüşmek üzere";
        let stripped = plain_text(reply);
        let reparsed = parse_reply(&stripped);
        assert_eq!(reparsed, vec![text(&stripped)]);
    }
}
