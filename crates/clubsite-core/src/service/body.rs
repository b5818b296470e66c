//! Splits a project/news body into text and inline-image blocks.
//!
//! Bodies are plain text with Markdown-style image references
//! (`![alt](url)`). Everything else is kept verbatim.

use std::sync::LazyLock;

use clubsite_types::content::ContentBlock;
use regex::Regex;

static IMAGE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").expect("image reference pattern is valid")
});

/// Parse `content` into ordered blocks. Whitespace-only text between images
/// is dropped.
pub fn parse_body(content: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    for caps in IMAGE_REF.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut blocks, &content[cursor..whole.start()]);
        blocks.push(ContentBlock::Image {
            alt: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
            src: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
        });
        cursor = whole.end();
    }
    push_text(&mut blocks, &content[cursor..]);
    blocks
}

fn push_text(blocks: &mut Vec<ContentBlock>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        blocks.push(ContentBlock::Text {
            text: text.to_string(),
        });
    }
}
