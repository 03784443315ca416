use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{node::Node, Html};

use crate::error::{Result, WatchError};

static TRAILING_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Extract the normalized text strictly between `start_marker` and
/// `end_marker` in the flattened page text.
///
/// The end marker is searched only after the start marker, so a page where
/// it appears solely before the start marker reports the end marker as
/// missing.
pub fn extract_section(html: &str, start_marker: &str, end_marker: &str) -> Result<String> {
    let flat = flatten(html);

    let start = flat
        .find(start_marker)
        .ok_or_else(|| WatchError::MarkerNotFound {
            marker: start_marker.to_string(),
        })?
        + start_marker.len();
    let end = flat[start..]
        .find(end_marker)
        .map(|i| start + i)
        .ok_or_else(|| WatchError::MarkerNotFound {
            marker: end_marker.to_string(),
        })?;

    let block = normalize(&flat[start..end]);
    if block.is_empty() {
        return Err(WatchError::EmptySection);
    }
    Ok(block)
}

/// Flatten markup to plain text: one trimmed, non-empty line per text
/// fragment, so every block-element boundary becomes a line break.
/// Script/style bodies and comments are dropped.
pub fn flatten(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines: Vec<String> = Vec::new();
    collect_text(document.tree.root(), &mut lines);
    lines.join("\n")
}

fn collect_text(node: NodeRef<Node>, lines: &mut Vec<String>) {
    match node.value() {
        Node::Element(el) if matches!(el.name(), "script" | "style") => return,
        Node::Comment(_) => return,
        Node::Text(text) => {
            let text: &str = text.as_ref();
            for line in text.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    lines.push(line.to_string());
                }
            }
            return;
        }
        _ => {}
    }
    for child in node.children() {
        collect_text(child, lines);
    }
}

/// Collapse cosmetic whitespace so formatting churn in the source page does
/// not register as a content change: strip trailing spaces/tabs before line
/// breaks, squeeze runs of 3+ line breaks down to one blank line, trim.
fn normalize(block: &str) -> String {
    let block = TRAILING_WS_RE.replace_all(block, "\n");
    let block = BLANK_RUN_RE.replace_all(&block, "\n\n");
    block.trim().to_string()
}

// ── Tests ──
