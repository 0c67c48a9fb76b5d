//! Disable-comment placement.
//!
//! For every node with retained violations, ensure a disable comment
//! exists that covers all of its rule names:
//!
//! - If an adjacent disable comment is already present (the immediately
//!   preceding sibling, or a `stylelint-disable-line` comment on the
//!   node's own line), the new rule names are merged into it and its
//!   pragma token is kept as-is. Repeated runs converge to one comment
//!   instead of accumulating duplicates.
//! - Otherwise a new comment node is synthesized: appended after the node
//!   when the node shares its line with its parent's opening brace
//!   (`stylelint-disable-line`), inserted before the node on its own line
//!   otherwise (`stylelint-disable-next-line`).

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::css::{Document, Node, NodeId, NodeKind, Position};
use crate::directives::{DISABLE_LINE, DISABLE_NEXT_LINE};

/// Placement style of a disable comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pragma {
    /// Applies to the comment's own line.
    Line,
    /// Applies to the following line.
    NextLine,
}

impl Pragma {
    pub fn token(self) -> &'static str {
        match self {
            Self::Line => DISABLE_LINE,
            Self::NextLine => DISABLE_NEXT_LINE,
        }
    }
}

static DISABLE_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(stylelint-disable-line|stylelint-disable-next-line)\s+(.+)$")
        .expect("valid regex")
});

/// Parse `<pragma> rule1, rule2, ...` comment text.
///
/// A pragma keyword without a parsable rule list is not a disable comment
/// for placement purposes; callers fall through to synthesizing a fresh
/// one next to it.
pub fn parse_disable_comment(text: &str) -> Option<(Pragma, Vec<String>)> {
    let caps = DISABLE_COMMENT.captures(text.trim())?;
    let pragma = if &caps[1] == DISABLE_LINE {
        Pragma::Line
    } else {
        Pragma::NextLine
    };
    let rules: Vec<String> = caps[2]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if rules.is_empty() {
        return None;
    }
    Some((pragma, rules))
}

/// Insert or update disable comments for every flagged node.
///
/// `disables` is the side map from node id to the rule names to silence
/// on it. Mutations are local to each flagged node and never reorder
/// unrelated siblings. Returns the number of nodes annotated.
pub fn insert_disable_comments(
    doc: &mut Document,
    disables: &HashMap<NodeId, Vec<String>>,
) -> usize {
    let flagged: Vec<NodeId> = doc
        .descendants()
        .into_iter()
        .filter(|id| disables.contains_key(id))
        .collect();
    for &id in &flagged {
        annotate(doc, id, &disables[&id]);
    }
    flagged.len()
}

fn annotate(doc: &mut Document, id: NodeId, rules: &[String]) {
    let line = doc.node(id).start.line;

    // Merge path: an adjacent disable comment is authoritative, whatever
    // pragma it carries.
    if let Some(prev) = doc.prev_sibling(id)
        && merge_into(doc, prev, rules, None)
    {
        return;
    }
    // An inline disable-line comment sits after the node it governs.
    if let Some(next) = doc.next_sibling(id)
        && doc.node(next).start.line == line
        && merge_into(doc, next, rules, Some(Pragma::Line))
    {
        return;
    }

    let same_line = is_same_line(doc, id);
    let pragma = if same_line {
        Pragma::Line
    } else {
        Pragma::NextLine
    };
    let text = format!("{} {}", pragma.token(), join_rules(rules));

    if same_line {
        let comment = Node::comment(text, " ".to_string(), Position::new(line, 0));
        doc.insert_after(id, comment);
    } else {
        // The comment inherits the node's leading whitespace so it lands
        // on its own line with matching indentation.
        let before = doc.node(id).before.clone();
        let comment = Node::comment(text, before, Position::new(line, 0));
        doc.insert_before(id, comment);
        let node = doc.node_mut(id);
        if !node.before.contains('\n') {
            node.before = format!("\n{}", node.before);
        }
    }
}

/// Merge `rules` into `candidate` if it is a disable comment (with the
/// `required` pragma, when given). The existing pragma token and rule
/// order are preserved; new names are appended, deduplicated by trimmed
/// comparison.
fn merge_into(
    doc: &mut Document,
    candidate: NodeId,
    rules: &[String],
    required: Option<Pragma>,
) -> bool {
    let NodeKind::Comment { text, .. } = &doc.node(candidate).kind else {
        return false;
    };
    let Some((pragma, existing)) = parse_disable_comment(text) else {
        return false;
    };
    if let Some(required) = required
        && pragma != required
    {
        return false;
    }

    let mut merged = existing;
    for rule in rules {
        let rule = rule.trim();
        if !rule.is_empty() && !merged.iter().any(|r| r == rule) {
            merged.push(rule.to_string());
        }
    }
    doc.set_comment_text(candidate, format!("{} {}", pragma.token(), merged.join(", ")));
    true
}

/// A node is same-line when it starts on the line of its parent's opening
/// brace (single-line blocks).
fn is_same_line(doc: &Document, id: NodeId) -> bool {
    let node = doc.node(id);
    let Some(parent) = node.parent else {
        return false;
    };
    match &doc.node(parent).kind {
        NodeKind::Rule { brace_line, .. } => *brace_line == node.start.line,
        NodeKind::AtRule {
            brace_line: Some(brace_line),
            ..
        } => *brace_line == node.start.line,
        _ => false,
    }
}

fn join_rules(rules: &[String]) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for rule in rules {
        let rule = rule.trim();
        if !rule.is_empty() && !seen.contains(&rule) {
            seen.push(rule);
        }
    }
    seen.join(", ")
}
