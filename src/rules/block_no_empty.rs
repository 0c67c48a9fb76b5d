//! Empty rule and at-rule blocks.

use super::Warning;
use crate::css::{Document, NodeKind};

pub const RULE: &str = "block-no-empty";

pub fn check(doc: &Document) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for id in doc.descendants() {
        let node = doc.node(id);
        let has_block = match &node.kind {
            NodeKind::Rule { .. } => true,
            NodeKind::AtRule { brace_line, .. } => brace_line.is_some(),
            _ => false,
        };
        if has_block && node.children.is_empty() {
            warnings.push(Warning {
                rule: RULE,
                node: id,
                line: node.start.line,
                message: "Unexpected empty block".to_string(),
            });
        }
    }
    warnings
}
