//! Repeated properties within one declaration block.

use std::collections::HashSet;

use super::Warning;
use crate::css::{Document, NodeKind};

pub const RULE: &str = "declaration-block-no-duplicate-properties";

pub fn check(doc: &Document) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for id in doc.descendants() {
        let container = doc.node(id);
        let has_block = match &container.kind {
            NodeKind::Rule { .. } => true,
            NodeKind::AtRule { brace_line, .. } => brace_line.is_some(),
            _ => false,
        };
        if !has_block {
            continue;
        }

        let mut seen: HashSet<String> = HashSet::new();
        for &child in &container.children {
            let node = doc.node(child);
            let NodeKind::Declaration { prop, .. } = &node.kind else {
                continue;
            };
            // Custom properties may legitimately repeat
            if prop.starts_with("--") {
                continue;
            }
            let key = prop.to_ascii_lowercase();
            if !seen.insert(key) {
                warnings.push(Warning {
                    rule: RULE,
                    node: child,
                    line: node.start.line,
                    message: format!("Unexpected duplicate \"{}\"", prop),
                });
            }
        }
    }
    warnings
}
