//! Hand-rolled lossless CSS/SCSS parser.
//!
//! Produces the [`Document`] tree with all inter-node whitespace captured
//! in node raws, so `parse(s)?.to_css() == s` for any accepted input.
//! The grammar is the postcss-level one: rules, at-rules, declarations,
//! block comments and SCSS `//` comments. Value- and selector-level
//! syntax is kept as raw text.

use std::fmt;

use super::node::{Document, Node, NodeId, NodeKind, Position};

/// Syntax error with a 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    fn new(pos: Position, message: impl Into<String>) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse a CSS/SCSS source into a [`Document`].
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut parser = Parser {
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
        column: 1,
        doc: Document::new(),
    };
    let root = parser.doc.root();
    let after = parser.parse_nodes(root, false)?;
    if let NodeKind::Root { after: a } = &mut parser.doc.node_mut(root).kind {
        *a = after;
    }
    Ok(parser.doc)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    doc: Document,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn take_whitespace(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
            out.push(c);
        }
        out
    }

    /// Parse child nodes of `parent` until `}` (inside a block) or EOF.
    ///
    /// Returns the trailing whitespace collected before the terminator;
    /// the closing brace itself is left unconsumed for the caller.
    fn parse_nodes(&mut self, parent: NodeId, in_block: bool) -> Result<String, ParseError> {
        loop {
            let before = self.take_whitespace();
            match self.peek() {
                None => {
                    if in_block {
                        return Err(ParseError::new(self.position(), "Unclosed block"));
                    }
                    return Ok(before);
                }
                Some('}') if in_block => return Ok(before),
                Some('}') => {
                    return Err(ParseError::new(self.position(), "Unexpected closing brace"));
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.parse_block_comment(parent, before)?;
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    self.parse_inline_comment(parent, before);
                }
                Some('@') => self.parse_at_rule(parent, before)?,
                Some(_) => self.parse_rule_or_declaration(parent, before)?,
            }
        }
    }

    fn parse_block_comment(&mut self, parent: NodeId, before: String) -> Result<(), ParseError> {
        let start = self.position();
        self.bump();
        self.bump();
        let mut inner = String::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::new(start, "Unclosed comment")),
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    break;
                }
                Some(c) => {
                    self.bump();
                    inner.push(c);
                }
            }
        }
        let (text, left, right) = split_padding(&inner);
        self.doc.append_child(
            parent,
            Node {
                kind: NodeKind::Comment {
                    text,
                    left,
                    right,
                    inline: false,
                },
                parent: None,
                children: Vec::new(),
                before,
                start,
            },
        );
        Ok(())
    }

    fn parse_inline_comment(&mut self, parent: NodeId, before: String) {
        let start = self.position();
        self.bump();
        self.bump();
        let mut inner = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
            inner.push(c);
        }
        let (text, left, right) = split_padding(&inner);
        self.doc.append_child(
            parent,
            Node {
                kind: NodeKind::Comment {
                    text,
                    left,
                    right,
                    inline: true,
                },
                parent: None,
                children: Vec::new(),
                before,
                start,
            },
        );
    }

    fn parse_at_rule(&mut self, parent: NodeId, before: String) -> Result<(), ParseError> {
        let start = self.position();
        self.bump();
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.bump();
                name.push(c);
            } else {
                break;
            }
        }
        let after_name = self.take_whitespace();
        let raw = self.scan_raw(&['{', ';', '}'])?;
        let (params, between) = split_trailing_ws(&raw);

        match self.peek() {
            Some('{') => {
                let brace_line = self.line;
                let id = self.doc.append_child(
                    parent,
                    Node {
                        kind: NodeKind::AtRule {
                            name,
                            after_name,
                            params,
                            between,
                            after: String::new(),
                            brace_line: Some(brace_line),
                            semicolon: false,
                        },
                        parent: None,
                        children: Vec::new(),
                        before,
                        start,
                    },
                );
                self.bump();
                let after = self.parse_nodes(id, true)?;
                self.bump();
                if let NodeKind::AtRule { after: a, .. } = &mut self.doc.node_mut(id).kind {
                    *a = after;
                }
            }
            terminator => {
                let semicolon = terminator == Some(';');
                if semicolon {
                    self.bump();
                }
                self.doc.append_child(
                    parent,
                    Node {
                        kind: NodeKind::AtRule {
                            name,
                            after_name,
                            params,
                            between,
                            after: String::new(),
                            brace_line: None,
                            semicolon,
                        },
                        parent: None,
                        children: Vec::new(),
                        before,
                        start,
                    },
                );
            }
        }
        Ok(())
    }

    fn parse_rule_or_declaration(
        &mut self,
        parent: NodeId,
        before: String,
    ) -> Result<(), ParseError> {
        let start = self.position();
        let raw = self.scan_raw(&['{', ';', '}'])?;

        match self.peek() {
            Some('{') => {
                let (selector, between) = split_trailing_ws(&raw);
                let brace_line = self.line;
                let id = self.doc.append_child(
                    parent,
                    Node {
                        kind: NodeKind::Rule {
                            selector,
                            between,
                            after: String::new(),
                            brace_line,
                        },
                        parent: None,
                        children: Vec::new(),
                        before,
                        start,
                    },
                );
                self.bump();
                let after = self.parse_nodes(id, true)?;
                self.bump();
                if let NodeKind::Rule { after: a, .. } = &mut self.doc.node_mut(id).kind {
                    *a = after;
                }
            }
            terminator => {
                let semicolon = terminator == Some(';');
                if semicolon {
                    self.bump();
                }
                self.push_declaration(parent, before, start, &raw, semicolon)?;
            }
        }
        Ok(())
    }

    fn push_declaration(
        &mut self,
        parent: NodeId,
        before: String,
        start: Position,
        raw: &str,
        semicolon: bool,
    ) -> Result<(), ParseError> {
        let Some(colon) = raw.find(':') else {
            return Err(ParseError::new(
                start,
                format!("Unknown word \"{}\"", raw.trim()),
            ));
        };
        let prop_part = &raw[..colon];
        let prop = prop_part.trim_end();
        if prop.is_empty() {
            return Err(ParseError::new(
                start,
                format!("Unknown word \"{}\"", raw.trim()),
            ));
        }
        let ws_before_colon = &prop_part[prop.len()..];
        let value_part = &raw[colon + 1..];
        let value = value_part.trim_start();
        let ws_after_colon = &value_part[..value_part.len() - value.len()];

        self.doc.append_child(
            parent,
            Node {
                kind: NodeKind::Declaration {
                    prop: prop.to_string(),
                    between: format!("{}:{}", ws_before_colon, ws_after_colon),
                    value: value.to_string(),
                    semicolon,
                },
                parent: None,
                children: Vec::new(),
                before,
                start,
            },
        );
        Ok(())
    }

    /// Collect raw text until one of `stops` at nesting depth zero.
    ///
    /// Quoted strings, parenthesized groups, and block comments are
    /// consumed whole; stop characters inside them do not terminate the
    /// scan. The stop character itself is left unconsumed.
    fn scan_raw(&mut self, stops: &[char]) -> Result<String, ParseError> {
        let mut out = String::new();
        let mut paren_depth = 0usize;
        loop {
            let Some(c) = self.peek() else {
                return Ok(out);
            };
            match c {
                '"' | '\'' => self.scan_string_into(&mut out)?,
                '(' => {
                    paren_depth += 1;
                    self.bump();
                    out.push(c);
                }
                ')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.bump();
                    out.push(c);
                }
                '/' if self.peek_at(1) == Some('*') => self.scan_comment_into(&mut out)?,
                _ if paren_depth == 0 && stops.contains(&c) => return Ok(out),
                _ => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    fn scan_string_into(&mut self, out: &mut String) -> Result<(), ParseError> {
        let start = self.position();
        let Some(quote) = self.bump() else {
            return Ok(());
        };
        out.push(quote);
        loop {
            match self.peek() {
                None => return Err(ParseError::new(start, "Unclosed string")),
                Some('\\') => {
                    self.bump();
                    out.push('\\');
                    if let Some(escaped) = self.peek() {
                        self.bump();
                        out.push(escaped);
                    }
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                    if c == quote {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn scan_comment_into(&mut self, out: &mut String) -> Result<(), ParseError> {
        let start = self.position();
        self.bump();
        self.bump();
        out.push_str("/*");
        loop {
            match self.peek() {
                None => return Err(ParseError::new(start, "Unclosed comment")),
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    out.push_str("*/");
                    return Ok(());
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }
}

/// Split comment inner text into (trimmed text, left padding, right padding).
fn split_padding(inner: &str) -> (String, String, String) {
    let text = inner.trim();
    let left_len = inner.len() - inner.trim_start().len();
    let left = inner[..left_len].to_string();
    let right = if text.is_empty() {
        String::new()
    } else {
        inner[left_len + text.len()..].to_string()
    };
    (text.to_string(), left, right)
}

fn split_trailing_ws(raw: &str) -> (String, String) {
    let trimmed = raw.trim_end();
    (trimmed.to_string(), raw[trimmed.len()..].to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn roundtrip(source: &str) {
        let doc = parse(source).unwrap();
        assert_eq!(doc.to_css(), source);
    }

    #[test]
    fn test_roundtrip_simple_rule() {
        roundtrip("a { color: red; }");
    }

    #[test]
    fn test_roundtrip_multiline() {
        roundtrip("a,\nb {\n  color: red;\n  margin: 0\n}\n");
    }

    #[test]
    fn test_roundtrip_comments() {
        roundtrip("/* header */\na { color: red; /* inline */ }\n/* trailing */\n");
    }

    #[test]
    fn test_roundtrip_scss_inline_comment() {
        roundtrip("// note\na {\n  color: red; // why\n}\n");
    }

    #[test]
    fn test_roundtrip_at_rules() {
        roundtrip("@import \"foo.css\";\n@media (min-width: 10px) {\n  a { margin: 0 }\n}\n");
    }

    #[test]
    fn test_roundtrip_nested_rules() {
        roundtrip(".a {\n  .b {\n    color: red;\n  }\n}\n");
    }

    #[test]
    fn test_roundtrip_string_with_delimiters() {
        roundtrip("a { content: \"};{\"; background: url(img;1.png); }");
    }

    #[test]
    fn test_roundtrip_empty_and_whitespace() {
        roundtrip("");
        roundtrip("\n\n");
        roundtrip("a {}\n");
    }

    #[test]
    fn test_declaration_fields() {
        let doc = parse("a { color : red ; }").unwrap();
        let decl = doc
            .descendants()
            .into_iter()
            .find(|&id| matches!(doc.node(id).kind, NodeKind::Declaration { .. }))
            .unwrap();
        match &doc.node(decl).kind {
            NodeKind::Declaration {
                prop,
                between,
                value,
                semicolon,
            } => {
                assert_eq!(prop, "color");
                assert_eq!(between, " : ");
                assert_eq!(value, "red ");
                assert!(*semicolon);
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_positions_and_brace_line() {
        let doc = parse("a,\nb {\n  color: red;\n}").unwrap();
        let ids = doc.descendants();
        let rule = ids[0];
        match &doc.node(rule).kind {
            NodeKind::Rule { brace_line, .. } => assert_eq!(*brace_line, 2),
            other => panic!("expected rule, got {:?}", other),
        }
        assert_eq!(doc.node(rule).start, Position::new(1, 1));

        let decl = ids[1];
        assert_eq!(doc.node(decl).start, Position::new(3, 3));
    }

    #[test]
    fn test_single_line_rule_brace_line_matches_decl() {
        let doc = parse("a { color: red; }").unwrap();
        let ids = doc.descendants();
        let (rule, decl) = (ids[0], ids[1]);
        let NodeKind::Rule { brace_line, .. } = &doc.node(rule).kind else {
            panic!("expected rule");
        };
        assert_eq!(*brace_line, doc.node(decl).start.line);
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("a { color: red;").unwrap_err();
        assert_eq!(err.message, "Unclosed block");
    }

    #[test]
    fn test_unclosed_comment() {
        let err = parse("/* never ends").unwrap_err();
        assert_eq!(err.message, "Unclosed comment");
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_unclosed_string() {
        let err = parse("a { content: \"oops; }").unwrap_err();
        assert_eq!(err.message, "Unclosed string");
    }

    #[test]
    fn test_unknown_word() {
        let err = parse("a { nonsense }").unwrap_err();
        assert!(err.message.contains("Unknown word"));
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = parse("}").unwrap_err();
        assert_eq!(err.message, "Unexpected closing brace");
    }
}
