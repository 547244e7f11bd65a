//! Trivia-preserving parser for JSON-with-comments documents
//!
//! The scanner accumulates whitespace and comments into a pending buffer as
//! it advances. When a semantic node begins it takes the buffer as its
//! leading trivia; when it finishes, the run up to the next structural token
//! becomes its trailing trivia. Nothing is dropped, so an unmodified tree
//! prints back byte-for-byte.
//!
//! Any malformed input fails immediately with a [`ParseError`]; no partial
//! tree is ever returned and no recovery is attempted.

use std::fmt;

use super::node::{Comment, CommentKind, Node, NodeKind, Trivia};
use crate::error::NoriError;
use crate::result::Result;

/// A syntax error with enough context to point at the offending byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong
    pub message: String,
    /// Byte offset into the source
    pub offset: usize,
    /// The source line containing the offset
    pub line: String,
    /// Character column of the offset within that line
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize, source: &str) -> Self {
        let clamped = offset.min(source.len());
        let line_start = source[..clamped].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = source[line_start..]
            .find('\n')
            .map(|i| line_start + i)
            .unwrap_or(source.len());
        let line = source[line_start..line_end].to_string();
        let column = source[line_start..clamped.min(line_end)].chars().count();
        Self {
            message: message.into(),
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON parsing failed\n{}\n  {}^ {}",
            self.line,
            " ".repeat(self.column),
            self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse a JSONC document into its concrete syntax tree.
///
/// The root must be an object; a bare scalar or array at the top level is
/// rejected, as is anything left over after the root's trailing trivia.
///
/// # Example
///
/// ```
/// use nori_core::cst::{parse, stringify};
///
/// let source = "{\"retries\": 3 /* per host */}";
/// let tree = parse(source).unwrap();
/// assert_eq!(stringify(&tree).unwrap(), source);
/// ```
pub fn parse(input: &str) -> Result<Node> {
    Parser::new(input).parse_document()
}

/// Character scanner with a pending-trivia buffer
struct Parser<'a> {
    input: &'a str,
    pos: usize,
    pending: Vec<Trivia>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: Vec::new(),
        }
    }

    fn parse_document(mut self) -> Result<Node> {
        self.consume_trivia()?;
        let root = self.parse_object()?;
        // The root's trailing trivia has been consumed; anything left is
        // garbage after the document.
        if let Some(c) = self.peek_char() {
            return Err(self.raise(format!("Unexpected {c}")));
        }
        Ok(root)
    }

    /// Current character, or an error at end of input
    fn cur(&self) -> Result<char> {
        self.peek_char()
            .ok_or_else(|| self.raise("Unexpected end of input"))
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    /// Consume `expected` or fail
    fn eat(&mut self, expected: char) -> Result<()> {
        let c = self.cur()?;
        if c != expected {
            return Err(self.raise(format!(
                "Unexpected {c} at position {} (expected {expected})",
                self.pos
            )));
        }
        self.bump(c);
        Ok(())
    }

    /// Consume `expected` if it is current; end of input is still an error
    fn eat_opt(&mut self, expected: char) -> Result<bool> {
        let c = self.cur()?;
        if c == expected {
            self.bump(c);
            return Ok(true);
        }
        Ok(false)
    }

    /// Consume one character out of `set` if current
    fn skip_any(&mut self, set: &str) -> Result<bool> {
        let c = self.cur()?;
        if set.contains(c) {
            self.bump(c);
            return Ok(true);
        }
        Ok(false)
    }

    fn raise(&self, message: impl Into<String>) -> NoriError {
        self.raise_at(message, self.pos)
    }

    fn raise_at(&self, message: impl Into<String>, offset: usize) -> NoriError {
        NoriError::Parse(ParseError::new(message, offset, self.input))
    }

    fn take_pending(&mut self) -> Vec<Trivia> {
        std::mem::take(&mut self.pending)
    }

    /// Accumulate whitespace runs and comments into the pending buffer until
    /// the next structural character (or end of input).
    fn consume_trivia(&mut self) -> Result<()> {
        while let Some(c) = self.peek_char() {
            if is_whitespace(c) {
                let start = self.pos;
                while let Some(c) = self.peek_char() {
                    if !is_whitespace(c) {
                        break;
                    }
                    self.bump(c);
                }
                self.pending
                    .push(Trivia::Whitespace(self.input[start..self.pos].to_string()));
            } else if c == '/' {
                self.eat('/')?;
                if self.eat_opt('/')? {
                    // Line comment: runs to end of line, the newline itself
                    // belongs to the following whitespace run
                    let start = self.pos;
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump(c);
                    }
                    let body = &self.input[start..self.pos];
                    self.pending.push(Trivia::Comment(Comment {
                        kind: CommentKind::Line,
                        raw: format!("//{body}"),
                        text: body.trim().to_string(),
                    }));
                } else {
                    self.eat('*')?;
                    let start = self.pos;
                    loop {
                        let mut ahead = self.input[self.pos..].chars();
                        if ahead.next() == Some('*') && ahead.next() == Some('/') {
                            break;
                        }
                        let c = self.cur()?;
                        self.bump(c);
                    }
                    let body = &self.input[start..self.pos];
                    self.pos += 2;
                    self.pending.push(Trivia::Comment(Comment {
                        kind: CommentKind::Block,
                        raw: format!("/*{body}*/"),
                        text: body.trim().to_string(),
                    }));
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Node> {
        self.consume_trivia()?;
        let c = self.cur()?;
        match c {
            '{' => self.parse_object(),
            '[' => self.parse_array(),
            '"' => self.parse_string(),
            '+' | '-' => self.parse_number(),
            'n' => self.parse_literal("null", NodeKind::Null),
            't' => self.parse_literal("true", NodeKind::Bool { value: true }),
            'f' => self.parse_literal("false", NodeKind::Bool { value: false }),
            c if c.is_ascii_digit() => self.parse_number(),
            c => Err(self.raise(format!("Unexpected {c}"))),
        }
    }

    fn parse_object(&mut self) -> Result<Node> {
        let leading = self.take_pending();
        self.eat('{')?;
        let mut properties = Vec::new();
        while self.cur()? != '}' {
            self.consume_trivia()?;
            let prop_leading = self.take_pending();
            let key = self.parse_string()?;
            self.eat(':')?;
            let value = self.parse_value()?;
            if self.cur()? != '}' {
                self.eat(',')?;
            }
            self.consume_trivia()?;
            let prop_trailing = self.take_pending();
            properties.push(Node {
                kind: NodeKind::Property {
                    key: Box::new(key),
                    value: Box::new(value),
                },
                leading: prop_leading,
                trailing: prop_trailing,
            });
        }
        self.eat('}')?;
        self.consume_trivia()?;
        let trailing = self.take_pending();
        Ok(Node {
            kind: NodeKind::Object { properties },
            leading,
            trailing,
        })
    }

    fn parse_array(&mut self) -> Result<Node> {
        let leading = self.take_pending();
        self.eat('[')?;
        let mut elements = Vec::new();
        while self.cur()? != ']' {
            self.consume_trivia()?;
            let elem_leading = self.take_pending();
            let value = self.parse_value()?;
            if self.cur()? != ']' {
                self.eat(',')?;
            }
            self.consume_trivia()?;
            let elem_trailing = self.take_pending();
            elements.push(Node {
                kind: NodeKind::Element {
                    value: Box::new(value),
                },
                leading: elem_leading,
                trailing: elem_trailing,
            });
        }
        self.eat(']')?;
        self.consume_trivia()?;
        let trailing = self.take_pending();
        Ok(Node {
            kind: NodeKind::Array { elements },
            leading,
            trailing,
        })
    }

    fn parse_string(&mut self) -> Result<Node> {
        let leading = self.take_pending();
        self.eat('"')?;
        let start = self.pos;
        let mut escaped = false;
        loop {
            let c = self.cur()?;
            if c == '"' && !escaped {
                break;
            }
            // An escaped quote does not terminate the string; the toggle
            // resets after each consumed character
            escaped = c == '\\' && !escaped;
            self.bump(c);
        }
        let value = self.input[start..self.pos].to_string();
        self.eat('"')?;
        self.consume_trivia()?;
        let trailing = self.take_pending();
        Ok(Node {
            kind: NodeKind::String { value },
            leading,
            trailing,
        })
    }

    fn parse_number(&mut self) -> Result<Node> {
        let leading = self.take_pending();
        let start = self.pos;
        self.skip_any("+-")?;
        self.read_digits()?;
        if self.skip_any(".")? {
            self.read_digits()?;
        }
        if self.skip_any("eE")? {
            self.skip_any("+-")?;
            self.read_digits()?;
        }
        let raw = &self.input[start..self.pos];
        let value: f64 = raw
            .parse()
            .map_err(|_| self.raise_at(format!("invalid number literal {raw}"), start))?;
        self.consume_trivia()?;
        let trailing = self.take_pending();
        Ok(Node {
            kind: NodeKind::Number {
                value,
                raw: raw.to_string(),
            },
            leading,
            trailing,
        })
    }

    fn parse_literal(&mut self, text: &str, kind: NodeKind) -> Result<Node> {
        let leading = self.take_pending();
        for expected in text.chars() {
            self.eat(expected)?;
        }
        self.consume_trivia()?;
        let trailing = self.take_pending();
        Ok(Node {
            kind,
            leading,
            trailing,
        })
    }

    fn read_digits(&mut self) -> Result<()> {
        while self.cur()?.is_ascii_digit() {
            self.pos += 1;
        }
        Ok(())
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse_err(input: &str) -> NoriError {
        match parse(input) {
            Ok(_) => panic!("expected {input:?} to fail"),
            Err(err) => err,
        }
    }

    #[test]
    fn rejects_invalid_documents() {
        let cases = [
            (r#"{"test: true}"#, "Missing end quote"),
            (r#"{    test": true}"#, "Missing begin quote"),
            (r#"{"test": ture     }"#, "Misspelled true"),
            ("{\n      \"test\": 0..1\n    }", "Invalid number"),
            (r#"{"test":|}"#, "Invalid character"),
        ];
        for (input, name) in cases {
            let err = parse_err(input);
            assert_eq!(err.kind(), ErrorKind::Parse, "{name}");
        }
    }

    #[test]
    fn rejects_non_object_roots() {
        assert!(parse("[1, 2]").is_err());
        assert!(parse("true").is_err());
        assert!(parse("\"hi\"").is_err());
        assert!(parse("17").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse_err("");
        assert!(err.to_string().contains("Unexpected end of input"));
    }

    #[test]
    fn rejects_garbage_after_root() {
        let err = parse_err(r#"{"test":true} x"#);
        assert!(err.to_string().contains("Unexpected x"));
    }

    #[test]
    fn rejects_unterminated_block_comment() {
        let err = parse_err(r#"{"test":true} /* dangling"#);
        assert!(err.to_string().contains("Unexpected end of input"));
    }

    #[test]
    fn rejects_empty_object_with_inner_trivia() {
        // There is no node to own trivia inside an empty container, so the
        // grammar rejects it rather than lose bytes
        assert!(parse("{ }").is_err());
        assert!(parse("{}").is_ok());
    }

    #[test]
    fn tolerates_comma_before_close() {
        assert!(parse(r#"{"a":1,}"#).is_ok());
        assert!(parse(r#"{"a":[1,2,]}"#).is_ok());
    }

    #[test]
    fn requires_comma_between_properties() {
        let err = parse_err(r#"{"a":1 "b":2}"#);
        assert!(err.to_string().contains("expected ,"));
    }

    #[test]
    fn error_rendering_points_at_offset() {
        let err = parse_err("{\n  \"test\": ture\n}");
        let NoriError::Parse(parse_error) = err else {
            panic!("expected a parse error");
        };
        assert_eq!(parse_error.line, "  \"test\": ture");
        // the failing character is the `u` the literal scanner did not expect
        assert_eq!(parse_error.offset, 13);
        assert_eq!(parse_error.column, 11);
        let rendered = parse_error.to_string();
        assert!(rendered.starts_with("JSON parsing failed\n  \"test\": ture\n"));
        assert!(rendered.contains("^ Unexpected"));
    }

    #[test]
    fn string_values_keep_escapes_undecoded() {
        let root = parse(r#"{"test":"te\"st\n"}"#).expect("valid input");
        let properties = root.object_properties().unwrap();
        let value = properties[0].property_value().unwrap();
        match &value.kind {
            NodeKind::String { value } => assert_eq!(value, "te\\\"st\\n"),
            other => panic!("expected a string node, got {other:?}"),
        }
    }

    #[test]
    fn number_nodes_keep_raw_spelling() {
        let root = parse(r#"{"a": +1, "b": -6.9e-2, "c": 7.9e2}"#).expect("valid input");
        let properties = root.object_properties().unwrap();
        let raws: Vec<(&str, f64)> = properties
            .iter()
            .map(|p| match &p.property_value().unwrap().kind {
                NodeKind::Number { value, raw } => (raw.as_str(), *value),
                other => panic!("expected a number node, got {other:?}"),
            })
            .collect();
        assert_eq!(raws[0], ("+1", 1.0));
        assert_eq!(raws[1], ("-6.9e-2", -0.069));
        assert_eq!(raws[2], ("7.9e2", 790.0));
    }

    #[test]
    fn rejects_number_the_grammar_scans_but_f64_refuses() {
        assert!(parse(r#"{"a": 1e}"#).is_err());
        assert!(parse(r#"{"a": +}"#).is_err());
        // a bare trailing dot is a valid f64 literal
        assert!(parse(r#"{"a": 5.}"#).is_ok());
    }

    #[test]
    fn first_property_owns_the_run_after_the_brace() {
        let root = parse("{\n    \"a\": 1,\n    \"b\": 2\n}").expect("valid input");
        let properties = root.object_properties().unwrap();
        assert_eq!(properties[0].leading, vec![Trivia::Whitespace("\n    ".into())]);
        // the run after the comma was drained into the first property's
        // trailing buffer, so the second property starts bare
        assert_eq!(properties[0].trailing, vec![Trivia::Whitespace("\n    ".into())]);
        assert!(properties[1].leading.is_empty());
    }

    #[test]
    fn colon_spacing_lands_on_the_value_node() {
        let root = parse(r#"{"test":  true}"#).expect("valid input");
        let properties = root.object_properties().unwrap();
        let value = properties[0].property_value().unwrap();
        assert_eq!(value.leading, vec![Trivia::Whitespace("  ".into())]);
    }

    #[test]
    fn comments_carry_kind_and_trimmed_text() {
        let root = parse("{\"test\": // comment!\n4}").expect("valid input");
        let properties = root.object_properties().unwrap();
        let value = properties[0].property_value().unwrap();
        let comments: Vec<&Comment> = value
            .leading
            .iter()
            .filter_map(|t| match t {
                Trivia::Comment(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].kind, CommentKind::Line);
        assert_eq!(comments[0].raw, "// comment!");
        assert_eq!(comments[0].text, "comment!");

        let root = parse(r#"{"test": /* comment 2! */ 6}"#).expect("valid input");
        let value = root.object_properties().unwrap()[0].property_value().unwrap();
        match &value.leading[1] {
            Trivia::Comment(c) => {
                assert_eq!(c.kind, CommentKind::Block);
                assert_eq!(c.raw, "/* comment 2! */");
                assert_eq!(c.text, "comment 2!");
            }
            other => panic!("expected a comment, got {other:?}"),
        }
    }

    #[test]
    fn trailing_comment_after_root_is_kept() {
        let root = parse(r#"{"test":true}/* comment 3! */"#).expect("valid input");
        assert_eq!(root.trailing.len(), 1);
        assert!(root.trailing[0].is_comment());
    }

    #[test]
    fn duplicate_keys_are_accepted() {
        let root = parse(r#"{"test":1,"test":2}"#).expect("valid input");
        assert_eq!(root.object_properties().unwrap().len(), 2);
    }
}
