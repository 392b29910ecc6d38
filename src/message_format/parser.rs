//! Compiles template source into a [`Template`].
//!
//! Supported syntax:
//! - literal text, with `\{`, `\}`, `\#` and `\\` escapes
//! - `{NAME}`
//! - `{NAME, plural, [offset:N] KEY {message} ...}` where `KEY` is `=N`, `N` or a category
//! - `{NAME, select, KEY {message} ...}`
//! - `#` inside a plural branch
//!
//! Plural and select arguments must carry an `other` branch.

use thiserror::Error;

use super::ast::{
    Node,
    PluralBranch,
    PluralKey,
    SelectBranch,
    Template,
};
use crate::runtime::plural::PluralCategory;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Unexpected end of template at offset {position}, expected {expected}")]
    UnexpectedEnd { position: usize, expected: &'static str },

    #[error("Unexpected character '{found}' at offset {position}, expected {expected}")]
    Unexpected { position: usize, found: char, expected: &'static str },

    #[error("Unbalanced '}}' at offset {position}")]
    Unbalanced { position: usize },

    #[error("Missing argument name at offset {position}")]
    MissingName { position: usize },

    #[error("Unknown argument type '{keyword}' at offset {position}")]
    UnknownType { position: usize, keyword: String },

    #[error("Invalid plural key '{key}' at offset {position}")]
    InvalidPluralKey { position: usize, key: String },

    #[error("Invalid offset '{value}' at offset {position}")]
    InvalidOffset { position: usize, value: String },

    #[error("No 'other' branch in {kind} argument '{name}'")]
    MissingOther { name: String, kind: &'static str },
}

/// Compiles `source` into a template.
///
/// # Errors
/// The source is not well-formed.
pub fn compile(source: &str) -> Result<Template, CompileError> {
    let mut parser = Parser { source, position: 0 };
    let template = parser.message(false)?;

    match parser.peek() {
        None => Ok(template),
        Some(_) => Err(CompileError::Unbalanced { position: parser.position }),
    }
}

/// Cursor over the template source.
struct Parser<'a> {
    /// Template source.
    source: &'a str,
    /// Byte offset of the next unread character.
    position: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.source.get(self.position..)?.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> Result<(), CompileError> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(CompileError::Unexpected { position: self.position, found, expected }),
            None => Err(CompileError::UnexpectedEnd { position: self.position, expected }),
        }
    }

    /// Reads characters up to whitespace or one of `,{}`.
    fn word(&mut self) -> &str {
        let start = self.position;
        while self.peek().is_some_and(|c| !c.is_whitespace() && !matches!(c, ',' | '{' | '}')) {
            self.bump();
        }
        self.source.get(start..self.position).unwrap_or_default()
    }

    /// Parses nodes until an unmatched `}` or the end of input. The `}` is left unread.
    fn message(&mut self, in_plural: bool) -> Result<Template, CompileError> {
        let mut nodes = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            match c {
                '}' => break,
                '{' => {
                    flush_literal(&mut literal, &mut nodes);
                    nodes.push(self.argument(in_plural)?);
                }
                '#' if in_plural => {
                    self.bump();
                    flush_literal(&mut literal, &mut nodes);
                    nodes.push(Node::Octothorpe);
                }
                '\\' => {
                    self.bump();
                    literal.push(self.bump().unwrap_or('\\'));
                }
                _ => {
                    self.bump();
                    literal.push(c);
                }
            }
        }

        flush_literal(&mut literal, &mut nodes);
        Ok(Template { nodes })
    }

    /// Parses `{...}` starting at the opening brace.
    fn argument(&mut self, in_plural: bool) -> Result<Node, CompileError> {
        self.expect('{', "'{'")?;
        self.skip_whitespace();

        let name_position = self.position;
        let name = self.word().to_string();
        if name.is_empty() {
            return Err(CompileError::MissingName { position: name_position });
        }
        self.skip_whitespace();

        match self.peek() {
            Some('}') => {
                self.bump();
                return Ok(Node::Argument(name));
            }
            Some(',') => {
                self.bump();
            }
            Some(found) => {
                return Err(CompileError::Unexpected {
                    position: self.position,
                    found,
                    expected: "'}' or ','",
                });
            }
            None => {
                return Err(CompileError::UnexpectedEnd {
                    position: self.position,
                    expected: "'}' or ','",
                });
            }
        }

        self.skip_whitespace();
        let keyword_position = self.position;
        let keyword = self.word().to_string();
        self.skip_whitespace();
        self.expect(',', "','")?;

        let node = match keyword.as_str() {
            "plural" => self.plural(name)?,
            "select" => self.select(name, in_plural)?,
            _ => return Err(CompileError::UnknownType { position: keyword_position, keyword }),
        };

        self.skip_whitespace();
        self.expect('}', "'}'")?;
        Ok(node)
    }

    fn plural(&mut self, name: String) -> Result<Node, CompileError> {
        self.skip_whitespace();
        let offset = self.offset()?;

        let mut branches = Vec::new();
        while let Some((key_position, key)) = self.branch_key() {
            let key = parse_plural_key(&key)
                .ok_or(CompileError::InvalidPluralKey { position: key_position, key })?;
            let body = self.branch_body(true)?;
            branches.push(PluralBranch { key, body });
        }

        let has_other = branches
            .iter()
            .any(|branch| branch.key == PluralKey::Category(PluralCategory::Other));
        if !has_other {
            return Err(CompileError::MissingOther { name, kind: "plural" });
        }

        Ok(Node::Plural { name, offset, branches })
    }

    fn select(&mut self, name: String, in_plural: bool) -> Result<Node, CompileError> {
        let mut branches = Vec::new();
        while let Some((_, key)) = self.branch_key() {
            let body = self.branch_body(in_plural)?;
            branches.push(SelectBranch { key, body });
        }

        if !branches.iter().any(|branch| branch.key == "other") {
            return Err(CompileError::MissingOther { name, kind: "select" });
        }

        Ok(Node::Select { name, branches })
    }

    /// Parses an optional `offset:N`.
    fn offset(&mut self) -> Result<f64, CompileError> {
        let source = self.source;
        let rest = source.get(self.position..).unwrap_or_default();
        let Some(after) = rest.strip_prefix("offset:") else {
            return Ok(0.0);
        };
        self.position += rest.len() - after.len();
        self.skip_whitespace();

        let value_position = self.position;
        let value = self.word().to_string();
        value.parse::<f64>().map_err(|_| CompileError::InvalidOffset { position: value_position, value })
    }

    /// Reads the next branch key, or `None` at the closing brace.
    fn branch_key(&mut self) -> Option<(usize, String)> {
        self.skip_whitespace();
        match self.peek() {
            None | Some('}') => None,
            Some(_) => {
                let position = self.position;
                Some((position, self.word().to_string()))
            }
        }
    }

    /// Parses `{message}` after a branch key.
    fn branch_body(&mut self, in_plural: bool) -> Result<Template, CompileError> {
        self.skip_whitespace();
        self.expect('{', "'{' to open a branch")?;
        let body = self.message(in_plural)?;
        self.expect('}', "'}' to close a branch")?;
        Ok(body)
    }
}

/// Moves buffered literal text into a node.
fn flush_literal(literal: &mut String, nodes: &mut Vec<Node>) {
    if !literal.is_empty() {
        nodes.push(Node::Literal(std::mem::take(literal)));
    }
}

fn parse_plural_key(key: &str) -> Option<PluralKey> {
    let exact = key.strip_prefix('=').unwrap_or(key);
    if let Ok(n) = exact.parse::<f64>() {
        return Some(PluralKey::Exact(n));
    }
    if key.starts_with('=') {
        return None;
    }
    key.parse::<PluralCategory>().ok().map(PluralKey::Category)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn literal(text: &str) -> Node {
        Node::Literal(text.to_string())
    }

    #[rstest]
    fn compiles_literal_and_argument() {
        let template = compile("Hello, {name}!").unwrap();

        assert_that!(
            template.nodes,
            elements_are![
                eq(&literal("Hello, ")),
                eq(&Node::Argument("name".to_string())),
                eq(&literal("!"))
            ]
        );
    }

    #[rstest]
    fn compiles_plural_with_offset_and_exact_keys() {
        let template = compile("{N, plural, offset:1 =0 {none} 1 {one} other {# more}}").unwrap();

        let [Node::Plural { name, offset, branches }] = template.nodes.as_slice() else {
            panic!("expected a single plural node, got {:?}", template.nodes);
        };
        assert_that!(name, eq("N"));
        assert_that!(*offset, eq(1.0));
        assert_that!(
            branches.iter().map(|b| b.key.clone()).collect::<Vec<_>>(),
            elements_are![
                eq(&PluralKey::Exact(0.0)),
                eq(&PluralKey::Exact(1.0)),
                eq(&PluralKey::Category(PluralCategory::Other))
            ]
        );
        assert_that!(
            branches[2].body.nodes,
            elements_are![eq(&Node::Octothorpe), eq(&literal(" more"))]
        );
    }

    #[rstest]
    fn hash_outside_plural_is_literal() {
        let template = compile("#1 {A, select, x {#} other {}}").unwrap();

        assert_that!(template.nodes[0], eq(&literal("#1 ")));
        let Node::Select { branches, .. } = &template.nodes[1] else {
            panic!("expected select");
        };
        assert_that!(branches[0].body.nodes, elements_are![eq(&literal("#"))]);
    }

    #[rstest]
    fn escapes_are_literal() {
        let template = compile(r"\{not an argument\} \# \\").unwrap();

        assert_that!(template.nodes, elements_are![eq(&literal(r"{not an argument} # \"))]);
    }

    #[rstest]
    fn nested_arguments_keep_whitespace() {
        let template =
            compile("{A, plural, one { {B, select, true {and } other {}} x} other {y}}").unwrap();

        let Node::Plural { branches, .. } = &template.nodes[0] else {
            panic!("expected plural");
        };
        assert_that!(branches[0].body.nodes.len(), eq(3));
        assert_that!(branches[0].body.nodes[0], eq(&literal(" ")));
        assert_that!(branches[0].body.nodes[2], eq(&literal(" x")));
        assert_that!(template.argument_names(), elements_are![eq(&"A"), eq(&"B")]);
    }

    #[rstest]
    #[case::missing_other("{A, plural, one {x}}", "No 'other' branch in plural argument 'A'")]
    #[case::select_missing_other("{A, select, a {x}}", "No 'other' branch in select argument 'A'")]
    #[case::unknown_type("{A, number, other {x}}", "Unknown argument type 'number'")]
    #[case::bad_key("{A, plural, several {x} other {y}}", "Invalid plural key 'several'")]
    #[case::bad_offset("{A, plural, offset:x other {y}}", "Invalid offset 'x'")]
    #[case::unclosed("{A, plural, other {y}", "Unexpected end of template")]
    #[case::unbalanced("text }", "Unbalanced '}'")]
    #[case::no_name("{ }", "Missing argument name")]
    fn rejects_malformed_templates(#[case] source: &str, #[case] message: &str) {
        let error = compile(source).unwrap_err();

        assert_that!(error.to_string(), contains_substring(message));
    }
}
