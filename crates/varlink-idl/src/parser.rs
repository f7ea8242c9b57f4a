//! Recursive-descent parser for interface description text.
//!
//! The parser walks the source once, tracking a 1-based line and column so
//! every rejection points at the offending token. `#` comment blocks
//! immediately preceding the `interface` keyword or a member attach to that
//! item as documentation; comments elsewhere are skipped.

use crate::ast::{ErrorDef, Field, Interface, Member, Method, Type, TypeAlias};
use crate::error::ParseError;
use crate::name;

/// Parses interface description text into an [`Interface`].
///
/// # Errors
///
/// Returns a [`ParseError`] with the 1-based position of the first token
/// that does not fit the description grammar.
pub fn parse(source: &str) -> Result<Interface, ParseError> {
    Parser::new(source).parse_interface()
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn parse_interface(mut self) -> Result<Interface, ParseError> {
        let doc = self.take_doc();
        let (line, column, keyword) = self.word();
        if keyword != "interface" {
            return Err(ParseError::new(line, column, "expected 'interface'"));
        }
        self.skip_spaces();
        let (line, column, raw) = self.word();
        if !name::is_interface_name(&raw) {
            return Err(ParseError::new(
                line,
                column,
                format!("invalid interface name '{raw}'"),
            ));
        }

        let mut members = Vec::new();
        loop {
            let member_doc = self.take_doc();
            if self.at_end() {
                break;
            }
            let (line, column, keyword) = self.word();
            let member = match keyword.as_str() {
                "type" => Member::Alias(self.parse_alias(member_doc)?),
                "method" => Member::Method(self.parse_method(member_doc)?),
                "error" => Member::Error(self.parse_error_def(member_doc)?),
                _ => {
                    return Err(ParseError::new(
                        line,
                        column,
                        "expected 'type', 'method', or 'error'",
                    ));
                }
            };
            members.push(member);
        }

        Ok(Interface {
            name: raw,
            doc,
            members,
        })
    }

    fn parse_alias(&mut self, doc: Vec<String>) -> Result<TypeAlias, ParseError> {
        let name = self.member_name("type")?;
        self.skip_trivia();
        self.expect_char('(', "expected '(' after type name")?;
        let ty = match self.parse_body(true)? {
            Body::Struct(fields) => Type::Struct(fields),
            Body::Enum(variants) => Type::Enum(variants),
        };
        Ok(TypeAlias { name, doc, ty })
    }

    fn parse_method(&mut self, doc: Vec<String>) -> Result<Method, ParseError> {
        let name = self.member_name("method")?;
        self.skip_trivia();
        self.expect_char('(', "expected '(' after method name")?;
        let input = self.parse_fields()?;
        self.skip_trivia();
        self.expect_char('-', "expected '->' after method input")?;
        self.expect_char('>', "expected '->' after method input")?;
        self.skip_trivia();
        self.expect_char('(', "expected '(' after '->'")?;
        let output = self.parse_fields()?;
        Ok(Method {
            name,
            doc,
            input,
            output,
        })
    }

    fn parse_error_def(&mut self, doc: Vec<String>) -> Result<ErrorDef, ParseError> {
        let name = self.member_name("error")?;
        self.skip_trivia();
        self.expect_char('(', "expected '(' after error name")?;
        let fields = self.parse_fields()?;
        Ok(ErrorDef { name, doc, fields })
    }

    fn member_name(&mut self, kind: &str) -> Result<String, ParseError> {
        self.skip_spaces();
        let (line, column, raw) = self.word();
        if name::is_member_name(&raw) {
            Ok(raw)
        } else {
            Err(ParseError::new(
                line,
                column,
                format!("invalid {kind} name '{raw}'"),
            ))
        }
    }

    /// Parses a struct body, rejecting the enum form.
    fn parse_fields(&mut self) -> Result<Vec<Field>, ParseError> {
        match self.parse_body(false)? {
            Body::Struct(fields) => Ok(fields),
            // parse_body already rejects enums when they are not allowed.
            Body::Enum(_) => unreachable!("enum body with allow_enum = false"),
        }
    }

    /// Parses a parenthesised body after the opening `(` has been consumed.
    fn parse_body(&mut self, allow_enum: bool) -> Result<Body, ParseError> {
        self.skip_trivia();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(Body::Struct(Vec::new()));
        }

        let (_, _, first) = self.field_name()?;
        self.skip_trivia();
        match self.peek() {
            Some(':') => {
                self.bump();
                let ty = self.parse_type()?;
                let mut fields = vec![Field { name: first, ty }];
                self.finish_struct(&mut fields)?;
                Ok(Body::Struct(fields))
            }
            Some(',' | ')') if allow_enum => {
                let mut variants = vec![first];
                self.finish_enum(&mut variants)?;
                Ok(Body::Enum(variants))
            }
            _ if allow_enum => Err(self.error("expected ':', ',', or ')'")),
            _ => Err(self.error("expected ':' after field name")),
        }
    }

    fn finish_struct(&mut self, fields: &mut Vec<Field>) -> Result<(), ParseError> {
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(')') => {
                    self.bump();
                    return Ok(());
                }
                Some(',') => {
                    self.bump();
                    let (_, _, name) = self.field_name()?;
                    self.skip_trivia();
                    self.expect_char(':', "expected ':' after field name")?;
                    let ty = self.parse_type()?;
                    fields.push(Field { name, ty });
                }
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }
    }

    fn finish_enum(&mut self, variants: &mut Vec<String>) -> Result<(), ParseError> {
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(')') => {
                    self.bump();
                    return Ok(());
                }
                Some(',') => {
                    self.bump();
                    let (_, _, name) = self.field_name()?;
                    variants.push(name);
                }
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }
    }

    fn field_name(&mut self) -> Result<(u32, u32, String), ParseError> {
        self.skip_trivia();
        let (line, column, raw) = self.word();
        if name::is_field_name(&raw) {
            Ok((line, column, raw))
        } else {
            Err(ParseError::new(
                line,
                column,
                format!("invalid field name '{raw}'"),
            ))
        }
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        self.skip_trivia();
        match self.peek() {
            Some('?') => {
                self.bump();
                Ok(Type::Optional(Box::new(self.parse_type()?)))
            }
            Some('[') => {
                self.bump();
                if self.peek() == Some(']') {
                    self.bump();
                    Ok(Type::Array(Box::new(self.parse_type()?)))
                } else {
                    Err(self.error("expected ']' (map types are not supported)"))
                }
            }
            Some('(') => {
                self.bump();
                match self.parse_body(true)? {
                    Body::Struct(fields) => Ok(Type::Struct(fields)),
                    Body::Enum(variants) => Ok(Type::Enum(variants)),
                }
            }
            _ => {
                let (line, column, raw) = self.word();
                match raw.as_str() {
                    "bool" => Ok(Type::Bool),
                    "int" => Ok(Type::Int),
                    "float" => Ok(Type::Float),
                    "string" => Ok(Type::String),
                    "object" => Ok(Type::Object),
                    _ if name::is_member_name(&raw) => Ok(Type::Ref(raw)),
                    "" => Err(ParseError::new(line, column, "expected a type")),
                    _ => Err(ParseError::new(
                        line,
                        column,
                        format!("unknown type '{raw}'"),
                    )),
                }
            }
        }
    }

    /// Collects comment lines (and surrounding blank lines) as documentation.
    fn take_doc(&mut self) -> Vec<String> {
        let mut doc = Vec::new();
        loop {
            self.skip_spaces();
            if self.peek() == Some('#') {
                doc.push(self.comment_line());
            } else {
                return doc;
            }
        }
    }

    /// Consumes one `#` comment, returning its text without the marker.
    fn comment_line(&mut self) -> String {
        self.bump();
        if self.peek() == Some(' ') {
            self.bump();
        }
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
        self.source[start..self.pos].to_owned()
    }

    fn skip_spaces(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Skips whitespace and discards comments that appear inside a member.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_spaces();
            if self.peek() == Some('#') {
                let _ = self.comment_line();
            } else {
                return;
            }
        }
    }

    fn word(&mut self) -> (u32, u32, String) {
        let line = self.line;
        let column = self.column;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                self.bump();
            } else {
                break;
            }
        }
        (line, column, self.source[start..self.pos].to_owned())
    }

    fn expect_char(&mut self, expected: char, message: &str) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, self.column, message)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

enum Body {
    Struct(Vec<Field>),
    Enum(Vec<String>),
}
