//! Declaration parser.
//!
//! Walks the token stream in one pass with single-token lookahead and
//! produces the ordered list of [`Declaration`] nodes. Dispatch is keyed on
//! the current token:
//!
//! - `typedef enum` / bare `enum` → enum body
//! - `typedef struct` → brace-delimited field list (forward declarations and
//!   union-bearing bodies yield no node)
//! - `typedef void` → callback typedef, recognized and skipped
//! - `typedef <other>` → type alias
//! - `#define` → integer constant (single-token bodies only)
//!
//! A block comment is held as the "last seen comment" and attached to the
//! next constant or enum member, then cleared so it cannot leak onto an
//! unrelated declaration.
//!
//! An expectation mismatch is local to the declaration being parsed: the
//! parser logs it, resynchronizes at the next `;`, and continues, so one
//! malformed region cannot stop the rest of the header from processing.

use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::model::{
    parse_c_integer, ConstantDecl, Declaration, EnumDecl, EnumField, StructDecl, StructField,
    TypeAliasDecl,
};
use tracing::{debug, warn};

/// Which of the two enum declaration forms is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumStyle {
    /// `typedef enum [Tag] { ... } Name;` — the trailing identifier names it
    Typedef,
    /// `enum Name { ... };` — the identifier after the keyword names it
    Bare,
}

/// Single-lookahead parser over a lexed token stream.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    last_comment: Option<String>,
}

impl Parser {
    /// Creates a parser over the given token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            last_comment: None,
        }
    }

    /// Consumes the parser and produces all declarations in header order.
    ///
    /// Declarations that fail to parse are logged and skipped; the stream is
    /// resynchronized at the next `;`.
    pub fn parse(mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        while let Some(token) = self.poll() {
            if token.kind == TokenKind::Eof {
                break;
            }

            match self.dispatch(token) {
                Ok(Some(declaration)) => {
                    debug!("parsed {}", declaration);
                    self.last_comment = None;
                    declarations.push(declaration);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!("failed to parse declaration: {}", err);
                    self.synchronize();
                }
            }
        }

        declarations
    }

    fn dispatch(&mut self, token: Token) -> Result<Option<Declaration>> {
        if token.is_identifier("typedef") {
            let next = self.poll_required("a type after 'typedef'")?;

            if next.is_identifier("enum") {
                self.parse_enum(EnumStyle::Typedef)
            } else if next.is_identifier("struct") {
                self.parse_struct()
            } else if next.is_identifier("void") {
                // callback/function-pointer typedef; out of scope
                self.skip_declaration();
                Ok(None)
            } else {
                self.parse_type_alias(next).map(Some)
            }
        } else if token.kind == TokenKind::Hash {
            let directive = self.expect(TokenKind::Identifier)?;

            if directive.text == "define" {
                self.parse_constant()
            } else {
                Ok(None)
            }
        } else if token.kind == TokenKind::Comment {
            self.last_comment = Some(token.text);
            Ok(None)
        } else if token.is_identifier("enum") {
            self.parse_enum(EnumStyle::Bare)
        } else {
            Ok(None)
        }
    }

    /// `#define NAME VALUE` — only single-token values are supported;
    /// anything else (include guards, expression macros) yields no node.
    fn parse_constant(&mut self) -> Result<Option<Declaration>> {
        let name = self.expect(TokenKind::Identifier)?;

        if !self.peek_is(TokenKind::Identifier) {
            return Ok(None);
        }

        let value = self.expect(TokenKind::Identifier)?;

        Ok(Some(Declaration::Constant(ConstantDecl {
            c_name: name.text,
            value: value.text,
            comment: self.take_comment(),
        })))
    }

    /// `typedef <tokens...> Alias;` — the final identifier is the alias
    /// name, the space-joined rest the original type text.
    fn parse_type_alias(&mut self, first: Token) -> Result<Declaration> {
        let mut parts = vec![first];

        loop {
            let token = self.poll_required("';' ending the typedef")?;
            match token.kind {
                TokenKind::Semicolon => break,
                TokenKind::Eof => {
                    return Err(Error::unexpected_token("Semicolon", token.to_string()))
                }
                TokenKind::Newline | TokenKind::Comment => {}
                _ => parts.push(token),
            }
        }

        let alias = match parts.pop() {
            Some(token) if parts.is_empty() => {
                return Err(Error::unexpected_token(
                    "an original type before the alias name",
                    token.to_string(),
                ))
            }
            Some(token) => token.text,
            None => return Err(Error::internal("typedef with no body")),
        };

        let original = parts
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Declaration::TypeAlias(TypeAliasDecl::new(alias, original)))
    }

    /// `typedef struct Tag { [const] <type> <name>; ... } Name;`
    fn parse_struct(&mut self) -> Result<Option<Declaration>> {
        self.skip_blank_lines();
        self.expect(TokenKind::Identifier)?;
        self.skip_blank_lines();

        // typedef struct WGPUFoo WGPUFoo; — forward declaration, no node
        if !self.peek_is(TokenKind::OpenBrace) {
            self.skip_declaration();
            return Ok(None);
        }

        self.expect(TokenKind::OpenBrace)?;
        self.skip_blank_lines();

        let mut fields = Vec::new();

        while !self.peek_is(TokenKind::CloseBrace) {
            if self.peek_is_identifier("const") {
                self.poll();
            }

            // unions in struct position are unsupported; drop the struct
            if self.peek_is_identifier("union") {
                return Ok(None);
            }

            let field_type = self.expect(TokenKind::Identifier)?;
            let field_name = self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::Semicolon)?;
            self.skip_blank_lines();

            fields.push(StructField::new(field_type.text, field_name.text));
        }

        self.expect(TokenKind::CloseBrace)?;
        let name = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Some(Declaration::Struct(StructDecl {
            c_name: name.text,
            fields,
        })))
    }

    /// Enum body: `<identifier> [= <integer literal>] ,` repeated to `}`.
    ///
    /// A member without an explicit value takes the previous declared value
    /// plus one (zero for the first member).
    fn parse_enum(&mut self, style: EnumStyle) -> Result<Option<Declaration>> {
        self.skip_blank_lines();

        let leading = if self.peek_is(TokenKind::Identifier) {
            Some(self.expect(TokenKind::Identifier)?)
        } else if style == EnumStyle::Bare {
            return Err(Error::unexpected_token(
                "a name after 'enum'",
                self.describe_peek(),
            ));
        } else {
            None
        };

        self.skip_blank_lines();
        self.expect(TokenKind::OpenBrace)?;
        self.last_comment = None;
        self.skip_blank_lines();

        let mut fields = Vec::new();
        let mut next_value: i64 = 0;

        loop {
            let member = self.poll_required("an enum member or '}'")?;

            if member.kind == TokenKind::CloseBrace {
                break;
            }
            if member.kind != TokenKind::Identifier {
                return Err(Error::unexpected_token("Identifier", member.to_string()));
            }

            let separator = self.poll_required("',' or '=' after an enum member")?;
            match separator.kind {
                TokenKind::Comma => {
                    fields.push(EnumField {
                        c_name: member.text,
                        value: next_value,
                        comment: self.take_comment(),
                    });
                    next_value += 1;
                }
                TokenKind::Equals => {
                    let literal = self.expect(TokenKind::Identifier)?;
                    let value = parse_c_integer(&literal.text)
                        .and_then(|value| i64::try_from(value).ok())
                        .ok_or_else(|| Error::invalid_literal(&member.text, &literal.text))?;

                    fields.push(EnumField {
                        c_name: member.text,
                        value,
                        comment: self.take_comment(),
                    });
                    next_value = value + 1;

                    if self.peek_is(TokenKind::Comma) {
                        self.poll();
                    } else if !self.peek_is(TokenKind::CloseBrace) {
                        return Err(Error::unexpected_token(
                            "',' after an enum value",
                            self.describe_peek(),
                        ));
                    }
                }
                TokenKind::CloseBrace => {
                    // final member without a trailing comma
                    fields.push(EnumField {
                        c_name: member.text,
                        value: next_value,
                        comment: self.take_comment(),
                    });
                    break;
                }
                _ => {
                    return Err(Error::unexpected_token(
                        "',' or '='",
                        separator.to_string(),
                    ))
                }
            }

            self.last_comment = None;
            self.skip_blank_lines();
        }

        let name = match style {
            EnumStyle::Typedef => {
                self.skip_blank_lines();
                let name = self.expect(TokenKind::Identifier)?;
                self.expect(TokenKind::Semicolon)?;
                name.text
            }
            EnumStyle::Bare => {
                if self.peek_is(TokenKind::Semicolon) {
                    self.poll();
                }
                leading
                    .ok_or_else(|| Error::internal("bare enum without a name"))?
                    .text
            }
        };

        Ok(Some(Declaration::Enum(EnumDecl::new(name, fields))))
    }

    /// Skips newline and comment tokens, capturing comments for attachment
    /// to the next member created.
    fn skip_blank_lines(&mut self) {
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Comment => {
                    self.last_comment = Some(token.text.clone());
                    self.index += 1;
                }
                TokenKind::Newline => self.index += 1,
                _ => break,
            }
        }
    }

    /// Consumes tokens through the next `;` (or the end of the stream).
    fn skip_declaration(&mut self) {
        while let Some(token) = self.poll() {
            if matches!(token.kind, TokenKind::Semicolon | TokenKind::Eof) {
                break;
            }
        }
    }

    /// Error recovery: drop tokens until just past the next `;`.
    fn synchronize(&mut self) {
        self.last_comment = None;
        self.skip_declaration();
    }

    fn take_comment(&mut self) -> String {
        self.last_comment.take().unwrap_or_default()
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        match self.poll() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(Error::unexpected_token(format!("{:?}", kind), token.to_string())),
            None => Err(Error::unexpected_token(
                format!("{:?}", kind),
                "end of stream",
            )),
        }
    }

    fn poll_required(&mut self, expected: &str) -> Result<Token> {
        self.poll()
            .ok_or_else(|| Error::unexpected_token(expected, "end of stream"))
    }

    fn poll(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().map(|token| token.kind) == Some(kind)
    }

    fn peek_is_identifier(&self, text: &str) -> bool {
        self.peek().is_some_and(|token| token.is_identifier(text))
    }

    fn describe_peek(&self) -> String {
        self.peek()
            .map(|token| token.to_string())
            .unwrap_or_else(|| "end of stream".to_string())
    }
}

/// Lex and parse header text in one call
pub fn parse_header(text: &str) -> Vec<Declaration> {
    Parser::new(crate::lexer::tokenize(text)).parse()
}
