//! Header tokenizer.
//!
//! Converts raw header text into a flat [`Token`] stream for the declaration
//! parser. The lexer is deliberately C-subset-shaped:
//!
//! - Identifiers absorb alphanumerics, `_`, and the pointer marker `*`, so
//!   `const char *label` lexes as `const`, `char`, `*label` and pointer-ness
//!   is recovered later from the leading `*` of the *name* token.
//! - Newlines are kept as tokens; the parser uses them to bound the window in
//!   which a block comment attaches to the following declaration member.
//! - `/* ... */` comments are captured whole, embedded newlines included, as
//!   a single token.
//!
//! Malformed regions (unterminated comments, characters outside the subset)
//! are logged and skipped so the rest of the header still processes.

use tracing::warn;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A captured `/* ... */` block comment
    Comment,
    /// Identifier, keyword, or integer literal (including `*`-prefixed names)
    Identifier,
    /// `#`
    Hash,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Period,
    /// `=`
    Equals,
    /// Preserved line break
    Newline,
    /// End of input; always the final token of a stream
    Eof,
}

/// One lexed token: a kind plus the source text that produced it.
///
/// Equality is structural (kind and text), which is what the parser relies on
/// when matching keyword identifiers against constructed expectations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The token's kind
    pub kind: TokenKind,
    /// The token's source text; empty for punctuation
    pub text: String,
}

impl Token {
    /// Creates a text-free token of the given kind
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            text: String::new(),
        }
    }

    /// Creates an identifier token
    pub fn identifier(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Identifier,
            text: text.into(),
        }
    }

    /// Creates a comment token
    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Comment,
            text: text.into(),
        }
    }

    /// Returns true if this token is an identifier with exactly this text
    pub fn is_identifier(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.text.chars().count() > 50 {
            let prefix: String = self.text.chars().take(50).collect();
            write!(f, "{:?}({}...)", self.kind, prefix)
        } else {
            write!(f, "{:?}({})", self.kind, self.text)
        }
    }
}

/// Tokenizer over the full header text.
#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    index: usize,
}

impl Lexer {
    /// Creates a lexer over the given header text
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
        }
    }

    /// Consumes the lexer and produces the complete token stream.
    ///
    /// The stream always ends in exactly one [`TokenKind::Eof`] token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(c) = self.poll() {
            if let Some(token) = self.next_token(c) {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof));
        tokens
    }

    fn next_token(&mut self, c: char) -> Option<Token> {
        match c {
            '#' => Some(Token::new(TokenKind::Hash)),
            '(' => Some(Token::new(TokenKind::LeftParen)),
            ')' => Some(Token::new(TokenKind::RightParen)),
            '{' => Some(Token::new(TokenKind::OpenBrace)),
            '}' => Some(Token::new(TokenKind::CloseBrace)),
            '<' => Some(Token::new(TokenKind::LessThan)),
            '>' => Some(Token::new(TokenKind::GreaterThan)),
            ',' => Some(Token::new(TokenKind::Comma)),
            ';' => Some(Token::new(TokenKind::Semicolon)),
            '.' => Some(Token::new(TokenKind::Period)),
            '=' => Some(Token::new(TokenKind::Equals)),
            '\n' => Some(Token::new(TokenKind::Newline)),
            ' ' | '\t' | '\r' => None,
            '/' => match self.poll() {
                Some('*') => self.read_comment().map(Token::comment),
                other => {
                    warn!("expected '*' after '/' but found {:?}", other);
                    None
                }
            },
            _ if is_identifier_char(c) => Some(Token::identifier(self.read_identifier(c))),
            _ => {
                warn!("unknown character: {:?}", c);
                None
            }
        }
    }

    /// Reads a block comment to its closing `*/`, returning the full text
    /// including the delimiters. Returns `None` if the input ends first.
    fn read_comment(&mut self) -> Option<String> {
        let mut comment = String::from("/*");
        let mut prev = '\0';

        while let Some(c) = self.poll() {
            comment.push(c);

            if c == '/' && prev == '*' {
                return Some(comment);
            }

            prev = c;
        }

        warn!("unterminated block comment at end of header");
        None
    }

    fn read_identifier(&mut self, first: char) -> String {
        let mut text = String::from(first);

        while let Some(c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }

            text.push(c);
            self.index += 1;
        }

        text
    }

    fn poll(&mut self) -> Option<char> {
        let c = self.chars.get(self.index).copied();
        if c.is_some() {
            self.index += 1;
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '*'
}

/// Tokenize header text in one call
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}
