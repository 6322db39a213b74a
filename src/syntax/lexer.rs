//! Lexer for the Go source subset.
//!
//! Tokenizes with Go's automatic semicolon insertion: a newline terminates a
//! statement when the previous token could end one. Comments are consumed
//! and discarded (they still participate in semicolon insertion only through
//! the newline that follows them).

use super::parser::ParseError;
use super::{BinOp, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(String),
    Float(String),
    /// Raw literal text including quotes.
    Str(String),
    Char(String),

    // Keywords
    Package,
    Import,
    Func,
    Return,
    If,
    Else,
    For,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semi,
    Colon,
    Dot,

    /// `=`
    Assign,
    /// `:=`
    Define,

    /// A binary-only operator (`||`, `&&`, `==`, comparisons, `+`, …).
    Op(BinOp),
    /// `-` — binary subtraction or unary negation.
    Minus,
    /// `*` — binary multiplication or pointer/deref.
    Star,
    /// `&` — binary AND or address-of.
    Amp,
    /// `!`
    Not,
}

impl TokenKind {
    /// Go spec: a semicolon is inserted at a newline after one of these.
    fn ends_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Char(_)
                | TokenKind::Return
                | TokenKind::RParen
                | TokenKind::RBrace
                | TokenKind::RBracket
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }

    fn read_while(&mut self, pred: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while self.pos < self.input.len() && pred(self.input[self.pos]) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn is_ident_start(ch: u8) -> bool {
        ch.is_ascii_alphabetic() || ch == b'_' || ch >= 0x80
    }

    fn is_ident_char(ch: u8) -> bool {
        ch.is_ascii_alphanumeric() || ch == b'_' || ch >= 0x80
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            offset,
            message: message.into(),
        }
    }

    /// Read a quoted literal, returning its raw text including the quotes.
    /// Backslash escapes are carried through verbatim; raw (backtick)
    /// literals take no escapes and may span newlines.
    fn read_quoted(&mut self, quote: u8) -> Result<String, ParseError> {
        let start = self.pos;
        self.advance(); // opening quote
        while let Some(ch) = self.peek() {
            match ch {
                b'\\' if quote != b'`' => {
                    self.advance();
                    self.advance();
                }
                b'\n' if quote != b'`' => break,
                _ if ch == quote => {
                    self.advance();
                    return Ok(
                        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
                    );
                }
                _ => {
                    self.advance();
                }
            }
        }
        Err(self.error(start, "unterminated literal"))
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens: Vec<Token> = Vec::new();

        macro_rules! push {
            ($kind:expr, $start:expr) => {
                tokens.push(Token {
                    kind: $kind,
                    span: Span {
                        start: $start,
                        end: self.pos,
                    },
                })
            };
        }

        loop {
            // Whitespace and comments, inserting semicolons at newlines.
            loop {
                match self.peek() {
                    Some(b' ' | b'\t' | b'\r') => {
                        self.advance();
                    }
                    Some(b'\n') => {
                        let at = self.pos;
                        self.advance();
                        if tokens.last().is_some_and(|t| t.kind.ends_statement()) {
                            tokens.push(Token {
                                kind: TokenKind::Semi,
                                span: Span { start: at, end: at },
                            });
                        }
                    }
                    Some(b'/') if self.peek_at(1) == Some(b'/') => {
                        while self.peek().is_some_and(|c| c != b'\n') {
                            self.advance();
                        }
                    }
                    Some(b'/') if self.peek_at(1) == Some(b'*') => {
                        let at = self.pos;
                        self.advance();
                        self.advance();
                        loop {
                            match self.peek() {
                                Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                    self.advance();
                                    self.advance();
                                    break;
                                }
                                Some(_) => {
                                    self.advance();
                                }
                                None => return Err(self.error(at, "unterminated comment")),
                            }
                        }
                    }
                    _ => break,
                }
            }

            let start = self.pos;
            let Some(ch) = self.peek() else { break };

            match ch {
                b'(' => {
                    self.advance();
                    push!(TokenKind::LParen, start);
                }
                b')' => {
                    self.advance();
                    push!(TokenKind::RParen, start);
                }
                b'{' => {
                    self.advance();
                    push!(TokenKind::LBrace, start);
                }
                b'}' => {
                    self.advance();
                    push!(TokenKind::RBrace, start);
                }
                b'[' => {
                    self.advance();
                    push!(TokenKind::LBracket, start);
                }
                b']' => {
                    self.advance();
                    push!(TokenKind::RBracket, start);
                }
                b',' => {
                    self.advance();
                    push!(TokenKind::Comma, start);
                }
                b';' => {
                    self.advance();
                    push!(TokenKind::Semi, start);
                }
                b'.' => {
                    self.advance();
                    push!(TokenKind::Dot, start);
                }
                b':' => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        push!(TokenKind::Define, start);
                    } else {
                        push!(TokenKind::Colon, start);
                    }
                }
                b'=' => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        push!(TokenKind::Op(BinOp::Eql), start);
                    } else {
                        push!(TokenKind::Assign, start);
                    }
                }
                b'!' => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        push!(TokenKind::Op(BinOp::Neq), start);
                    } else {
                        push!(TokenKind::Not, start);
                    }
                }
                b'<' => {
                    self.advance();
                    match self.peek() {
                        Some(b'=') => {
                            self.advance();
                            push!(TokenKind::Op(BinOp::Leq), start);
                        }
                        Some(b'<') => {
                            self.advance();
                            push!(TokenKind::Op(BinOp::Shl), start);
                        }
                        _ => push!(TokenKind::Op(BinOp::Lss), start),
                    }
                }
                b'>' => {
                    self.advance();
                    match self.peek() {
                        Some(b'=') => {
                            self.advance();
                            push!(TokenKind::Op(BinOp::Geq), start);
                        }
                        Some(b'>') => {
                            self.advance();
                            push!(TokenKind::Op(BinOp::Shr), start);
                        }
                        _ => push!(TokenKind::Op(BinOp::Gtr), start),
                    }
                }
                b'|' => {
                    self.advance();
                    if self.peek() == Some(b'|') {
                        self.advance();
                        push!(TokenKind::Op(BinOp::LOr), start);
                    } else {
                        push!(TokenKind::Op(BinOp::Or), start);
                    }
                }
                b'&' => {
                    self.advance();
                    match self.peek() {
                        Some(b'&') => {
                            self.advance();
                            push!(TokenKind::Op(BinOp::LAnd), start);
                        }
                        Some(b'^') => {
                            self.advance();
                            push!(TokenKind::Op(BinOp::AndNot), start);
                        }
                        _ => push!(TokenKind::Amp, start),
                    }
                }
                b'+' => {
                    self.advance();
                    push!(TokenKind::Op(BinOp::Add), start);
                }
                b'-' => {
                    self.advance();
                    push!(TokenKind::Minus, start);
                }
                b'*' => {
                    self.advance();
                    push!(TokenKind::Star, start);
                }
                b'/' => {
                    self.advance();
                    push!(TokenKind::Op(BinOp::Quo), start);
                }
                b'%' => {
                    self.advance();
                    push!(TokenKind::Op(BinOp::Rem), start);
                }
                b'^' => {
                    self.advance();
                    push!(TokenKind::Op(BinOp::Xor), start);
                }
                b'"' | b'`' => {
                    let text = self.read_quoted(ch)?;
                    push!(TokenKind::Str(text), start);
                }
                b'\'' => {
                    let text = self.read_quoted(b'\'')?;
                    push!(TokenKind::Char(text), start);
                }
                _ if ch.is_ascii_digit() => {
                    let text = self.read_while(|c| c.is_ascii_digit() || c == b'.' || c == b'_');
                    if text.contains('.') {
                        push!(TokenKind::Float(text), start);
                    } else {
                        push!(TokenKind::Int(text), start);
                    }
                }
                _ if Self::is_ident_start(ch) => {
                    let word = self.read_while(Self::is_ident_char);
                    let kind = match word.as_str() {
                        "package" => TokenKind::Package,
                        "import" => TokenKind::Import,
                        "func" => TokenKind::Func,
                        "return" => TokenKind::Return,
                        "if" => TokenKind::If,
                        "else" => TokenKind::Else,
                        "for" => TokenKind::For,
                        _ => TokenKind::Ident(word),
                    };
                    push!(kind, start);
                }
                _ => return Err(self.error(start, format!("unexpected character {:?}", ch as char))),
            }
        }

        Ok(tokens)
    }
}
