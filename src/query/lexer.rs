//! Tokenizer for statement text.
//!
//! The lexer walks an immutable byte buffer with a mutable cursor. Whitespace
//! (space, tab, newline) is skipped; a leading byte that starts no token ends
//! the stream without consuming anything, which the parser reads as end of
//! input.

use std::fmt;

/// Grammar symbol carried by every token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Symbol {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBrack,
    /// `]`
    RBrack,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `:`
    Colon,
    /// `CREATE` keyword.
    Create,
    /// `MATCH` keyword.
    Match,
    /// Bare identifier.
    Ident,
    /// Double-quoted string literal.
    Str,
    /// `SET` keyword.
    Set,
    /// `,`
    Comma,
    /// `-`
    Dash,
    /// `>`
    GreaterThan,
    /// `RETURN` keyword.
    Return,
    /// `.`
    Period,
    /// `=`
    Equals,
    /// `AS` keyword.
    As,
}

impl Symbol {
    /// Human-readable name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBrack => "[",
            Symbol::RBrack => "]",
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::Colon => ":",
            Symbol::Create => "create",
            Symbol::Match => "match",
            Symbol::Ident => "ident",
            Symbol::Str => "string",
            Symbol::Set => "set",
            Symbol::Comma => ",",
            Symbol::Dash => "-",
            Symbol::GreaterThan => ">",
            Symbol::Return => "return",
            Symbol::Period => ".",
            Symbol::Equals => "=",
            Symbol::As => "as",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token. Identifiers and strings carry their text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// Grammar symbol.
    pub symbol: Symbol,
    /// Payload for [`Symbol::Ident`] and [`Symbol::Str`].
    pub text: Option<String>,
}

impl Token {
    fn bare(symbol: Symbol) -> Self {
        Self { symbol, text: None }
    }

    fn with_text(symbol: Symbol, text: String) -> Self {
        Self {
            symbol,
            text: Some(text),
        }
    }
}

const KEYWORDS: [(&str, Symbol); 5] = [
    ("create", Symbol::Create),
    ("match", Symbol::Match),
    ("set", Symbol::Set),
    ("return", Symbol::Return),
    ("as", Symbol::As),
];

/// Cursor over statement text producing [`Token`]s.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Starts lexing `input` from the beginning.
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Input that has not been consumed, after skipping whitespace.
    pub fn rest(&mut self) -> &'a [u8] {
        self.skip_whitespace();
        &self.input[self.pos..]
    }

    /// Produces the next token, or `None` when no token starts at the cursor.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let byte = *self.input.get(self.pos)?;
        let punct = match byte {
            b'(' => Some(Symbol::LParen),
            b')' => Some(Symbol::RParen),
            b'[' => Some(Symbol::LBrack),
            b']' => Some(Symbol::RBrack),
            b'{' => Some(Symbol::LBrace),
            b'}' => Some(Symbol::RBrace),
            b':' => Some(Symbol::Colon),
            b',' => Some(Symbol::Comma),
            b'-' => Some(Symbol::Dash),
            b'>' => Some(Symbol::GreaterThan),
            b'.' => Some(Symbol::Period),
            b'=' => Some(Symbol::Equals),
            _ => None,
        };
        if let Some(symbol) = punct {
            self.pos += 1;
            return Some(Token::bare(symbol));
        }
        match byte {
            b'"' => self.string(),
            b if b.is_ascii_alphabetic() => Some(self.word()),
            _ => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.input.get(self.pos), Some(b' ' | b'\t' | b'\n')) {
            self.pos += 1;
        }
    }

    // A backslash takes the following byte literally, whatever it is. An
    // unterminated literal yields no token and leaves the cursor on the quote.
    fn string(&mut self) -> Option<Token> {
        let start = self.pos;
        let mut pos = start + 1;
        let mut buf = Vec::new();
        loop {
            match self.input.get(pos) {
                None => {
                    self.pos = start;
                    return None;
                }
                Some(b'"') => break,
                Some(b'\\') => {
                    let escaped = self.input.get(pos + 1)?;
                    buf.push(*escaped);
                    pos += 2;
                }
                Some(b) => {
                    buf.push(*b);
                    pos += 1;
                }
            }
        }
        self.pos = pos + 1;
        Some(Token::with_text(
            Symbol::Str,
            String::from_utf8_lossy(&buf).into_owned(),
        ))
    }

    fn word(&mut self) -> Token {
        let start = self.pos;
        while self
            .input
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphabetic())
        {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];
        for (keyword, symbol) in KEYWORDS {
            if word.eq_ignore_ascii_case(keyword.as_bytes()) {
                return Token::bare(symbol);
            }
        }
        Token::with_text(Symbol::Ident, String::from_utf8_lossy(word).into_owned())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
