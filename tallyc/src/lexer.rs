use std::str::Chars;

use tallyspan::{Span, Spand};
use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexWarningKind {
    #[error("unrecognized character '{0}', ignoring it")]
    UnrecognizedChar(char),
}

pub struct Lexer<'a> {
    chars: Chars<'a>,

    /// start byte position of current token
    byte_start: u32,

    /// byte position of cursor
    byte: u32,
}

const EOF: char = '\0';

pub type LexWarning = Spand<LexWarningKind>;
pub type LexResult<T> = Result<T, LexWarning>;

/// Output of a full scan. Warnings never stop the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    pub tokens:   Vec<Token>,
    pub warnings: Vec<LexWarning>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        assert!(u32::try_from(input.len()).is_ok());

        Self {
            chars:      input.chars(),
            byte_start: 0,
            byte:       0,
        }
    }

    #[must_use]
    pub fn lex_all(self) -> Lexed {
        let mut lexed = Lexed::default();

        for item in self {
            match item {
                Ok(ok) => lexed.tokens.push(ok),
                Err(warning) => lexed.warnings.push(warning),
            }
        }

        lexed
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF)
    }

    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        #[allow(clippy::cast_possible_truncation)]
        self.chars
            .next()
            .inspect(|c| self.byte += c.len_utf8() as u32)
    }

    const fn make_span(&self) -> Span {
        Span::new(self.byte_start, self.byte)
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.first().is_whitespace() {
            self.bump();
        }
    }

    /// Digits separated only by whitespace belong to one value, so `1 2` is `12`.
    fn number(&mut self, first: char) -> Token {
        let digit = |c: char| c.to_digit(10).map_or(0, i64::from);

        let mut value = digit(first);
        let mut hi = self.byte;
        loop {
            self.skip_whitespace();
            let c = self.first();
            if !c.is_ascii_digit() {
                break;
            }
            self.bump();
            value = value.wrapping_mul(10).wrapping_add(digit(c));
            hi = self.byte;
        }

        Token::new(TokenKind::Value(value), Span::new(self.byte_start, hi))
    }

    pub fn next_token(&mut self) -> Option<LexResult<Token>> {
        self.skip_whitespace();

        self.byte_start = self.byte;
        let c = self.bump()?;

        if c.is_ascii_digit() {
            return Some(Ok(self.number(c)));
        }

        match TokenKind::symbol(c) {
            Some(kind) => Some(Ok(Token::new(kind, self.make_span()))),
            None => Some(Err(LexWarning::new(
                LexWarningKind::UnrecognizedChar(c),
                self.make_span(),
            ))),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
