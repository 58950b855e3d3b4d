use tallyspan::{Span, Spand};
use thiserror::Error;

use crate::token::{Kind, Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    #[error("unmatched closing bracket")]
    UnmatchedClose,
    #[error("unclosed bracket")]
    UnclosedBracket,
    #[error("{0} cannot be followed by {1}")]
    IllegalPair(Kind, Kind),
}

pub type ValidationError = Spand<ValidationErrorKind>;
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Whether `cur` may directly follow `prev`.
#[must_use]
pub const fn can_follow(prev: Kind, cur: Kind) -> bool {
    use Kind::{LeftBracket, Operation, RightBracket, Value};

    matches!(
        (prev, cur),
        (Operation, Value | LeftBracket)
            | (Value, Operation | RightBracket)
            | (RightBracket, Operation | RightBracket)
            | (LeftBracket, Value | LeftBracket)
    )
}

/// Balance counter over the brackets of `tokens`.
pub fn check_brackets(tokens: &[Token]) -> ValidationResult<()> {
    // spans of the brackets still open; its length is the balance
    let mut open: Vec<Span> = Vec::new();

    for tk in tokens {
        match tk.kind {
            TokenKind::LeftBracket => open.push(tk.span),
            TokenKind::RightBracket => {
                if open.pop().is_none() {
                    return Err(ValidationError::new(
                        ValidationErrorKind::UnmatchedClose,
                        tk.span,
                    ));
                }
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(span) => Err(ValidationError::new(
            ValidationErrorKind::UnclosedBracket,
            span,
        )),
        None => Ok(()),
    }
}

pub fn check_pairs(tokens: &[Token]) -> ValidationResult<()> {
    for pair in tokens.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let (a, b) = (prev.kind.kind(), cur.kind.kind());
        if !can_follow(a, b) {
            return Err(ValidationError::new(
                ValidationErrorKind::IllegalPair(a, b),
                prev.span.join(cur.span),
            ));
        }
    }
    Ok(())
}

pub fn validate(tokens: &[Token]) -> ValidationResult<()> {
    check_brackets(tokens)?;
    check_pairs(tokens)
}

#[must_use]
pub fn is_valid(tokens: &[Token]) -> bool {
    validate(tokens).is_ok()
}
