//! Evaluation of flat (bracket-free) token sequences.
//!
//! Multiplicative chains are collapsed first by [`reduce_products`], leaving
//! an alternating `value (+|-) value ...` sequence that [`reduce_sum`] folds
//! left to right.

use tallyspan::{Span, Spand};
use thiserror::Error;

use crate::arith::{Operator, Tier};
use crate::token::{Kind, Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceErrorKind {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },
    #[error("unexpected '{0}' in sum")]
    UnexpectedOperator(Operator),
    #[error("division by zero")]
    DivisionByZero,
}

pub type ReduceError = Spand<ReduceErrorKind>;
pub type ReduceResult<T> = Result<T, ReduceError>;

/// Span of slot `at`, or the empty span after the last token when `at` is past the end.
fn slot_span(tokens: &[Token], at: usize) -> Span {
    tokens.get(at).map_or_else(
        || tokens.last().map(|tk| tk.span.end()).unwrap_or_default(),
        |tk| tk.span,
    )
}

fn mismatch(tokens: &[Token], at: usize, expected: Kind) -> ReduceError {
    let found = Kind::of(tokens.get(at));
    ReduceError::new(
        ReduceErrorKind::TypeMismatch { expected, found },
        slot_span(tokens, at),
    )
}

fn expect_value(tokens: &[Token], at: usize) -> ReduceResult<Spand<i64>> {
    match tokens.get(at) {
        Some(Token {
            kind: TokenKind::Value(x),
            span,
        }) => Ok(Spand::new(*x, *span)),
        _ => Err(mismatch(tokens, at, Kind::Value)),
    }
}

fn expect_operation(tokens: &[Token], at: usize) -> ReduceResult<Spand<Operator>> {
    match tokens.get(at) {
        Some(Token {
            kind: TokenKind::Operation(op),
            span,
        }) => Ok(Spand::new(*op, *span)),
        _ => Err(mismatch(tokens, at, Kind::Operation)),
    }
}

fn apply(lhs: Spand<i64>, op: Operator, rhs: Spand<i64>) -> ReduceResult<Spand<i64>> {
    let value = op
        .apply(lhs.kind, rhs.kind)
        .map_err(|kind| ReduceError::new(kind, rhs.span))?;
    Ok(Spand::new(value, lhs.span.join(rhs.span)))
}

/// Product pass: collapses every `*`/`/` chain into a single value.
///
/// Sequences shorter than one `value op value` triple pass through as they are.
pub fn reduce_products(tokens: &[Token]) -> ReduceResult<Vec<Token>> {
    if tokens.len() < 3 {
        return Ok(tokens.to_vec());
    }

    let mut out = Vec::with_capacity(tokens.len());
    let mut acc = expect_value(tokens, 0)?;
    let mut at = 1;

    while at < tokens.len() {
        let op = expect_operation(tokens, at)?;
        let rhs = expect_value(tokens, at + 1)?;

        match op.kind.tier() {
            Tier::Multiplicative => acc = apply(acc, op.kind, rhs)?,
            Tier::Additive => {
                out.push(acc.map(TokenKind::Value));
                out.push(op.map(TokenKind::Operation));
                acc = rhs;
            }
        }
        at += 2;
    }

    out.push(acc.map(TokenKind::Value));
    Ok(out)
}

/// Sum pass: folds an alternating `value (+|-) value ...` sequence left to right.
pub fn reduce_sum(tokens: &[Token]) -> ReduceResult<i64> {
    let mut acc = expect_value(tokens, 0)?;
    let mut at = 1;

    while at < tokens.len() {
        let op = expect_operation(tokens, at)?;
        if op.kind.tier() != Tier::Additive {
            return Err(ReduceError::new(
                ReduceErrorKind::UnexpectedOperator(op.kind),
                op.span,
            ));
        }
        let rhs = expect_value(tokens, at + 1)?;
        acc = apply(acc, op.kind, rhs)?;
        at += 2;
    }

    Ok(acc.kind)
}

pub fn fold_flat(tokens: &[Token]) -> ReduceResult<i64> {
    reduce_sum(&reduce_products(tokens)?)
}
