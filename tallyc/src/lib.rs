use thiserror::Error;

use crate::fold::ReduceError;
use crate::lexer::{LexWarning, Lexed, Lexer};
use crate::validate::ValidationError;

pub mod arith;
pub mod fold;
pub mod lexer;
pub mod resolve;
pub mod token;
pub mod validate;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("validation failed: {0}")]
    Validation(ValidationError),
    #[error("reduction failed: {0}")]
    Reduce(ReduceError),
}

impl From<ValidationError> for EvalError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ReduceError> for EvalError {
    fn from(value: ReduceError) -> Self {
        Self::Reduce(value)
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub warnings: Vec<LexWarning>,
    pub result:   EvalResult<i64>,
}

/// Lexes, validates and reduces one line.
#[must_use]
pub fn evaluate(input: &str) -> Evaluation {
    let Lexed { tokens, warnings } = Lexer::new(input).lex_all();

    let result = validate::validate(&tokens)
        .map_err(EvalError::from)
        .and_then(|()| resolve::reduce(&tokens).map_err(EvalError::from));

    Evaluation { warnings, result }
}

/// Like [`evaluate`], dropping lexical warnings.
pub fn eval(input: &str) -> EvalResult<i64> {
    evaluate(input).result
}
