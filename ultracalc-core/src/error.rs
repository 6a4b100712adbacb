use thiserror::Error;

use crate::lexer::LexerError;
use crate::node::EvalError;
use crate::parser::ParseError;

/// Why an expression could not be evaluated.
///
/// Only two kinds are shown to the user: a division by zero, and every
/// other failure folded into an invalid expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("invalid expression: {0}")]
    InvalidExpression(#[from] InvalidReason),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidReason {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(EvalError),
}

impl From<LexerError> for CalcError {
    fn from(err: LexerError) -> Self {
        CalcError::InvalidExpression(err.into())
    }
}

impl From<ParseError> for CalcError {
    fn from(err: ParseError) -> Self {
        CalcError::InvalidExpression(err.into())
    }
}

impl From<EvalError> for CalcError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::DivisionByZero => CalcError::DivisionByZero,
            other => CalcError::InvalidExpression(InvalidReason::Eval(other)),
        }
    }
}
