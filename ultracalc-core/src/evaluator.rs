use std::borrow::Cow;

use log::{debug, warn};

use crate::error::CalcError;
use crate::lexer::{Lexer, Token};
use crate::mode::AngleMode;
use crate::node::{rewrite_angles, Node};
use crate::parser::Parser;
use crate::result::{normalize, Evaluation, DEFAULT_DECIMALS};

/// Closes the parentheses that were left open at the end of the
/// expression.
///
/// Nothing is done when there are as many or more closing parentheses,
/// the parser reports those.
pub fn balance_parens(expr: &str) -> Cow<'_, str> {
    let open = expr.matches('(').count();
    let close = expr.matches(')').count();
    if open > close {
        let mut balanced = String::with_capacity(expr.len() + open - close);
        balanced.push_str(expr);
        balanced.extend(std::iter::repeat(')').take(open - close));
        Cow::Owned(balanced)
    } else {
        Cow::Borrowed(expr)
    }
}

/// Reads an expression into an AST, without touching the parentheses.
pub fn parse(expr: &str) -> Result<Node, CalcError> {
    let tokens = Lexer::new(expr).collect::<Result<Vec<Token>, _>>()?;
    Ok(Parser::new(&tokens).parse()?)
}

/// Evaluates an expression typed on the calculator.
pub fn evaluate(expr: &str, mode: AngleMode) -> Result<Evaluation, CalcError> {
    evaluate_with(expr, mode, DEFAULT_DECIMALS)
}

/// Same as `evaluate` but rounds the result to `decimals` places.
pub fn evaluate_with(expr: &str, mode: AngleMode, decimals: u32) -> Result<Evaluation, CalcError> {
    let expression = balance_parens(expr);
    let result = parse(&expression).and_then(|node| {
        let node = rewrite_angles(node, mode);
        debug!("evaluating `{}` in {} mode", node, mode);
        Ok(node.eval()?)
    });

    match result {
        Ok(value) => {
            let value = normalize(value, decimals);
            debug!("`{}` = {}", expression, value);
            Ok(Evaluation {
                expression: expression.into_owned(),
                value,
            })
        }
        Err(err) => {
            warn!("cannot evaluate `{}`: {}", expression, err);
            Err(err)
        }
    }
}
