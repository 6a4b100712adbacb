use num_bigint::BigInt;
use thiserror::Error;

use super::lexer::{IdentKind, Token, TokenKind};
use super::node::{BinOp, ConstKind, Func, Node, UnaryOp};
use super::value::Value;

#[derive(PartialEq, Eq)]
enum StopPolicy {
    IfWeaker(Power),
    IfWeakerOrEqual(Power),
    Never,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Power {
    /// Closing parentheses and commas end a sub-expression
    Separator,
    Add,
    Mul,
    Exp,
}

/// Deepest nesting of sub-expressions accepted by the parser.
///
/// Parentheses, signs, function arguments, right operands and each
/// operator of a chain all add a level. Evaluation recurses over the same
/// tree, so this also bounds its stack use.
pub const MAX_DEPTH: usize = 256;

/// A parser converts a list of tokens into an AST (abstract syntax tree).
///
/// Only numbers, the known constants and functions, and the arithmetic
/// operators are accepted; anything else is an error.
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of expression")]
    EarlyEof,
    #[error("unexpected token at index {index}")]
    UnexpectedToken { index: usize },
    #[error("unmatched parenthesis at index {index}")]
    UnmatchedParen { index: usize },
    #[error("expression nested too deeply at index {index}")]
    TooDeep { index: usize },
    #[error("`{func}` takes {min} to {max} argument(s), got {found}")]
    WrongArity {
        func: Func,
        min: usize,
        max: usize,
        found: usize,
    },
}

fn infix_power(kind: &TokenKind) -> Option<Power> {
    Some(match kind {
        TokenKind::CloseParen | TokenKind::Comma => Power::Separator,
        TokenKind::Plus | TokenKind::Minus => Power::Add,
        TokenKind::Times | TokenKind::Slash | TokenKind::Percent => Power::Mul,
        TokenKind::DoubleStar => Power::Exp,

        // there is no implicit multiplication
        _ => return None,
    })
}

fn ident_to_func(kind: IdentKind) -> Option<Func> {
    Some(match kind {
        IdentKind::Sin => Func::Sin,
        IdentKind::Cos => Func::Cos,
        IdentKind::Tan => Func::Tan,
        IdentKind::Asin => Func::Asin,
        IdentKind::Acos => Func::Acos,
        IdentKind::Atan => Func::Atan,
        IdentKind::Sqrt => Func::Sqrt,
        IdentKind::Log => Func::Log,
        IdentKind::Log10 => Func::Log10,
        IdentKind::Factorial => Func::Factorial,
        IdentKind::Abs => Func::Abs,
        IdentKind::Radians => Func::Radians,
        IdentKind::Degrees => Func::Degrees,
        IdentKind::Pi | IdentKind::Tau | IdentKind::E => return None,
    })
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &[Token]) -> Parser {
        Parser {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let token = self.peek().cloned().ok_or(ParseError::EarlyEof)?;
        self.index += 1;
        Ok(token)
    }

    /// Consumes a closing parenthesis for the opening one at `open_index`.
    fn expect_close_paren(&mut self, open_index: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::CloseParen,
                ..
            }) => {
                self.index += 1;
                Ok(())
            }
            Some(token) => Err(ParseError::UnexpectedToken { index: token.index }),
            None => Err(ParseError::UnmatchedParen { index: open_index }),
        }
    }

    fn parse_call(&mut self, func: Func) -> Result<Node, ParseError> {
        let open = self.next_token()?;
        if open.kind != TokenKind::OpenParen {
            return Err(ParseError::UnexpectedToken { index: open.index });
        }

        let mut args = vec![self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Separator))?];
        while let Some(Token {
            kind: TokenKind::Comma,
            ..
        }) = self.peek()
        {
            // consume the comma
            self.index += 1;
            args.push(self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Separator))?);
        }
        self.expect_close_paren(open.index)?;

        let (min, max) = func.arity();
        if args.len() < min || args.len() > max {
            return Err(ParseError::WrongArity {
                func,
                min,
                max,
                found: args.len(),
            });
        }

        Ok(Node::Call(func, args))
    }

    fn parse_nud(&mut self) -> Result<Node, ParseError> {
        let token = self.next_token()?;

        Ok(match token.kind {
            TokenKind::Int(val) => Node::Num(Value::Int(BigInt::from(val))),
            TokenKind::Float(val) => Node::Num(Value::Float(val)),
            TokenKind::Ident(kind) => match kind {
                // constants
                IdentKind::Pi => Node::Const(ConstKind::Pi),
                IdentKind::Tau => Node::Const(ConstKind::Tau),
                IdentKind::E => Node::Const(ConstKind::E),
                // functions
                _ => match ident_to_func(kind) {
                    Some(func) => self.parse_call(func)?,
                    None => return Err(ParseError::UnexpectedToken { index: token.index }),
                },
            },

            // A sign binds weaker than `**` but stronger than `*`, so that
            // -2**2 is -(2**2) and -2*3 is (-2)*3.
            TokenKind::Minus => Node::Unary(
                UnaryOp::Neg,
                Box::new(self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Mul))?),
            ),
            TokenKind::Plus => Node::Unary(
                UnaryOp::Pos,
                Box::new(self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Mul))?),
            ),
            TokenKind::OpenParen => {
                let expr = self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Separator))?;
                self.expect_close_paren(token.index)?;
                expr
            }

            _ => return Err(ParseError::UnexpectedToken { index: token.index }),
        })
    }

    fn parse_led(&mut self, left: Node) -> Result<Node, ParseError> {
        let token = self.next_token()?;

        let (op, policy) = match token.kind {
            // left associativity
            TokenKind::Plus => (BinOp::Add, StopPolicy::IfWeakerOrEqual(Power::Add)),
            TokenKind::Minus => (BinOp::Sub, StopPolicy::IfWeakerOrEqual(Power::Add)),
            TokenKind::Times => (BinOp::Mul, StopPolicy::IfWeakerOrEqual(Power::Mul)),
            TokenKind::Slash => (BinOp::Div, StopPolicy::IfWeakerOrEqual(Power::Mul)),
            TokenKind::Percent => (BinOp::Rem, StopPolicy::IfWeakerOrEqual(Power::Mul)),

            // right associativity: 1**2**3 is parsed as 1**(2**3), not (1**2)**3
            TokenKind::DoubleStar => (BinOp::Pow, StopPolicy::IfWeaker(Power::Exp)),

            // only reachable at the top level, where nothing stops the parser
            TokenKind::CloseParen => {
                return Err(ParseError::UnmatchedParen { index: token.index })
            }
            _ => return Err(ParseError::UnexpectedToken { index: token.index }),
        };

        Ok(Node::binary(op, left, self.parse_range(&policy)?))
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let index = self
                .peek()
                .or_else(|| self.tokens.last())
                .map_or(0, |token| token.index);
            return Err(ParseError::TooDeep { index });
        }
        Ok(())
    }

    fn parse_range(&mut self, policy: &StopPolicy) -> Result<Node, ParseError> {
        let outer_depth = self.depth;
        self.enter()?;
        let mut node = self.parse_nud()?;

        while let Some(peek) = self.peek() {
            let power = match infix_power(&peek.kind) {
                Some(val) => val,
                None => return Err(ParseError::UnexpectedToken { index: peek.index }),
            };

            // There are multiple modes to tell the parser when to stop.
            // For example, if we are parsing an expression inside of
            // parentheses, we want to stop when we encounter a closing
            // parenthesis.
            let should_stop = match policy {
                StopPolicy::IfWeaker(min_power) => power < *min_power,
                StopPolicy::IfWeakerOrEqual(min_power) => power <= *min_power,
                StopPolicy::Never => false,
            };
            if should_stop {
                break;
            }

            // the tree gets one level taller with each operator of a chain
            self.enter()?;
            node = self.parse_led(node)?;
        }

        self.depth = outer_depth;
        Ok(node)
    }

    pub fn parse(mut self) -> Result<Node, ParseError> {
        self.parse_range(&StopPolicy::Never)
    }
}
