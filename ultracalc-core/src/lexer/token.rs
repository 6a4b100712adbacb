use num_bigint::BigUint;

use std::str::FromStr;

/// A list of all possible identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentKind {
    // constants
    Pi,
    Tau,
    E,
    // functions
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log,
    Log10,
    Factorial,
    Abs,
    Radians,
    Degrees,
}

impl FromStr for IdentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<IdentKind, ()> {
        Ok(match &*s.to_ascii_lowercase() {
            "pi" => IdentKind::Pi,
            "tau" => IdentKind::Tau,
            "e" => IdentKind::E,
            "sin" => IdentKind::Sin,
            "cos" => IdentKind::Cos,
            "tan" => IdentKind::Tan,
            "asin" => IdentKind::Asin,
            "acos" => IdentKind::Acos,
            "atan" => IdentKind::Atan,
            "sqrt" => IdentKind::Sqrt,
            // `log` is the natural logarithm, `ln` is kept as a friendlier
            // spelling of the same function
            "log" | "ln" => IdentKind::Log,
            "log10" => IdentKind::Log10,
            "factorial" => IdentKind::Factorial,
            "abs" => IdentKind::Abs,
            "radians" => IdentKind::Radians,
            "degrees" => IdentKind::Degrees,
            _ => return Err(()),
        })
    }
}

/// Tokens are simple things like numbers, operators, parentheses, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A literal without a decimal point or an exponent
    Int(BigUint),
    /// A literal with a decimal point or an exponent
    Float(f64),
    Ident(IdentKind),
    Plus,
    Minus,
    Times,
    Slash,
    Percent,
    DoubleStar,
    OpenParen,
    CloseParen,
    Comma,
}

impl TokenKind {
    pub fn from_single_char(c: char) -> Option<TokenKind> {
        Some(match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Times,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// The index of the first character of the token
    pub index: usize,
}
