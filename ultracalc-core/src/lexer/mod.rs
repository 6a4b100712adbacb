mod token;

use std::iter::FusedIterator;
use std::str::FromStr;

use num_bigint::BigUint;
use thiserror::Error;

pub use self::token::*;

/// The kind of a lexer error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerErrorKind {
    #[error("unknown token")]
    UnknownToken,
    #[error("unknown identifier `{0}`")]
    UnknownIdent(String),
}

/// When the expression is malformed, the lexer will return this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at index {index}")]
pub struct LexerError {
    // The error kind
    pub kind: LexerErrorKind,

    /// The index of the first character which caused the error
    pub index: usize,
}

/// A lexer reads a mathematical expression and returns a list of tokens in the
/// expression.
/// This allows us to read the expression in a simpler way later when we want
/// to parse it.
pub struct Lexer<'a> {
    src: &'a str,
    expr: &'a [u8],
    index: usize,
    has_failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from an expression.
    pub fn new(expr: &str) -> Lexer {
        Lexer {
            src: expr,
            expr: expr.as_bytes(),
            index: 0,
            has_failed: false,
        }
    }

    fn peek_at(&self, index: usize) -> Option<char> {
        self.expr.get(index).map(|&b| b as char)
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(self.index)
    }

    fn consume_whitespace(&mut self) {
        while let Some(' ' | '\n' | '\r' | '\t') = self.peek() {
            self.index += 1;
        }
    }

    fn consume_digits(&mut self) -> usize {
        let start = self.index;
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.index += 1;
        }
        self.index - start
    }

    fn try_consume_single_char_token(&mut self) -> Option<Token> {
        let original_index = self.index;
        let c = self.peek()?;

        // `**` is the only operator made of two characters
        if c == '*' && self.peek_at(self.index + 1) == Some('*') {
            self.index += 2;
            return Some(Token {
                kind: TokenKind::DoubleStar,
                index: original_index,
            });
        }

        let kind = TokenKind::from_single_char(c)?;

        // consume the character
        self.index += 1;

        Some(Token {
            kind,
            index: original_index,
        })
    }

    fn try_consume_ident(&mut self) -> Option<Result<Token, LexerError>> {
        let original_index = self.index;

        // an identifier starts with a letter, digits are allowed after that
        // for names like `log10`
        if !self.peek()?.is_ascii_alphabetic() {
            return None;
        }
        while self.peek().map_or(false, |c| c.is_ascii_alphanumeric()) {
            self.index += 1;
        }

        let ident = &self.src[original_index..self.index];
        Some(match IdentKind::from_str(ident) {
            Ok(kind) => Ok(Token {
                kind: TokenKind::Ident(kind),
                index: original_index,
            }),
            Err(()) => Err(LexerError {
                kind: LexerErrorKind::UnknownIdent(ident.to_string()),
                index: original_index,
            }),
        })
    }

    /// Checks whether an exponent like `e5`, `E-3` or `e+10` starts at the
    /// current index and returns the index right after its sign.
    fn exponent_digits_start(&self) -> Option<usize> {
        match self.peek()? {
            'e' | 'E' => {}
            _ => return None,
        }
        let mut i = self.index + 1;
        if let Some('+' | '-') = self.peek_at(i) {
            i += 1;
        }
        match self.peek_at(i) {
            Some(c) if c.is_ascii_digit() => Some(i),
            _ => None,
        }
    }

    fn try_consume_num(&mut self) -> Option<Token> {
        let original_index = self.index;
        let mut has_digit = self.consume_digits() > 0;
        let mut is_float = false;

        if self.peek() == Some('.') {
            self.index += 1;
            is_float = true;
            has_digit |= self.consume_digits() > 0;
        }

        if !has_digit {
            self.index = original_index;
            return None;
        }

        // `2e` is two times the constant e, `2e1` is twenty
        if let Some(digits_start) = self.exponent_digits_start() {
            self.index = digits_start;
            self.consume_digits();
            is_float = true;
        }

        let kind = if is_float {
            // the standard parser rounds to the nearest double
            match self.src[original_index..self.index].parse::<f64>() {
                Ok(val) => TokenKind::Float(val),
                Err(_) => {
                    self.index = original_index;
                    return None;
                }
            }
        } else {
            // only ASCII digits were consumed
            match BigUint::parse_bytes(&self.expr[original_index..self.index], 10) {
                Some(val) => TokenKind::Int(val),
                None => {
                    self.index = original_index;
                    return None;
                }
            }
        };

        Some(Token {
            kind,
            index: original_index,
        })
    }
}

// This means that when it returns a none option, then it will keep returning
// none options.
impl<'a> FusedIterator for Lexer<'a> {}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_failed {
            return None;
        }

        self.consume_whitespace();

        // is there anything left?
        if self.index >= self.expr.len() {
            return None;
        }

        let original_index = self.index;
        let maybe_token = self
            .try_consume_single_char_token()
            .or_else(|| self.try_consume_num());

        // if we couldn't get a token yet, try to parse an identifier
        let maybe_token = match maybe_token {
            Some(val) => Some(val),
            None => match self.try_consume_ident() {
                Some(Ok(val)) => Some(val),
                Some(Err(err)) => {
                    self.has_failed = true;

                    // do not try another token if this didn't work
                    return Some(Err(err));
                }
                None => None,
            },
        };

        Some(maybe_token.ok_or_else(|| {
            self.has_failed = true;

            // if we didn't get any token, then it is unknown
            LexerError {
                kind: LexerErrorKind::UnknownToken,
                index: original_index,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(expr: &str) -> Vec<TokenKind> {
        Lexer::new(expr).map(|r| r.unwrap().kind).collect()
    }

    fn int(n: u32) -> TokenKind {
        TokenKind::Int(BigUint::from(n))
    }

    #[test]
    fn it_handles_empty_string() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn it_ignores_whitespace() {
        let mut lexer = Lexer::new("\t+ \r\n");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Plus,
                index: 1
            }))
        );
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn it_handles_single_char_tokens() {
        const EXPECTED: [TokenKind; 8] = [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Times,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Comma,
        ];

        let expected_tokens: Vec<Token> = EXPECTED
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, kind)| Token { kind, index: i })
            .collect();

        let actual_tokens: Vec<Token> = Lexer::new("+-*/%(),").map(|r| r.unwrap()).collect();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn it_reads_double_star_as_one_token() {
        assert_eq!(
            kinds("2**3*4"),
            vec![int(2), TokenKind::DoubleStar, int(3), TokenKind::Times, int(4)]
        );
        assert_eq!(
            kinds("2* *3"),
            vec![int(2), TokenKind::Times, TokenKind::Times, int(3)]
        );
    }

    #[test]
    fn it_handles_integer_numbers() {
        assert_eq!(kinds("123"), vec![int(123)]);
        assert_eq!(kinds("-123"), vec![TokenKind::Minus, int(123)]);
        assert_eq!(kinds("1 2"), vec![int(1), int(2)]);

        let big = kinds("123456789012345678901234567890");
        assert_eq!(
            big,
            vec![TokenKind::Int(
                "123456789012345678901234567890".parse::<BigUint>().unwrap()
            )]
        );
    }

    #[test]
    fn it_reads_long_integers() {
        let literal = format!("1{}", "0".repeat(20_000));
        assert_eq!(
            kinds(&literal),
            vec![TokenKind::Int(num_traits::pow(BigUint::from(10u32), 20_000))]
        );
        assert_eq!(kinds("007"), vec![int(7)]);
    }

    #[test]
    fn it_handles_numbers_with_decimal_points() {
        assert_eq!(kinds("123."), vec![TokenKind::Float(123.0)]);
        assert_eq!(kinds(".125"), vec![TokenKind::Float(0.125)]);
        assert_eq!(kinds("0.1"), vec![TokenKind::Float(0.1)]);
        assert_eq!(kinds("-.5"), vec![TokenKind::Minus, TokenKind::Float(0.5)]);
        assert_eq!(kinds("1.5.5"), vec![TokenKind::Float(1.5), TokenKind::Float(0.5)]);

        // a lone dot is not a number
        let mut lexer = Lexer::new("+.");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Plus,
                index: 0
            }))
        );
        assert_eq!(
            lexer.next(),
            Some(Err(LexerError {
                kind: LexerErrorKind::UnknownToken,
                index: 1
            }))
        );
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn it_handles_exponents() {
        assert_eq!(kinds("1e3"), vec![TokenKind::Float(1000.0)]);
        assert_eq!(kinds("2.5E-1"), vec![TokenKind::Float(0.25)]);
        assert_eq!(kinds("1e+2"), vec![TokenKind::Float(100.0)]);

        // without digits after it, `e` is the constant
        assert_eq!(kinds("2e"), vec![int(2), TokenKind::Ident(IdentKind::E)]);
        assert_eq!(kinds("2e+1"), vec![TokenKind::Float(20.0)]);
        assert_eq!(
            kinds("2e+pi"),
            vec![
                int(2),
                TokenKind::Ident(IdentKind::E),
                TokenKind::Plus,
                TokenKind::Ident(IdentKind::Pi),
            ]
        );
    }

    #[test]
    fn it_handles_constants() {
        let mut lexer = Lexer::new("pi*tau+zzz");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Ident(IdentKind::Pi),
                index: 0
            }))
        );
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Times,
                index: 2
            }))
        );
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Ident(IdentKind::Tau),
                index: 3
            }))
        );
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Plus,
                index: 6
            }))
        );
        assert_eq!(
            lexer.next(),
            Some(Err(LexerError {
                kind: LexerErrorKind::UnknownIdent("zzz".to_string()),
                index: 7
            }))
        );
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn it_handles_functions() {
        assert_eq!(
            kinds("sin(log10(1))"),
            vec![
                TokenKind::Ident(IdentKind::Sin),
                TokenKind::OpenParen,
                TokenKind::Ident(IdentKind::Log10),
                TokenKind::OpenParen,
                int(1),
                TokenKind::CloseParen,
                TokenKind::CloseParen,
            ]
        );
        assert_eq!(kinds("LN"), vec![TokenKind::Ident(IdentKind::Log)]);
        assert_eq!(kinds("log"), vec![TokenKind::Ident(IdentKind::Log)]);
    }

    #[test]
    fn it_rejects_code() {
        let mut lexer = Lexer::new("__import__('os')");
        assert_eq!(
            lexer.next(),
            Some(Err(LexerError {
                kind: LexerErrorKind::UnknownToken,
                index: 0
            }))
        );
        assert_eq!(lexer.next(), None);

        let errors: Vec<_> = Lexer::new("1 + math").filter_map(Result::err).collect();
        assert_eq!(
            errors,
            vec![LexerError {
                kind: LexerErrorKind::UnknownIdent("math".to_string()),
                index: 4
            }]
        );
    }
}
