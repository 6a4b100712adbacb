use std::fmt;
use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::value::Value;

/// Number of decimal places kept in a result unless configured otherwise.
pub const DEFAULT_DECIMALS: u32 = 10;

/// A struct that holds the result of a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The expression that was evaluated, after its parentheses were
    /// balanced
    pub expression: String,

    /// The result value
    pub value: Value,
}

impl Display for Evaluation {
    fn fmt(&self, out: &mut Formatter) -> fmt::Result {
        write!(out, "{} = {}", self.expression, self.value)
    }
}

/// Cleans up a raw result for display.
///
/// A float without a fractional part becomes an integer, any other float
/// is rounded to `decimals` places. Integers are already exact.
pub fn normalize(value: Value, decimals: u32) -> Value {
    match value {
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => match BigInt::from_f64(f) {
            Some(n) => Value::Int(n),
            None => Value::Float(f),
        },
        // formatting rounds on the exact decimal expansion, which
        // multiplying by a power of ten would not
        Value::Float(f) if f.is_finite() => {
            let rounded = format!("{:.*}", decimals as usize, f);
            Value::Float(rounded.parse().unwrap_or(f))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_turns_whole_floats_into_integers() {
        assert_eq!(normalize(Value::Float(4.0), 10), Value::int(4));
        assert_eq!(normalize(Value::Float(-0.0), 10), Value::int(0));
        assert_eq!(
            normalize(Value::Float(1e20), 10).to_string(),
            "100000000000000000000"
        );
    }

    #[test]
    fn it_rounds_other_floats() {
        assert_eq!(
            normalize(Value::Float(0.1 + 0.2), 10),
            Value::Float(0.3)
        );
        assert_eq!(
            normalize(Value::Float(1.0 / 3.0), 10),
            Value::Float(0.3333333333)
        );
        assert_eq!(normalize(Value::Float(2.0 / 3.0), 2), Value::Float(0.67));

        // rounding can land on a whole number but the value stays a float
        assert_eq!(normalize(Value::Float(6.123233995736766e-17), 10), Value::Float(0.0));
        assert_eq!(
            normalize(Value::Float(6.123233995736766e-17), 10).to_string(),
            "0.0"
        );
    }

    #[test]
    fn it_keeps_integers() {
        assert_eq!(normalize(Value::int(-12), 10), Value::int(-12));
    }

    #[test]
    fn it_formats_history_lines() {
        let eval = Evaluation {
            expression: "2+2".to_string(),
            value: Value::int(4),
        };
        assert_eq!(eval.to_string(), "2+2 = 4");
    }
}
