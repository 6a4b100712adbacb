use std::fmt;
use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use crate::node::EvalError;

/// Integer powers with a bigger exponent are refused because the result
/// would not fit in any reasonable amount of memory.
pub const MAX_INT_EXPONENT: u32 = 4096;

/// A number produced by the evaluator.
///
/// Integers are exact and arbitrarily large; everything else is a double.
/// Operations follow the usual calculator rules: integer operands stay
/// integers for `+ - * % **`, and division always produces a float.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(BigInt),
    Float(f64),
}

fn finite(val: f64) -> Result<f64, EvalError> {
    if val.is_finite() {
        Ok(val)
    } else {
        Err(EvalError::Overflow)
    }
}

impl Value {
    pub fn int(n: i64) -> Value {
        Value::Int(BigInt::from(n))
    }

    /// Approximates the value as a double, failing when it is too large.
    pub fn to_f64(&self) -> Result<f64, EvalError> {
        match self {
            Value::Int(n) => n.to_f64().ok_or(EvalError::Overflow).and_then(finite),
            Value::Float(f) => finite(*f),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(n) => n.is_zero(),
            Value::Float(f) => *f == 0.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Value::Int(n) => n.is_negative(),
            Value::Float(f) => *f < 0.0,
        }
    }

    /// Returns the value as an integer if it has no fractional part.
    pub fn to_integer(&self) -> Option<BigInt> {
        match self {
            Value::Int(n) => Some(n.clone()),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => BigInt::from_f64(*f),
            Value::Float(_) => None,
        }
    }

    fn float_op<F>(&self, rhs: &Value, f: F) -> Result<Value, EvalError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let val = f(self.to_f64()?, rhs.to_f64()?);
        finite(val).map(Value::Float)
    }

    pub fn neg(self) -> Value {
        match self {
            Value::Int(n) => Value::Int(-n),
            Value::Float(f) => Value::Float(-f),
        }
    }

    pub fn abs(self) -> Value {
        match self {
            Value::Int(n) => Value::Int(n.abs()),
            Value::Float(f) => Value::Float(f.abs()),
        }
    }

    pub fn add(&self, rhs: &Value) -> Result<Value, EvalError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
            _ => self.float_op(rhs, |a, b| a + b),
        }
    }

    pub fn sub(&self, rhs: &Value) -> Result<Value, EvalError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a - b)),
            _ => self.float_op(rhs, |a, b| a - b),
        }
    }

    pub fn mul(&self, rhs: &Value) -> Result<Value, EvalError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a * b)),
            _ => self.float_op(rhs, |a, b| a * b),
        }
    }

    /// True division: the result is always a float.
    pub fn div(&self, rhs: &Value) -> Result<Value, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        match (self, rhs) {
            // Divide exactly first so that big integers do not lose
            // precision twice.
            (Value::Int(a), Value::Int(b)) => BigRational::new(a.clone(), b.clone())
                .to_f64()
                .ok_or(EvalError::Overflow)
                .and_then(finite)
                .map(Value::Float),
            _ => self.float_op(rhs, |a, b| a / b),
        }
    }

    /// Floored modulo: the result has the sign of the divisor.
    pub fn rem(&self, rhs: &Value) -> Result<Value, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.mod_floor(b))),
            _ => self.float_op(rhs, |a, b| {
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    r + b
                } else {
                    r
                }
            }),
        }
    }

    pub fn pow(&self, rhs: &Value) -> Result<Value, EvalError> {
        if let (Value::Int(base), Value::Int(exp)) = (self, rhs) {
            if !exp.is_negative() {
                return int_pow(base, exp).map(Value::Int);
            }
        }

        let base = self.to_f64()?;
        let exp = rhs.to_f64()?;
        if base == 0.0 && exp < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        if base < 0.0 && exp.fract() != 0.0 {
            // the result would be a complex number
            return Err(EvalError::Domain("**"));
        }
        finite(base.powf(exp)).map(Value::Float)
    }
}

fn int_pow(base: &BigInt, exp: &BigInt) -> Result<BigInt, EvalError> {
    // these bases never grow, whatever the exponent
    if base.is_zero() {
        return Ok(if exp.is_zero() {
            BigInt::from(1)
        } else {
            BigInt::zero()
        });
    }
    if base.abs() == BigInt::from(1) {
        return Ok(if base.is_negative() && exp.is_odd() {
            BigInt::from(-1)
        } else {
            BigInt::from(1)
        });
    }

    match exp.to_u32() {
        Some(e) if e <= MAX_INT_EXPONENT => Ok(base.pow(e)),
        _ => Err(EvalError::Overflow),
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) if x.is_nan() => f.write_str("nan"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(x) => {
                // `{}` prints the shortest text that reads back as the same
                // double, but drops the dot for integral values
                let text = x.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_keeps_integers_exact() {
        let a = Value::int(i64::MAX);
        let sum = a.add(&Value::int(1)).unwrap();
        assert_eq!(sum.to_string(), "9223372036854775808");

        let big = Value::int(2).pow(&Value::int(100)).unwrap();
        assert_eq!(big.to_string(), "1267650600228229401496703205376");
    }

    #[test]
    fn it_promotes_mixed_operands_to_float() {
        assert_eq!(Value::int(1).add(&Value::Float(0.5)), Ok(Value::Float(1.5)));
        assert_eq!(Value::int(3).mul(&Value::Float(2.0)), Ok(Value::Float(6.0)));
    }

    #[test]
    fn it_always_divides_to_a_float() {
        assert_eq!(Value::int(4).div(&Value::int(2)), Ok(Value::Float(2.0)));
        assert_eq!(Value::int(1).div(&Value::int(3)), Ok(Value::Float(1.0 / 3.0)));
        assert_eq!(
            Value::int(1).div(&Value::int(0)),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            Value::Float(1.0).div(&Value::Float(-0.0)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn it_uses_floored_modulo() {
        assert_eq!(Value::int(7).rem(&Value::int(3)), Ok(Value::int(1)));
        assert_eq!(Value::int(-7).rem(&Value::int(3)), Ok(Value::int(2)));
        assert_eq!(Value::int(7).rem(&Value::int(-3)), Ok(Value::int(-2)));
        assert_eq!(Value::Float(-7.5).rem(&Value::int(2)), Ok(Value::Float(0.5)));
        assert_eq!(
            Value::int(7).rem(&Value::int(0)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn it_handles_powers() {
        assert_eq!(Value::int(2).pow(&Value::int(-1)), Ok(Value::Float(0.5)));
        assert_eq!(Value::int(4).pow(&Value::Float(0.5)), Ok(Value::Float(2.0)));
        assert_eq!(Value::int(-1).pow(&Value::int(1_000_001)), Ok(Value::int(-1)));
        assert_eq!(
            Value::int(0).pow(&Value::int(-1)),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            Value::int(-8).pow(&Value::Float(1.0 / 3.0)),
            Err(EvalError::Domain("**"))
        );
        assert_eq!(
            Value::int(10).pow(&Value::int(100_000)),
            Err(EvalError::Overflow)
        );
        assert_eq!(
            Value::Float(10.0).pow(&Value::int(400)),
            Err(EvalError::Overflow)
        );
    }

    #[test]
    fn it_formats_like_a_calculator() {
        assert_eq!(Value::int(-4).to_string(), "-4");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(0.0).to_string(), "0.0");
        assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Value::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
    }
}
