use std::f64::consts::{E, PI, TAU};

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use thiserror::Error;

use super::{BinOp, ConstKind, Func, Node, UnaryOp};
use crate::value::Value;

/// Factorials of bigger numbers are refused, the result would have more
/// than sixteen thousand digits.
pub const MAX_FACTORIAL: u32 = 5000;

/// A description of the error of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("math domain error in `{0}`")]
    Domain(&'static str),
    #[error("numeric overflow")]
    Overflow,
    #[error("`{func}` cannot take {found} argument(s)")]
    WrongArity { func: Func, found: usize },
}

/// Computes the node value.
pub fn eval(node: &Node) -> Result<Value, EvalError> {
    Ok(match node {
        // a literal like 1e999 reads as infinity
        Node::Num(Value::Float(f)) if !f.is_finite() => return Err(EvalError::Overflow),
        Node::Num(val) => val.clone(),
        Node::Const(kind) => Value::Float(match kind {
            ConstKind::Pi => PI,
            ConstKind::Tau => TAU,
            ConstKind::E => E,
        }),
        Node::Unary(op, inner) => {
            let inner = eval(inner)?;
            match op {
                UnaryOp::Neg => inner.neg(),
                UnaryOp::Pos => inner,
            }
        }
        Node::Binary(op, lhs, rhs) => {
            let lhs = eval(lhs)?;
            let rhs = eval(rhs)?;
            match op {
                BinOp::Add => lhs.add(&rhs)?,
                BinOp::Sub => lhs.sub(&rhs)?,
                BinOp::Mul => lhs.mul(&rhs)?,
                BinOp::Div => lhs.div(&rhs)?,
                BinOp::Rem => lhs.rem(&rhs)?,
                BinOp::Pow => lhs.pow(&rhs)?,
            }
        }
        Node::Call(func, args) => eval_call(*func, args)?,
    })
}

fn eval_call(func: Func, args: &[Node]) -> Result<Value, EvalError> {
    let (min, max) = func.arity();
    if args.len() < min || args.len() > max {
        return Err(EvalError::WrongArity {
            func,
            found: args.len(),
        });
    }

    let arg = eval(&args[0])?;
    Ok(match func {
        Func::Sin => eval_map(&arg, f64::sin)?,
        Func::Cos => eval_map(&arg, f64::cos)?,
        Func::Tan => eval_map(&arg, f64::tan)?,
        Func::Asin | Func::Acos => {
            let x = arg.to_f64()?;
            if !(-1.0..=1.0).contains(&x) {
                return Err(EvalError::Domain(func.name()));
            }
            Value::Float(if func == Func::Asin { x.asin() } else { x.acos() })
        }
        Func::Atan => eval_map(&arg, f64::atan)?,
        Func::Sqrt => {
            if arg.is_negative() {
                return Err(EvalError::Domain(func.name()));
            }
            eval_map(&arg, f64::sqrt)?
        }
        Func::Log => {
            let ln = positive_log(&arg, func, f64::ln)?;
            match args.get(1) {
                None => Value::Float(ln),
                Some(base) => {
                    let base_ln = positive_log(&eval(base)?, func, f64::ln)?;
                    if base_ln == 0.0 {
                        // a base of one
                        return Err(EvalError::DivisionByZero);
                    }
                    Value::Float(ln / base_ln)
                }
            }
        }
        Func::Log10 => Value::Float(positive_log(&arg, func, f64::log10)?),
        Func::Factorial => Value::Int(factorial(&arg)?),
        Func::Abs => arg.abs(),
        Func::Radians => eval_map(&arg, f64::to_radians)?,
        Func::Degrees => eval_map(&arg, f64::to_degrees)?,
    })
}

fn eval_map<F: Fn(f64) -> f64>(val: &Value, f: F) -> Result<Value, EvalError> {
    let result = f(val.to_f64()?);
    if result.is_finite() {
        Ok(Value::Float(result))
    } else {
        Err(EvalError::Overflow)
    }
}

fn positive_log<F: Fn(f64) -> f64>(val: &Value, func: Func, f: F) -> Result<f64, EvalError> {
    let x = val.to_f64()?;
    if x <= 0.0 {
        return Err(EvalError::Domain(func.name()));
    }
    Ok(f(x))
}

fn factorial(val: &Value) -> Result<BigInt, EvalError> {
    let n = val
        .to_integer()
        .filter(|n| !n.is_negative())
        .ok_or(EvalError::Domain(Func::Factorial.name()))?;
    let n = n
        .to_u32()
        .filter(|&n| n <= MAX_FACTORIAL)
        .ok_or(EvalError::Overflow)?;
    Ok((2..=n).fold(BigInt::from(1), |acc, k| acc * k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(node: Node) -> f64 {
        eval(&node).unwrap().to_f64().unwrap()
    }

    #[test]
    fn it_evaluates_operators_with_integers() {
        let node = (Node::int(2) + Node::int(3)) * Node::int(4) - Node::int(1);
        assert_eq!(eval(&node), Ok(Value::int(19)));
        assert_eq!(eval(&(Node::int(7) % Node::int(4))), Ok(Value::int(3)));
        assert_eq!(eval(&Node::int(2).pow(Node::int(10))), Ok(Value::int(1024)));
        assert_eq!(eval(&-Node::int(5)), Ok(Value::int(-5)));
    }

    #[test]
    fn it_evaluates_functions() {
        assert_eq!(approx(Node::call(Func::Sqrt, Node::int(16))), 4.0);
        assert_eq!(approx(Node::call(Func::Log10, Node::int(1000))), 3.0);
        assert_eq!(approx(Node::call(Func::Log, Node::Const(ConstKind::E))), 1.0);
        assert_eq!(approx(Node::call(Func::Radians, Node::int(180))), PI);
        assert_eq!(approx(Node::call(Func::Degrees, Node::Const(ConstKind::Pi))), 180.0);
        assert_eq!(
            eval(&Node::call(Func::Abs, Node::int(-3))),
            Ok(Value::int(3))
        );
        assert_eq!(
            eval(&Node::call(Func::Factorial, Node::int(20))),
            Ok(Value::Int(BigInt::from(2_432_902_008_176_640_000u64)))
        );
        assert_eq!(
            eval(&Node::call(Func::Factorial, Node::float(5.0))),
            Ok(Value::int(120))
        );
        assert_eq!(
            eval(&Node::call(Func::Factorial, Node::int(0))),
            Ok(Value::int(1))
        );
    }

    #[test]
    fn it_evaluates_log_with_a_base() {
        let node = Node::Call(Func::Log, vec![Node::int(8), Node::int(2)]);
        assert!((approx(node) - 3.0).abs() < 1e-12);

        let node = Node::Call(Func::Log, vec![Node::int(8), Node::int(1)]);
        assert_eq!(eval(&node), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn it_reports_domain_errors() {
        let cases = [
            (Node::call(Func::Sqrt, Node::int(-1)), "sqrt"),
            (Node::call(Func::Log, Node::int(0)), "log"),
            (Node::call(Func::Log10, Node::int(-10)), "log10"),
            (Node::call(Func::Asin, Node::int(2)), "asin"),
            (Node::call(Func::Acos, Node::float(-1.5)), "acos"),
            (Node::call(Func::Factorial, Node::int(-1)), "factorial"),
            (Node::call(Func::Factorial, Node::float(2.5)), "factorial"),
        ];
        for (node, name) in cases.iter() {
            assert_eq!(eval(node), Err(EvalError::Domain(*name)));
        }
    }

    #[test]
    fn it_reports_division_by_zero_from_nested_nodes() {
        let node = Node::int(1) + Node::int(2) / (Node::int(3) - Node::int(3));
        assert_eq!(eval(&node), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn it_refuses_huge_results() {
        let node = Node::call(Func::Factorial, Node::int(100_000));
        assert_eq!(eval(&node), Err(EvalError::Overflow));

        let node = Node::call(Func::Sin, Node::float(1e308) * Node::int(10));
        assert_eq!(eval(&node), Err(EvalError::Overflow));

        let node = Node::call(Func::Abs, -Node::float(f64::INFINITY));
        assert_eq!(eval(&node), Err(EvalError::Overflow));
        assert_eq!(eval(&Node::float(f64::NAN)), Err(EvalError::Overflow));
    }

    #[test]
    fn it_checks_arity() {
        let node = Node::Call(Func::Sqrt, vec![Node::int(1), Node::int(2)]);
        assert_eq!(
            eval(&node),
            Err(EvalError::WrongArity {
                func: Func::Sqrt,
                found: 2
            })
        );
    }
}
