mod display;
mod eval;
mod rewrite;

use std::fmt;
use std::ops::*;

pub use self::eval::*;
pub use self::rewrite::*;

use crate::value::Value;

/// A constant in mathematics
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum ConstKind {
    Pi,
    Tau,
    E,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum UnaryOp {
    Neg,
    Pos,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "**",
        }
    }
}

/// A named function that can be called in an expression.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    /// Natural logarithm, or logarithm in the base given as a second
    /// argument
    Log,
    Log10,
    Factorial,
    Abs,
    Radians,
    Degrees,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sqrt => "sqrt",
            Func::Log => "log",
            Func::Log10 => "log10",
            Func::Factorial => "factorial",
            Func::Abs => "abs",
            Func::Radians => "radians",
            Func::Degrees => "degrees",
        }
    }

    /// The minimum and maximum number of arguments.
    pub fn arity(self) -> (usize, usize) {
        match self {
            Func::Log => (1, 2),
            _ => (1, 1),
        }
    }

    /// Whether the function takes an angle as its argument.
    pub fn takes_angle(self) -> bool {
        matches!(self, Func::Sin | Func::Cos | Func::Tan)
    }

    /// Whether the function returns an angle.
    pub fn returns_angle(self) -> bool {
        matches!(self, Func::Asin | Func::Acos | Func::Atan)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node is an operation in the AST (abstract syntax tree).
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Num(Value),
    Const(ConstKind),
    Unary(UnaryOp, Box<Node>),
    Binary(BinOp, Box<Node>, Box<Node>),
    Call(Func, Vec<Node>),
}

impl Node {
    /// Computes the node value.
    pub fn eval(&self) -> Result<Value, EvalError> {
        eval(self)
    }

    pub fn int(n: i64) -> Node {
        Node::Num(Value::int(n))
    }

    pub fn float(f: f64) -> Node {
        Node::Num(Value::Float(f))
    }

    pub fn call(func: Func, arg: Node) -> Node {
        Node::Call(func, vec![arg])
    }

    pub fn pow(self, rhs: Node) -> Node {
        Node::binary(BinOp::Pow, self, rhs)
    }

    pub fn binary(op: BinOp, lhs: Node, rhs: Node) -> Node {
        Node::Binary(op, Box::new(lhs), Box::new(rhs))
    }
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Self) -> Self::Output {
        Node::binary(BinOp::Add, self, rhs)
    }
}

impl Neg for Node {
    type Output = Node;

    fn neg(self) -> Self::Output {
        Node::Unary(UnaryOp::Neg, Box::new(self))
    }
}

impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Self) -> Self::Output {
        Node::binary(BinOp::Sub, self, rhs)
    }
}

impl Mul for Node {
    type Output = Node;

    fn mul(self, rhs: Self) -> Self::Output {
        Node::binary(BinOp::Mul, self, rhs)
    }
}

impl Div for Node {
    type Output = Node;

    fn div(self, rhs: Self) -> Self::Output {
        Node::binary(BinOp::Div, self, rhs)
    }
}

impl Rem for Node {
    type Output = Node;

    fn rem(self, rhs: Self) -> Self::Output {
        Node::binary(BinOp::Rem, self, rhs)
    }
}
