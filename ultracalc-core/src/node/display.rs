use std::fmt;
use std::fmt::{Display, Write};

use super::{BinOp, ConstKind, Node, UnaryOp};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum NodePriority {
    AddOrSub,
    MulOrDiv,
    Unary,
    Exp,
    Value,
}

fn get_node_priority(node: &Node) -> NodePriority {
    match node {
        Node::Const(_) | Node::Call(..) => NodePriority::Value,
        // a negative literal is printed with a minus sign
        Node::Num(val) if val.is_negative() => NodePriority::Unary,
        Node::Num(_) => NodePriority::Value,
        Node::Unary(..) => NodePriority::Unary,
        Node::Binary(op, ..) => match op {
            BinOp::Add | BinOp::Sub => NodePriority::AddOrSub,
            BinOp::Mul | BinOp::Div | BinOp::Rem => NodePriority::MulOrDiv,
            BinOp::Pow => NodePriority::Exp,
        },
    }
}

fn write_with_paren(
    f: &mut fmt::Formatter<'_>,
    node: &Node,
    curr_prio: NodePriority,
    strictly_weaker: bool,
) -> fmt::Result {
    let needs_paren = if strictly_weaker {
        // (1+2)+3 => 1 + 2 + 3
        get_node_priority(node) < curr_prio
    } else {
        // 1-(2-3) => 1 - (2 - 3)
        get_node_priority(node) <= curr_prio
    };
    if needs_paren {
        f.write_char('(')?;
    }
    node.fmt(f)?;
    if needs_paren {
        f.write_char(')')?;
    }
    Ok(())
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Const(kind) => match kind {
                ConstKind::Pi => write!(f, "pi"),
                ConstKind::Tau => write!(f, "tau"),
                ConstKind::E => write!(f, "e"),
            },
            Node::Num(val) => write!(f, "{}", val),
            Node::Unary(op, inner) => {
                f.write_char(match op {
                    UnaryOp::Neg => '-',
                    UnaryOp::Pos => '+',
                })?;
                // `--1` would still read back fine but is harder on the eyes
                write_with_paren(f, inner, NodePriority::Unary, false)
            }
            Node::Binary(op, lhs, rhs) => {
                if *op == BinOp::Pow {
                    // right associativity: 2**3**2 is 2**(3**2)
                    write_with_paren(f, lhs, NodePriority::Exp, false)?;
                    write!(f, " {} ", op.symbol())?;
                    write_with_paren(f, rhs, NodePriority::Exp, true)
                } else {
                    write_with_paren(f, lhs, get_node_priority(self), true)?;
                    write!(f, " {} ", op.symbol())?;
                    write_with_paren(f, rhs, get_node_priority(self), false)
                }
            }
            Node::Call(func, args) => {
                write!(f, "{}(", func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    arg.fmt(f)?;
                }
                f.write_char(')')
            }
        }
    }
}
