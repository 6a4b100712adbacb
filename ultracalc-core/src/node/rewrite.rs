use super::{Func, Node};
use crate::mode::AngleMode;

/// Makes the trigonometric functions work in the given angle mode.
///
/// In degrees, `sin(x)` becomes `sin(radians(x))` and `asin(x)` becomes
/// `degrees(asin(x))`, the same for the other functions of each family.
/// In radians, the native functions are already right and the node is
/// returned as is.
pub fn rewrite_angles(node: Node, mode: AngleMode) -> Node {
    if mode == AngleMode::Radians {
        return node;
    }

    match node {
        Node::Call(func, args) => {
            let args = args
                .into_iter()
                .map(|arg| rewrite_angles(arg, mode))
                .collect::<Vec<_>>();

            if func.takes_angle() {
                let args = args
                    .into_iter()
                    .map(|arg| Node::call(Func::Radians, arg))
                    .collect();
                Node::Call(func, args)
            } else if func.returns_angle() {
                Node::call(Func::Degrees, Node::Call(func, args))
            } else {
                Node::Call(func, args)
            }
        }
        Node::Unary(op, inner) => Node::Unary(op, Box::new(rewrite_angles(*inner, mode))),
        Node::Binary(op, lhs, rhs) => Node::Binary(
            op,
            Box::new(rewrite_angles(*lhs, mode)),
            Box::new(rewrite_angles(*rhs, mode)),
        ),

        // leaves do not contain any function
        node => node,
    }
}
