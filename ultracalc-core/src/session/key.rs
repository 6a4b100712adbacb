use std::f64::consts::{E, PI};

/// The four operator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn text(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

/// Keys that open a function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    Sqrt,
    Factorial,
    Abs,
}

impl FunctionKey {
    fn text(self) -> &'static str {
        match self {
            FunctionKey::Sin => "sin(",
            FunctionKey::Cos => "cos(",
            FunctionKey::Tan => "tan(",
            FunctionKey::Asin => "asin(",
            FunctionKey::Acos => "acos(",
            FunctionKey::Atan => "atan(",
            FunctionKey::Log => "log10(",
            FunctionKey::Ln => "ln(",
            FunctionKey::Sqrt => "sqrt(",
            FunctionKey::Factorial => "factorial(",
            FunctionKey::Abs => "abs(",
        }
    }
}

/// A button of the calculator, or the keyboard shortcut for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Point,
    Op(Operator),
    OpenParen,
    CloseParen,
    Function(FunctionKey),
    /// `x²`
    Square,
    /// `x^y`
    Power,
    Pi,
    E,
    /// `1/x`, applies to the whole expression
    Reciprocal,
    Percent,
    Mod,
    Clear,
    Backspace,
    Equals,
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
}

/// What a key does to the expression buffer.
pub(crate) enum Action {
    Append(String),
    Wrap(&'static str, &'static str),
    Clear,
    Backspace,
    Calculate,
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
}

impl Key {
    /// Reads the label printed on a button.
    pub fn from_label(label: &str) -> Option<Key> {
        Some(match label {
            "." => Key::Point,
            "+" => Key::Op(Operator::Add),
            "-" => Key::Op(Operator::Subtract),
            "×" | "*" => Key::Op(Operator::Multiply),
            "÷" | "/" => Key::Op(Operator::Divide),
            "(" => Key::OpenParen,
            ")" => Key::CloseParen,
            "sin" => Key::Function(FunctionKey::Sin),
            "cos" => Key::Function(FunctionKey::Cos),
            "tan" => Key::Function(FunctionKey::Tan),
            "asin" => Key::Function(FunctionKey::Asin),
            "acos" => Key::Function(FunctionKey::Acos),
            "atan" => Key::Function(FunctionKey::Atan),
            "log" => Key::Function(FunctionKey::Log),
            "ln" => Key::Function(FunctionKey::Ln),
            "√" => Key::Function(FunctionKey::Sqrt),
            "n!" => Key::Function(FunctionKey::Factorial),
            "abs" => Key::Function(FunctionKey::Abs),
            "x²" => Key::Square,
            "x^y" => Key::Power,
            "π" => Key::Pi,
            "e" => Key::E,
            "1/x" => Key::Reciprocal,
            "%" => Key::Percent,
            "mod" => Key::Mod,
            "C" => Key::Clear,
            "⌫" => Key::Backspace,
            "=" => Key::Equals,
            "MC" => Key::MemoryClear,
            "MR" => Key::MemoryRecall,
            "M+" => Key::MemoryAdd,
            "M-" => Key::MemorySubtract,
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => return Key::from_char(c),
                    _ => return None,
                }
            }
        })
    }

    /// Reads a character typed on the keyboard.
    ///
    /// Only digits, the four operators, the point and parentheses have a
    /// shortcut.
    pub fn from_char(c: char) -> Option<Key> {
        Some(match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' => Key::Point,
            '+' => Key::Op(Operator::Add),
            '-' => Key::Op(Operator::Subtract),
            '*' => Key::Op(Operator::Multiply),
            '/' => Key::Op(Operator::Divide),
            '(' => Key::OpenParen,
            ')' => Key::CloseParen,
            _ => return None,
        })
    }

    pub(crate) fn action(self) -> Action {
        let text = match self {
            Key::Digit(d) => (d % 10).to_string(),
            Key::Point => ".".to_string(),
            Key::Op(op) => op.text().to_string(),
            Key::OpenParen => "(".to_string(),
            Key::CloseParen => ")".to_string(),
            Key::Function(func) => func.text().to_string(),
            Key::Square => "**2".to_string(),
            Key::Power => "**".to_string(),
            Key::Pi => PI.to_string(),
            Key::E => E.to_string(),
            Key::Percent => "/100".to_string(),
            Key::Mod => "%".to_string(),

            Key::Reciprocal => return Action::Wrap("1/(", ")"),
            Key::Clear => return Action::Clear,
            Key::Backspace => return Action::Backspace,
            Key::Equals => return Action::Calculate,
            Key::MemoryClear => return Action::MemoryClear,
            Key::MemoryRecall => return Action::MemoryRecall,
            Key::MemoryAdd => return Action::MemoryAdd,
            Key::MemorySubtract => return Action::MemorySubtract,
        };
        Action::Append(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_button_labels() {
        assert_eq!(Key::from_label("7"), Some(Key::Digit(7)));
        assert_eq!(Key::from_label("×"), Some(Key::Op(Operator::Multiply)));
        assert_eq!(Key::from_label("÷"), Some(Key::Op(Operator::Divide)));
        assert_eq!(Key::from_label("√"), Some(Key::Function(FunctionKey::Sqrt)));
        assert_eq!(Key::from_label("M-"), Some(Key::MemorySubtract));
        assert_eq!(Key::from_label("e"), Some(Key::E));
        assert_eq!(Key::from_label("DEG"), None);
        assert_eq!(Key::from_label(""), None);
    }

    #[test]
    fn it_reads_keyboard_shortcuts() {
        assert_eq!(Key::from_char('0'), Some(Key::Digit(0)));
        assert_eq!(Key::from_char('*'), Some(Key::Op(Operator::Multiply)));
        assert_eq!(Key::from_char('x'), None);
    }

    #[test]
    fn it_maps_logarithm_keys() {
        assert_eq!(FunctionKey::Log.text(), "log10(");
        assert_eq!(FunctionKey::Ln.text(), "ln(");
    }
}
