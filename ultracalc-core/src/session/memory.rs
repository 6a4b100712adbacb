use num_traits::ToPrimitive;

use crate::value::Value;

/// The memory register of the calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    value: Value,
    active: bool,
}

impl Default for Memory {
    fn default() -> Self {
        Memory {
            value: Value::int(0),
            active: false,
        }
    }
}

impl Memory {
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the memory indicator is lit.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn clear(&mut self) {
        *self = Memory::default();
    }

    pub fn add(&mut self, x: f64) {
        self.value = Value::Float(self.as_f64() + x);
        self.active = true;
    }

    pub fn subtract(&mut self, x: f64) {
        self.value = Value::Float(self.as_f64() - x);
        self.active = true;
    }

    /// The text appended to the expression when the memory is recalled.
    pub fn recall(&self) -> String {
        self.value.to_string()
    }

    fn as_f64(&self) -> f64 {
        match &self.value {
            Value::Int(n) => n.to_f64().unwrap_or(0.0),
            Value::Float(f) => *f,
        }
    }
}
