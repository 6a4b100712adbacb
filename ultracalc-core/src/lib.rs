pub mod config;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod mode;
pub mod node;
pub mod parser;
pub mod quiz;
pub mod result;
pub mod session;
pub mod value;

pub use config::{Config, ConfigError};
pub use error::{CalcError, InvalidReason};
pub use evaluator::{balance_parens, evaluate, evaluate_with};
pub use mode::AngleMode;
pub use result::Evaluation;
pub use session::{Key, Session};
pub use value::Value;
