mod history;
mod key;
mod memory;

use std::time::Instant;

use log::{debug, trace};

pub use self::history::*;
pub use self::key::*;
pub use self::memory::*;

use self::key::Action;
use crate::config::Config;
use crate::error::CalcError;
use crate::evaluator::{balance_parens, evaluate_with};
use crate::mode::AngleMode;
use crate::result::Evaluation;

/// Text shown instead of a result when a calculation fails.
pub const ERROR_TEXT: &str = "Error";

/// The state of one calculator: the expression being typed, what the
/// display shows, the memory register and the history.
///
/// Time is passed in by the caller so that the delayed reset after an
/// error can be driven by any event loop.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    mode: AngleMode,
    expression: String,
    display: String,
    expression_label: String,
    history: History,
    memory: Memory,
    error: Option<CalcError>,
    reset_at: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Session::with_config(Config::default())
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_config(config: Config) -> Self {
        Session {
            mode: config.angle_mode,
            config,
            expression: String::new(),
            display: "0".to_string(),
            expression_label: String::new(),
            history: History::default(),
            memory: Memory::default(),
            error: None,
            reset_at: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The expression being typed.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The main display: the expression, a result or the error text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The small line above the display with the last evaluated
    /// expression.
    pub fn expression_label(&self) -> &str {
        &self.expression_label
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        debug!("angle mode set to {}", mode);
        self.mode = mode;
    }

    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.set_angle_mode(self.mode.toggled());
        self.mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Text of the history dialog.
    pub fn history_view(&self) -> String {
        self.history.view(self.config.history_view_limit)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The error of the last calculation, until the display is reset.
    pub fn last_error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// When the display will be cleared after an error.
    pub fn pending_reset(&self) -> Option<Instant> {
        self.reset_at
    }

    pub fn press(&mut self, key: Key, now: Instant) {
        trace!("key {:?}", key);
        match key.action() {
            Action::Append(text) => self.append(&text),
            Action::Wrap(before, after) => {
                self.expression = format!("{}{}{}", before, self.expression, after);
                self.update_display();
            }
            Action::Clear => self.clear(),
            Action::Backspace => self.backspace(),
            Action::Calculate => {
                // the outcome is reflected on the display
                let _ = self.calculate(now);
            }
            Action::MemoryClear => self.memory.clear(),
            Action::MemoryRecall => {
                let text = self.memory.recall();
                self.append(&text);
            }
            Action::MemoryAdd => {
                if let Some(x) = self.displayed_number() {
                    self.memory.add(x);
                }
            }
            Action::MemorySubtract => {
                if let Some(x) = self.displayed_number() {
                    self.memory.subtract(x);
                }
            }
        }
    }

    /// Adds text at the end of the expression.
    pub fn append(&mut self, text: &str) {
        self.expression.push_str(text);
        self.update_display();
    }

    pub fn backspace(&mut self) {
        self.expression.pop();
        self.update_display();
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.display = "0".to_string();
        self.expression_label.clear();
    }

    /// Evaluates the expression.
    ///
    /// On success the result replaces the expression so that the next
    /// keys continue from it. On failure the display shows an error
    /// until `tick` is called after the reset delay.
    pub fn calculate(&mut self, now: Instant) -> Result<Evaluation, CalcError> {
        // the missing parentheses stay in the buffer even if the
        // evaluation fails
        if let std::borrow::Cow::Owned(balanced) = balance_parens(&self.expression) {
            self.expression = balanced;
        }

        match evaluate_with(&self.expression, self.mode, self.config.result_decimals) {
            Ok(eval) => {
                let result = eval.value.to_string();
                self.history.push(eval.clone().into());
                self.expression_label = eval.expression.clone();
                self.display = result.clone();
                self.expression = result;
                self.error = None;
                self.reset_at = None;
                Ok(eval)
            }
            Err(err) => {
                self.display = ERROR_TEXT.to_string();
                self.error = Some(err.clone());
                self.reset_at = Some(now + self.config.error_reset_delay());
                Err(err)
            }
        }
    }

    /// Evaluates a line typed as a whole.
    ///
    /// A line starting with an operator continues from the last result,
    /// any other line replaces the expression.
    pub fn enter_line(&mut self, line: &str, now: Instant) -> Result<Evaluation, CalcError> {
        let continues = line.starts_with(&['+', '-', '*', '/', '%'][..])
            && self.error.is_none()
            && !self.expression.is_empty();
        if !continues {
            self.clear();
        }
        self.append(line);
        self.calculate(now)
    }

    /// Runs the delayed reset once its deadline has passed. Returns whether
    /// the session was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                debug!("clearing the error");
                self.reset_at = None;
                self.error = None;
                self.clear();
                true
            }
            _ => false,
        }
    }

    fn update_display(&mut self) {
        self.display = if self.expression.is_empty() {
            "0".to_string()
        } else {
            self.expression.clone()
        };
    }

    fn displayed_number(&self) -> Option<f64> {
        self.display.trim().parse().ok()
    }
}
