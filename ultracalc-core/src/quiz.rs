use std::fmt;

use log::debug;
use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;

/// Points won by a correct answer.
pub const CORRECT_POINTS: u32 = 10;
/// Points lost by a wrong answer. The score never goes below zero.
pub const WRONG_PENALTY: u32 = 5;

/// An answer this close to the expected one is correct.
const TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("there is no question to answer")]
    NoQuestion,
    #[error("please enter a valid number")]
    InvalidAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl QuizOp {
    pub const ALL: [QuizOp; 4] = [QuizOp::Add, QuizOp::Sub, QuizOp::Mul, QuizOp::Div];

    pub fn symbol(self) -> char {
        match self {
            QuizOp::Add => '+',
            QuizOp::Sub => '-',
            QuizOp::Mul => '×',
            QuizOp::Div => '÷',
        }
    }
}

/// A question of the arithmetic game, like `12 × 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub lhs: i64,
    pub op: QuizOp,
    pub rhs: i64,
    pub answer: i64,
}

impl Question {
    /// Picks an operator and operands small enough to compute mentally.
    ///
    /// Subtractions never go below zero and divisions always fall on an
    /// integer.
    pub fn generate<R: Rng>(rng: &mut R) -> Question {
        let op = QuizOp::ALL[rng.gen_range(0..QuizOp::ALL.len())];
        let (lhs, rhs, answer) = match op {
            QuizOp::Add => {
                let (a, b) = (rng.gen_range(10..=100), rng.gen_range(10..=100));
                (a, b, a + b)
            }
            QuizOp::Sub => {
                let (a, b) = (rng.gen_range(50..=100), rng.gen_range(10..=49));
                (a, b, a - b)
            }
            QuizOp::Mul => {
                let (a, b) = (rng.gen_range(2..=15), rng.gen_range(2..=15));
                (a, b, a * b)
            }
            QuizOp::Div => {
                let b = rng.gen_range(2..=12);
                let answer = rng.gen_range(2..=20);
                (b * answer, b, answer)
            }
        };
        Question {
            lhs,
            op,
            rhs,
            answer,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong { expected: i64 },
}

/// The arithmetic game: a current question and a score.
pub struct Quiz<R: Rng = ThreadRng> {
    rng: R,
    score: u32,
    question: Option<Question>,
}

impl Default for Quiz {
    fn default() -> Self {
        Quiz::with_rng(rand::thread_rng())
    }
}

impl Quiz {
    pub fn new() -> Self {
        Quiz::default()
    }
}

impl<R: Rng> Quiz<R> {
    pub fn with_rng(rng: R) -> Self {
        Quiz {
            rng,
            score: 0,
            question: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Replaces the current question with a new one.
    pub fn next_question(&mut self) -> Question {
        let question = Question::generate(&mut self.rng);
        debug!("new question: {}", question);
        self.question = Some(question);
        question
    }

    /// Checks the text typed by the player.
    ///
    /// A correct answer consumes the question; a wrong one leaves it so
    /// that the player can try again.
    pub fn answer(&mut self, input: &str) -> Result<Verdict, QuizError> {
        let question = self.question.ok_or(QuizError::NoQuestion)?;
        let given = input
            .trim()
            .parse::<f64>()
            .map_err(|_| QuizError::InvalidAnswer)?;

        if (given - question.answer as f64).abs() < TOLERANCE {
            self.score += CORRECT_POINTS;
            self.question = None;
            Ok(Verdict::Correct)
        } else {
            self.score = self.score.saturating_sub(WRONG_PENALTY);
            Ok(Verdict::Wrong {
                expected: question.answer,
            })
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.question = None;
    }
}
