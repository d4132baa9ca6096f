//! Error types shared by the algebra core and the coefficient extractor.

use thiserror::Error;

/// Errors that can occur while building, combining or expanding expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input text could not be parsed.
    #[error("Parse error at position {pos}: {msg}")]
    Parse { pos: usize, msg: String },

    /// The expression has a pole at the expansion point.
    #[error("Expression has a pole at {variable} = {point}")]
    Pole { variable: String, point: String },

    /// A literal division by zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// The expression depends on a variable other than the expansion variable.
    #[error("Unknown variable {found}, expected {expected}")]
    UnknownVariable { expected: String, found: String },

    /// Only integer exponents yield a rational function.
    #[error("Exponent {0} is not an integer")]
    NonIntegerExponent(String),

    /// The exponent is too large to expand.
    #[error("Exponent {0} is too large")]
    ExponentTooLarge(String),

    /// The requested coefficient lies beyond the largest supported expansion order.
    #[error("Power {power} is too large, at most {max} is supported")]
    PowerTooLarge { power: u32, max: u32 },

    /// A recurrence needs one initial value per coefficient.
    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),
}

pub type Result<T> = std::result::Result<T, Error>;
