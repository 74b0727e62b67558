use thiserror::Error;

/// Errors produced by fixed-point conversions, fixed-point math and the
/// random distribution samplers.
///
/// Every failure is reported to the immediate caller; nothing in this crate
/// retries or recovers internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A conversion input lies outside the representable range of the target
    /// fixed-point type (NaN included).
    #[error("value {value} is outside the representable range [{min}, {max}]")]
    Range { value: f64, min: f64, max: f64 },

    /// Division or remainder by a fixed-point value whose raw bits are zero.
    #[error("division by zero")]
    DivideByZero,

    /// A parameter violates the domain its algorithm requires.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A math function was evaluated outside its real domain.
    #[error("{function} is undefined for {value}")]
    Domain { function: &'static str, value: f64 },

    /// A decimal literal could not be parsed.
    #[error("invalid fixed-point literal `{0}`")]
    Parse(String),
}

impl MathError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        MathError::InvalidArgument { name, reason: reason.into() }
    }
}

/// Errors raised while reading or writing a [`RandomConfig`](crate::config::RandomConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
