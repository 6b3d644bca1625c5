use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RumErrorCode {
    InvalidArgument,
    InvalidTimings,
    UnknownCommand,
}

impl RumErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RumErrorCode::InvalidArgument => "rum/invalid-argument",
            RumErrorCode::InvalidTimings => "rum/invalid-timings",
            RumErrorCode::UnknownCommand => "rum/unknown-command",
        }
    }
}

#[derive(Clone, Debug)]
pub struct RumError {
    pub code: RumErrorCode,
    message: String,
}

impl RumError {
    pub fn new(code: RumErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for RumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for RumError {}

pub type RumResult<T> = Result<T, RumError>;

pub fn invalid_argument(message: impl Into<String>) -> RumError {
    RumError::new(RumErrorCode::InvalidArgument, message)
}

pub fn invalid_timings(message: impl Into<String>) -> RumError {
    RumError::new(RumErrorCode::InvalidTimings, message)
}

pub fn unknown_command(message: impl Into<String>) -> RumError {
    RumError::new(RumErrorCode::UnknownCommand, message)
}
