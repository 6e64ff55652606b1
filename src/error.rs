use thiserror::Error;

use crate::config::ConfigError;

/// Failure of a single fetch cycle.
///
/// None of these are fatal to the process; the next cycle starts clean.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("No data received from server")]
    NoData,
    #[error("Malformed response from server: {0}")]
    MalformedResponse(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Transport(String),
}

impl FetchError {
    /// Process exit code used by the `awn` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FetchError::NoData => 3,
            _ => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::new(err.exit_code(), format!("Error: {err}"))
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
