use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Storage(String),
    IndexOutOfRange(String),
    AlreadyCompleted(String),
    InvalidInput(String),
}

impl AppError {
    pub fn storage<M: Into<String>>(message: M) -> Self {
        Self::Storage(message.into())
    }

    pub fn index_out_of_range<M: Into<String>>(message: M) -> Self {
        Self::IndexOutOfRange(message.into())
    }

    pub fn already_completed<M: Into<String>>(message: M) -> Self {
        Self::AlreadyCompleted(message.into())
    }

    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage_unavailable",
            Self::IndexOutOfRange(_) => "index_out_of_range",
            Self::AlreadyCompleted(_) => "already_completed",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Storage(message) => message,
            Self::IndexOutOfRange(message) => message,
            Self::AlreadyCompleted(message) => message,
            Self::InvalidInput(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
