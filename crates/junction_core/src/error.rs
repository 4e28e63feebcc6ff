use thiserror::Error;

#[derive(Debug, Error)]
pub enum JunctionError {
    #[error("storage error: {message}")]
    Storage { message: String },
    #[error("statement error: {message}")]
    Statement { message: String },
    #[error("decode error: {message}")]
    Decode { message: String },
    #[error("validation error: {message}")]
    Validation { message: String },
}

impl JunctionError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn statement(message: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type JunctionResult<T> = Result<T, JunctionError>;

impl From<sea_orm::DbErr> for JunctionError {
    fn from(value: sea_orm::DbErr) -> Self {
        JunctionError::storage(value.to_string())
    }
}
