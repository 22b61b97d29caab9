use std::fmt::{Display, Formatter};

use crate::app::AppError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseErrorCode {
    InvalidArgument,
    Unauthenticated,
    PermissionDenied,
    NotFound,
    ResourceExhausted,
    Unavailable,
    Network,
    Internal,
}

impl DatabaseErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseErrorCode::InvalidArgument => "database/invalid-argument",
            DatabaseErrorCode::Unauthenticated => "database/unauthenticated",
            DatabaseErrorCode::PermissionDenied => "database/permission-denied",
            DatabaseErrorCode::NotFound => "database/not-found",
            DatabaseErrorCode::ResourceExhausted => "database/resource-exhausted",
            DatabaseErrorCode::Unavailable => "database/unavailable",
            DatabaseErrorCode::Network => "database/network",
            DatabaseErrorCode::Internal => "database/internal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseError {
    pub code: DatabaseErrorCode,
    message: String,
}

impl DatabaseError {
    pub fn new(code: DatabaseErrorCode, message: impl Into<String>) -> Self {
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

impl Display for DatabaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for DatabaseError {}

impl From<AppError> for DatabaseError {
    fn from(error: AppError) -> Self {
        invalid_argument(error.to_string())
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

pub fn invalid_argument(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::InvalidArgument, message)
}

pub fn unauthenticated(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::Unauthenticated, message)
}

pub fn permission_denied(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::PermissionDenied, message)
}

pub fn not_found(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::NotFound, message)
}

pub fn resource_exhausted(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::ResourceExhausted, message)
}

pub fn unavailable(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::Unavailable, message)
}

pub fn network_error(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::Network, message)
}

pub fn internal_error(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorCode::Internal, message)
}
