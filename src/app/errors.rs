use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidEndpoint { endpoint: String, reason: String },
    MissingProjectId,
    InvalidHeader { name: &'static str, value: String },
    HttpClient { message: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidEndpoint { endpoint, reason } => {
                write!(f, "Invalid endpoint '{endpoint}': {reason}")
            }
            AppError::MissingProjectId => {
                write!(f, "Client configuration must include a non-empty project_id")
            }
            AppError::InvalidHeader { name, value } => {
                write!(f, "Value '{value}' is not a valid {name} header")
            }
            AppError::HttpClient { message } => {
                write!(f, "Failed to build HTTP client: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}
