use std::fmt::{Display, Formatter};

use reqwest::StatusCode;

use crate::app::AppError;
use crate::database::rpc_error::parse_error_body;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountErrorCode {
    InvalidArgument,
    Unauthenticated,
    Cancelled,
    RateLimited,
    Network,
    Internal,
}

impl AccountErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountErrorCode::InvalidArgument => "account/invalid-argument",
            AccountErrorCode::Unauthenticated => "account/unauthenticated",
            AccountErrorCode::Cancelled => "account/cancelled",
            AccountErrorCode::RateLimited => "account/rate-limited",
            AccountErrorCode::Network => "account/network",
            AccountErrorCode::Internal => "account/internal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccountError {
    pub code: AccountErrorCode,
    message: String,
}

impl AccountError {
    pub fn new(code: AccountErrorCode, message: impl Into<String>) -> Self {
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

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for AccountError {}

impl From<AppError> for AccountError {
    fn from(error: AppError) -> Self {
        invalid_argument(error.to_string())
    }
}

pub type AccountResult<T> = Result<T, AccountError>;

pub fn invalid_argument(message: impl Into<String>) -> AccountError {
    AccountError::new(AccountErrorCode::InvalidArgument, message)
}

pub fn unauthenticated(message: impl Into<String>) -> AccountError {
    AccountError::new(AccountErrorCode::Unauthenticated, message)
}

pub fn cancelled(message: impl Into<String>) -> AccountError {
    AccountError::new(AccountErrorCode::Cancelled, message)
}

pub fn network_error(message: impl Into<String>) -> AccountError {
    AccountError::new(AccountErrorCode::Network, message)
}

pub fn internal_error(message: impl Into<String>) -> AccountError {
    AccountError::new(AccountErrorCode::Internal, message)
}

pub(crate) fn map_http_error(status: StatusCode, body: &str) -> AccountError {
    let message = parse_error_body(body)
        .and_then(|payload| payload.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("HTTP error").to_string());
    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AccountErrorCode::Unauthenticated,
        StatusCode::TOO_MANY_REQUESTS => AccountErrorCode::RateLimited,
        status if status.is_client_error() => AccountErrorCode::InvalidArgument,
        _ => AccountErrorCode::Internal,
    };
    AccountError::new(code, message)
}
