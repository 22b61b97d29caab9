use reqwest::StatusCode;
use serde::Deserialize;

use crate::database::error::{
    internal_error, invalid_argument, not_found, permission_denied, resource_exhausted,
    unauthenticated, unavailable, DatabaseError,
};

/// Error payload returned by the backend, e.g.
/// `{"message":"...","code":401,"type":"user_unauthorized"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(rename = "type", default)]
    pub(crate) kind: Option<String>,
}

pub(crate) fn parse_error_body(body: &str) -> Option<ErrorBody> {
    serde_json::from_str::<ErrorBody>(body).ok()
}

pub fn map_http_error(status: StatusCode, body: &str) -> DatabaseError {
    let payload = parse_error_body(body);
    let message = payload
        .as_ref()
        .and_then(|payload| payload.message.clone())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("HTTP error").to_string());

    if let Some(kind) = payload.as_ref().and_then(|payload| payload.kind.as_deref()) {
        if let Some(error) = map_error_type(kind, &message) {
            return error;
        }
    }

    match status {
        StatusCode::BAD_REQUEST => invalid_argument(message),
        StatusCode::UNAUTHORIZED => unauthenticated(message),
        StatusCode::FORBIDDEN => permission_denied(message),
        StatusCode::NOT_FOUND => not_found(message),
        StatusCode::TOO_MANY_REQUESTS => resource_exhausted(message),
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => unavailable(message),
        StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => unavailable(message),
        StatusCode::OK => internal_error("Received HTTP 200 while handling error"),
        status if status.is_client_error() => invalid_argument(message),
        _ => internal_error(message),
    }
}

fn map_error_type(kind: &str, message: &str) -> Option<DatabaseError> {
    let error = match kind {
        "general_query_invalid" | "general_argument_invalid" | "attribute_not_available" => {
            invalid_argument(message)
        }
        "general_unauthorized_scope" | "user_unauthorized" => unauthenticated(message),
        "document_not_found" | "collection_not_found" | "database_not_found" => not_found(message),
        "general_rate_limit_exceeded" => resource_exhausted(message),
        _ => return None,
    };
    Some(error)
}
