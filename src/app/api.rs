use url::Url;

use crate::app::errors::{AppError, AppResult};
use crate::app::logger::LOGGER;
use crate::app::types::{Client, ClientConfig};

pub static SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validates `config` and builds the [`Client`] shared by the database, account and
/// listings services.
pub fn initialize_client(config: ClientConfig) -> AppResult<Client> {
    if config.project_id.trim().is_empty() {
        return Err(AppError::MissingProjectId);
    }

    let endpoint = parse_endpoint(&config.endpoint)?;

    let http = reqwest::Client::builder()
        .user_agent(format!("restate-client/{SDK_VERSION}"))
        .timeout(config.request_timeout)
        .build()
        .map_err(|err| AppError::HttpClient {
            message: err.to_string(),
        })?;

    LOGGER.debug(format!(
        "initialized client for project {} at {}",
        config.project_id, endpoint
    ));
    Ok(Client::new(config, endpoint, http))
}

fn parse_endpoint(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| AppError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidEndpoint {
            endpoint: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
