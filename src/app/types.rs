use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, ORIGIN};
use url::Url;

use crate::account::{Account, Avatars};
use crate::app::constants::*;
use crate::app::errors::{AppError, AppResult};
use crate::database::Databases;

const PROJECT_HEADER: &str = "x-appwrite-project";
const SESSION_HEADER: &str = "x-appwrite-session";
const RESPONSE_FORMAT_HEADER: &str = "x-appwrite-response-format";
const RESPONSE_FORMAT: &str = "1.5.0";

/// Connection settings for the listings backend.
///
/// `Default` uses the hosted project the app ships with; [`ClientConfig::from_env`] lets
/// each value be overridden through `APPWRITE_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub project_id: String,
    pub platform: String,
    pub database_id: String,
    pub galleries_collection_id: String,
    pub reviews_collection_id: String,
    pub agents_collection_id: String,
    pub properties_collection_id: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            database_id: DEFAULT_DATABASE_ID.to_string(),
            galleries_collection_id: DEFAULT_GALLERIES_COLLECTION_ID.to_string(),
            reviews_collection_id: DEFAULT_REVIEWS_COLLECTION_ID.to_string(),
            agents_collection_id: DEFAULT_AGENTS_COLLECTION_ID.to_string(),
            properties_collection_id: DEFAULT_PROPERTIES_COLLECTION_ID.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from the process environment, falling back to the defaults
    /// for unset or empty variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, fallback: String| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(fallback)
        };
        let defaults = Self::default();
        Self {
            endpoint: read(ENV_ENDPOINT, defaults.endpoint),
            project_id: read(ENV_PROJECT_ID, defaults.project_id),
            platform: read(ENV_PLATFORM, defaults.platform),
            database_id: read(ENV_DATABASE_ID, defaults.database_id),
            galleries_collection_id: read(
                ENV_GALLERIES_COLLECTION_ID,
                defaults.galleries_collection_id,
            ),
            reviews_collection_id: read(ENV_REVIEWS_COLLECTION_ID, defaults.reviews_collection_id),
            agents_collection_id: read(ENV_AGENTS_COLLECTION_ID, defaults.agents_collection_id),
            properties_collection_id: read(
                ENV_PROPERTIES_COLLECTION_ID,
                defaults.properties_collection_id,
            ),
            request_timeout: defaults.request_timeout,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Handle to a configured backend project.
///
/// Cloning is cheap and every clone shares the HTTP connection pool and the signed-in
/// session. The handle is created by [`crate::app::initialize_client`].
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    endpoint: Url,
    http: reqwest::Client,
    session_secret: RwLock<Option<String>>,
}

impl Client {
    pub(crate) fn new(config: ClientConfig, endpoint: Url, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                endpoint,
                http,
                session_secret: RwLock::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Document database service bound to this client.
    pub fn databases(&self) -> Databases {
        Databases::with_http_store(self.clone())
    }

    /// Account and session service bound to this client.
    pub fn account(&self) -> Account {
        Account::new(self.clone())
    }

    pub fn avatars(&self) -> Avatars {
        Avatars::new(self.clone())
    }

    /// Returns the secret of the signed-in session, if any.
    pub fn session_secret(&self) -> Option<String> {
        self.inner
            .session_secret
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }

    /// Attaches (or detaches with `None`) a session secret to every subsequent request.
    pub fn set_session_secret(&self, secret: Option<String>) {
        if let Ok(mut guard) = self.inner.session_secret.write() {
            *guard = secret;
        }
    }

    /// Resolves `segments` below the configured endpoint, e.g. `["account", "sessions"]`.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.inner.endpoint.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::InvalidEndpoint {
                    endpoint: self.inner.endpoint.to_string(),
                    reason: "endpoint cannot be a base URL".to_string(),
                })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    pub(crate) fn default_headers(&self) -> AppResult<HeaderMap> {
        let config = &self.inner.config;
        let mut headers = HeaderMap::with_capacity(6);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(RESPONSE_FORMAT_HEADER),
            HeaderValue::from_static(RESPONSE_FORMAT),
        );
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            header_value("project", &config.project_id)?,
        );
        headers.insert(
            ORIGIN,
            header_value("origin", &format!("appwrite-rust://{}", config.platform))?,
        );
        if let Some(secret) = self.session_secret() {
            headers.insert(
                HeaderName::from_static(SESSION_HEADER),
                header_value("session", &secret)?,
            );
        }
        Ok(headers)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("project_id", &self.inner.config.project_id)
            .field("signed_in", &self.session_secret().is_some())
            .finish()
    }
}

fn header_value(name: &'static str, value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| AppError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}
