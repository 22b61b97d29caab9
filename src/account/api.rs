use std::sync::LazyLock;

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::account::error::{internal_error, map_http_error, network_error, AccountResult};
use crate::account::oauth::OAuthProvider;
use crate::account::types::{Session, User};
use crate::app::Client;
use crate::logger::Logger;

pub(crate) static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@restate/account"));

const FALLBACK_COOKIES_HEADER: &str = "x-fallback-cookies";
const CURRENT_SESSION: &str = "current";

/// Account endpoints of the backend: OAuth token URLs, sessions and the signed-in user.
#[derive(Clone, Debug)]
pub struct Account {
    client: Client,
}

impl Account {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Builds the URL that starts an OAuth login with `provider`.
    ///
    /// After consent the provider redirects to `success` with `userId` and `secret` query
    /// parameters, which [`Account::create_session`] exchanges for a session.
    pub fn create_oauth2_token_url(
        &self,
        provider: OAuthProvider,
        success: &str,
        failure: Option<&str>,
    ) -> AccountResult<Url> {
        let mut url = self.client.endpoint_url(&[
            "account",
            "tokens",
            "oauth2",
            provider.as_str(),
        ])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("success", success);
            if let Some(failure) = failure {
                pairs.append_pair("failure", failure);
            }
            pairs.append_pair("project", &self.client.config().project_id);
        }
        Ok(url)
    }

    /// Exchanges an OAuth token for a session and attaches it to the client.
    pub async fn create_session(&self, user_id: &str, secret: &str) -> AccountResult<Session> {
        let url = self.client.endpoint_url(&["account", "sessions", "token"])?;
        let body = json!({ "userId": user_id, "secret": secret });
        let (headers, text) = self.execute(Method::POST, url, Some(body)).await?;
        let session: Session = decode(&text)?;

        let session_secret = Some(session.secret.clone())
            .filter(|secret| !secret.is_empty())
            .or_else(|| fallback_session_cookie(&headers, &self.client.config().project_id));
        match session_secret {
            Some(secret) => self.client.set_session_secret(Some(secret)),
            None => LOGGER.warn(format!(
                "Session {} was created without a usable secret",
                session.id
            )),
        }
        Ok(session)
    }

    /// Deletes `session_id` (`"current"` for the signed-in session).
    pub async fn delete_session(&self, session_id: &str) -> AccountResult<()> {
        let url = self
            .client
            .endpoint_url(&["account", "sessions", session_id])?;
        self.execute(Method::DELETE, url, None).await?;
        if session_id == CURRENT_SESSION {
            self.client.set_session_secret(None);
        }
        Ok(())
    }

    pub async fn delete_current_session(&self) -> AccountResult<()> {
        self.delete_session(CURRENT_SESSION).await
    }

    /// Fetches the signed-in user.
    pub async fn get(&self) -> AccountResult<User> {
        let url = self.client.endpoint_url(&["account"])?;
        let (_, text) = self.execute(Method::GET, url, None).await?;
        decode(&text)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> AccountResult<(HeaderMap, String)> {
        let headers = self.client.default_headers()?;
        let mut request = self
            .client
            .http()
            .request(method, url.clone())
            .headers(headers);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await
            .map_err(|err| network_error(format!("Request to {} failed: {err}", url.path())))?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|err| network_error(err.to_string()))?;
        if status.is_success() {
            Ok((headers, text))
        } else {
            Err(map_http_error(status, &text))
        }
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> AccountResult<T> {
    serde_json::from_str(text)
        .map_err(|err| internal_error(format!("Invalid response body: {err}")))
}

/// Reads the session cookie the backend mirrors into `X-Fallback-Cookies` for clients that
/// cannot store cookies, e.g. `{"a_session_<project>":"<secret>"}`.
fn fallback_session_cookie(headers: &HeaderMap, project_id: &str) -> Option<String> {
    let raw = headers.get(FALLBACK_COOKIES_HEADER)?.to_str().ok()?;
    let cookies: serde_json::Map<String, Value> = serde_json::from_str(raw).ok()?;
    cookies
        .get(&format!("a_session_{project_id}"))
        .and_then(Value::as_str)
        .filter(|secret| !secret.is_empty())
        .map(str::to_string)
}
