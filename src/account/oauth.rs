use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::account::error::AccountResult;

/// Identity providers that can start an OAuth login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    Google,
    Apple,
    Facebook,
    Github,
    Microsoft,
}

impl OAuthProvider {
    /// Identifier used in the backend OAuth endpoints.
    pub fn as_str(self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Apple => "apple",
            OAuthProvider::Facebook => "facebook",
            OAuthProvider::Github => "github",
            OAuthProvider::Microsoft => "microsoft",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an in-app browser authorisation session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserResult {
    /// The provider redirected back to the app with this URL.
    Success { url: String },
    Cancel,
    Dismiss,
}

/// Opens the provider's authorisation page and waits for the redirect back to the app.
///
/// Platform integrations implement this on top of the system web browser (custom tab,
/// `ASWebAuthenticationSession`, a loopback listener on desktop, ...).
#[async_trait]
pub trait AuthSessionBrowser: Send + Sync {
    async fn open_auth_session(&self, auth_url: &Url, redirect_uri: &str)
        -> AccountResult<BrowserResult>;
}

/// Credentials carried by the OAuth redirect URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OAuthCallback {
    pub(crate) user_id: String,
    pub(crate) secret: String,
}

pub(crate) fn parse_callback(redirect_url: &str) -> Option<OAuthCallback> {
    let url = Url::parse(redirect_url).ok()?;
    let mut user_id = None;
    let mut secret = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "userId" => user_id = Some(value.into_owned()),
            "secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }
    match (user_id, secret) {
        (Some(user_id), Some(secret)) if !user_id.is_empty() && !secret.is_empty() => {
            Some(OAuthCallback { user_id, secret })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_id_and_secret() {
        let callback = parse_callback("restate://?secret=s3cr3t&userId=user-1").unwrap();
        assert_eq!(callback.user_id, "user-1");
        assert_eq!(callback.secret, "s3cr3t");
    }

    #[test]
    fn rejects_incomplete_callbacks() {
        assert!(parse_callback("restate://?userId=user-1").is_none());
        assert!(parse_callback("restate://?userId=&secret=x").is_none());
        assert!(parse_callback("not a url").is_none());
    }

    #[test]
    fn provider_identifiers() {
        assert_eq!(OAuthProvider::Google.to_string(), "google");
        assert_eq!(OAuthProvider::Github.as_str(), "github");
    }
}
