use crate::account::api::{Account, LOGGER};
use crate::account::error::{cancelled, invalid_argument, AccountResult};
use crate::account::oauth::{parse_callback, AuthSessionBrowser, BrowserResult, OAuthProvider};
use crate::account::types::{CurrentUser, Session};
use crate::account::Avatars;

/// Signs in through `provider` and attaches the resulting session to the account's client.
///
/// `redirect_uri` is the app's deep link; the browser session ends when the provider
/// redirects there. Failures are logged before being returned.
pub async fn login<B>(
    account: &Account,
    browser: &B,
    provider: OAuthProvider,
    redirect_uri: &str,
) -> AccountResult<Session>
where
    B: AuthSessionBrowser + ?Sized,
{
    let result = run_login(account, browser, provider, redirect_uri).await;
    match &result {
        Ok(session) => LOGGER.info(format!(
            "Signed in user {} with {provider}",
            session.user_id
        )),
        Err(err) => LOGGER.error(format!("Login with {provider} failed: {err}")),
    }
    result
}

async fn run_login<B>(
    account: &Account,
    browser: &B,
    provider: OAuthProvider,
    redirect_uri: &str,
) -> AccountResult<Session>
where
    B: AuthSessionBrowser + ?Sized,
{
    let auth_url = account.create_oauth2_token_url(provider, redirect_uri, Some(redirect_uri))?;
    let redirect = match browser.open_auth_session(&auth_url, redirect_uri).await? {
        BrowserResult::Success { url } => url,
        BrowserResult::Cancel | BrowserResult::Dismiss => {
            return Err(cancelled("Login was cancelled"));
        }
    };
    let callback = parse_callback(&redirect)
        .ok_or_else(|| invalid_argument("Redirect is missing the userId or secret parameter"))?;
    account
        .create_session(&callback.user_id, &callback.secret)
        .await
}

/// Deletes the current session. Failures are logged before being returned.
pub async fn logout(account: &Account) -> AccountResult<()> {
    let result = account.delete_current_session().await;
    if let Err(err) = &result {
        LOGGER.error(format!("Logout failed: {err}"));
    }
    result
}

/// Returns the signed-in user with an initials avatar, or `None` when nobody is signed in
/// or the lookup fails.
pub async fn current_user(account: &Account) -> Option<CurrentUser> {
    let user = match account.get().await {
        Ok(user) => user,
        Err(err) => {
            LOGGER.debug(format!("No current user: {err}"));
            return None;
        }
    };
    let avatar_url = match Avatars::new(account.client().clone()).initials_url(&user.name) {
        Ok(url) => url.to_string(),
        Err(err) => {
            LOGGER.warn(format!("Could not build avatar URL: {err}"));
            String::new()
        }
    };
    Some(CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
        avatar_url,
    })
}
