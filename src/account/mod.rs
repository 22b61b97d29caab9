//! # Account and sessions
//!
//! OAuth sign-in, sign-out and the signed-in user summary. The browser step is abstracted
//! behind [`AuthSessionBrowser`] so each platform can plug in its own web authentication
//! session.
//!
//! ```no_run
//! use restate_client::account::{current_user, login, AuthSessionBrowser, OAuthProvider};
//! use restate_client::app::{initialize_client, ClientConfig};
//!
//! # async fn run(browser: &dyn AuthSessionBrowser) -> Result<(), Box<dyn std::error::Error>> {
//! let client = initialize_client(ClientConfig::from_env())?;
//! let account = client.account();
//! login(&account, browser, OAuthProvider::Google, "restate://").await?;
//! if let Some(user) = current_user(&account).await {
//!     println!("signed in as {} ({})", user.name, user.avatar_url);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod avatars;
pub mod error;
mod oauth;
mod session;
mod types;

#[doc(inline)]
pub use api::Account;

#[doc(inline)]
pub use avatars::Avatars;

#[doc(inline)]
pub use error::{AccountError, AccountErrorCode, AccountResult};

#[doc(inline)]
pub use oauth::{AuthSessionBrowser, BrowserResult, OAuthProvider};

#[doc(inline)]
pub use session::{current_user, login, logout};

#[doc(inline)]
pub use types::{CurrentUser, Session, User};
