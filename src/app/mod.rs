//! # Client bootstrap
//!
//! Configuration and construction of the [`Client`] handle every other service is built
//! from. There is no process-wide default client: call [`initialize_client`] once during
//! startup and pass the returned handle to the components that need it.
//!
//! ```no_run
//! use restate_client::app::{initialize_client, ClientConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = initialize_client(ClientConfig::from_env())?;
//! let databases = client.databases();
//! # let _ = databases;
//! # Ok(())
//! # }
//! ```

mod api;
mod constants;
mod errors;
mod logger;
mod types;

#[doc(inline)]
pub use api::{initialize_client, SDK_VERSION};

#[doc(inline)]
pub use constants::{
    DEFAULT_AGENTS_COLLECTION_ID, DEFAULT_DATABASE_ID, DEFAULT_ENDPOINT,
    DEFAULT_GALLERIES_COLLECTION_ID, DEFAULT_PLATFORM, DEFAULT_PROJECT_ID,
    DEFAULT_PROPERTIES_COLLECTION_ID, DEFAULT_REVIEWS_COLLECTION_ID,
};

#[doc(inline)]
pub use errors::{AppError, AppResult};

#[doc(inline)]
pub use logger::LOGGER;

#[doc(inline)]
pub use types::{Client, ClientConfig};
