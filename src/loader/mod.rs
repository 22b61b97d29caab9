//! # Async list loader
//!
//! [`ListLoader`] wraps any async function that produces a list and tracks its
//! `{data, loading, error}` state, so presentation code can branch on the state instead
//! of handling errors itself.
//!
//! ```no_run
//! use restate_client::loader::{ListLoader, LoaderOptions, LoaderStatus};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let loader = ListLoader::new(
//!         |query: String| async move {
//!             if query.is_empty() {
//!                 Err("query required".to_string())
//!             } else {
//!                 Ok(vec![format!("result for {query}")])
//!             }
//!         },
//!         LoaderOptions::new(String::new()).skip_initial_fetch(true),
//!     );
//!
//!     loader.refetch("lake".into()).await;
//!     match loader.status() {
//!         LoaderStatus::Success => println!("{:?}", loader.data()),
//!         LoaderStatus::Empty => println!("no matches"),
//!         LoaderStatus::Error => println!("failed: {:?}", loader.error()),
//!         LoaderStatus::Idle | LoaderStatus::Loading => {}
//!     }
//! }
//! ```

use std::sync::LazyLock;

use crate::logger::Logger;

mod list_loader;
mod state;

pub(crate) static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@restate/loader"));

#[doc(inline)]
pub use list_loader::{ListLoader, ListenerRegistration, RefetchHandle};

#[doc(inline)]
pub use state::{LoaderOptions, LoaderState, LoaderStatus};
