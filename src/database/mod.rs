//! # Document database
//!
//! Typed predicates, documents and the [`DocumentStore`] seam used to run list queries
//! against a remote collection.
//!
//! Two stores ship with the crate:
//!
//! - [`HttpDocumentStore`] talks to the backend REST API through a [`crate::app::Client`];
//! - [`InMemoryDocumentStore`] evaluates the same predicates locally, for tests and demos.
//!
//! ```no_run
//! use restate_client::app::{initialize_client, ClientConfig};
//! use restate_client::database::{equal, limit, order_desc, CREATED_AT};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = initialize_client(ClientConfig::from_env())?;
//!     let config = client.config().clone();
//!     let houses = client
//!         .databases()
//!         .list_documents(
//!             &config.database_id,
//!             &config.properties_collection_id,
//!             &[order_desc(CREATED_AT), equal("type", ["House"]), limit(10)],
//!         )
//!         .await?;
//!     println!("{} of {} houses", houses.len(), houses.total);
//!     Ok(())
//! }
//! ```

mod api;
mod document;
pub mod error;
mod query;
pub(crate) mod rpc_error;
pub mod store;

#[doc(inline)]
pub use api::Databases;

#[doc(inline)]
pub use document::{Document, DocumentList};

#[doc(inline)]
pub use error::{DatabaseError, DatabaseErrorCode, DatabaseResult};

#[doc(inline)]
pub use query::{
    and, cursor_after, equal, greater_than, less_than, limit, not_equal, offset, or, order_asc,
    order_desc, search, Query, CREATED_AT, DOCUMENT_ID,
};

pub use rpc_error::map_http_error;

#[doc(inline)]
pub use store::{DocumentStore, DocumentStoreArc, HttpDocumentStore, InMemoryDocumentStore};
