use std::sync::Arc;

use async_trait::async_trait;

use crate::database::document::{Document, DocumentList};
use crate::database::error::DatabaseResult;
use crate::database::query::Query;

pub mod http;
pub mod in_memory;

/// Executes predicate lists against a document collection.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DatabaseResult<DocumentList>;

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> DatabaseResult<Document>;
}

pub type DocumentStoreArc = Arc<dyn DocumentStore>;

pub use http::HttpDocumentStore;
pub use in_memory::InMemoryDocumentStore;
