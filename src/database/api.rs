use std::sync::{Arc, LazyLock};

use serde::de::DeserializeOwned;

use crate::app::Client;
use crate::database::document::{Document, DocumentList};
use crate::database::error::DatabaseResult;
use crate::database::query::Query;
use crate::database::store::{DocumentStoreArc, HttpDocumentStore};
use crate::logger::Logger;

pub(crate) static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@restate/database"));

/// Entry point to the document collections of a project.
#[derive(Clone)]
pub struct Databases {
    store: DocumentStoreArc,
}

impl Databases {
    /// Wraps an arbitrary store, e.g. an [`crate::database::InMemoryDocumentStore`].
    pub fn new(store: DocumentStoreArc) -> Self {
        Self { store }
    }

    pub(crate) fn with_http_store(client: Client) -> Self {
        Self::new(Arc::new(HttpDocumentStore::new(client)))
    }

    /// Lists the documents of a collection matching `queries`, applied in order.
    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DatabaseResult<DocumentList> {
        LOGGER.debug(format!(
            "listing {database_id}/{collection_id} with {} predicate(s)",
            queries.len()
        ));
        let result = self
            .store
            .list_documents(database_id, collection_id, queries)
            .await;
        if let Err(err) = &result {
            LOGGER.debug(format!("listing {database_id}/{collection_id} failed: {err}"));
        }
        result
    }

    /// Lists documents and decodes each of them into `T`.
    pub async fn list_documents_as<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DatabaseResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.list_documents(database_id, collection_id, queries)
            .await?
            .documents
            .iter()
            .map(Document::to_typed::<T>)
            .collect()
    }

    pub async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> DatabaseResult<Document> {
        self.store
            .get_document(database_id, collection_id, document_id)
            .await
    }
}

impl std::fmt::Debug for Databases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Databases").finish_non_exhaustive()
    }
}
