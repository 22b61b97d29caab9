use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::database::document::{Document, DocumentList};
use crate::database::error::{internal_error, invalid_argument, not_found, DatabaseResult};
use crate::database::query::Query;

use super::DocumentStore;

type CollectionKey = (String, String);

/// Process-local [`DocumentStore`] that evaluates predicates itself.
///
/// Search predicates match when the attribute contains any whitespace-separated word of
/// the term, ignoring case.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<BTreeMap<CollectionKey, Vec<Document>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `document`, replacing any document with the same id.
    pub fn insert(&self, database_id: &str, collection_id: &str, mut document: Document) {
        document.database_id = database_id.to_string();
        document.collection_id = collection_id.to_string();
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        let documents = collections
            .entry((database_id.to_string(), collection_id.to_string()))
            .or_default();
        documents.retain(|existing| existing.id != document.id);
        documents.push(document);
    }

    fn snapshot(&self, database_id: &str, collection_id: &str) -> DatabaseResult<Vec<Document>> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| internal_error("In-memory store lock poisoned"))?;
        Ok(collections
            .get(&(database_id.to_string(), collection_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> DatabaseResult<DocumentList> {
        let documents = self.snapshot(database_id, collection_id)?;
        evaluate(documents, queries)
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> DatabaseResult<Document> {
        self.snapshot(database_id, collection_id)?
            .into_iter()
            .find(|document| document.id == document_id)
            .ok_or_else(|| not_found(format!("Document {document_id} could not be found")))
    }
}

pub(crate) fn evaluate(
    documents: Vec<Document>,
    queries: &[Query],
) -> DatabaseResult<DocumentList> {
    let mut matching: Vec<Document> = documents
        .into_iter()
        .filter(|document| {
            queries
                .iter()
                .filter(|query| query.is_filter())
                .all(|query| matches(document, query))
        })
        .collect();

    // Insertion order is the implicit tie breaker, as the sort is stable.
    let orderings: Vec<&Query> = queries
        .iter()
        .filter(|query| matches!(query, Query::OrderAsc(_) | Query::OrderDesc(_)))
        .collect();
    matching.sort_by(|left, right| {
        for ordering in &orderings {
            let (attribute, descending) = match ordering {
                Query::OrderAsc(attribute) => (attribute, false),
                Query::OrderDesc(attribute) => (attribute, true),
                _ => continue,
            };
            let result = compare_values(
                left.attribute(attribute).as_ref(),
                right.attribute(attribute).as_ref(),
            );
            let result = if descending { result.reverse() } else { result };
            if result != Ordering::Equal {
                return result;
            }
        }
        Ordering::Equal
    });

    let total = matching.len() as u64;

    let mut page: Vec<Document> = matching;
    for query in queries {
        if let Query::CursorAfter(cursor) = query {
            let position = page
                .iter()
                .position(|document| &document.id == cursor)
                .ok_or_else(|| {
                    invalid_argument(format!(
                        "Document '{cursor}' for the 'cursor' value not found."
                    ))
                })?;
            page.drain(..=position);
        }
    }
    if let Some(skip) = last_value(queries, |query| match query {
        Query::Offset(count) => Some(*count),
        _ => None,
    }) {
        page = page.into_iter().skip(skip as usize).collect();
    }
    if let Some(cap) = last_value(queries, |query| match query {
        Query::Limit(count) => Some(*count),
        _ => None,
    }) {
        page.truncate(cap as usize);
    }

    Ok(DocumentList {
        total,
        documents: page,
    })
}

fn last_value<F>(queries: &[Query], extract: F) -> Option<u32>
where
    F: Fn(&Query) -> Option<u32>,
{
    queries.iter().filter_map(extract).last()
}

fn matches(document: &Document, query: &Query) -> bool {
    match query {
        Query::Equal { attribute, values } => match document.attribute(attribute) {
            Some(Value::Array(items)) => items.iter().any(|item| values.contains(item)),
            Some(value) => values.iter().any(|candidate| values_equal(&value, candidate)),
            None => false,
        },
        Query::NotEqual { attribute, value } => document
            .attribute(attribute)
            .map(|current| !values_equal(&current, value))
            .unwrap_or(true),
        Query::LessThan { attribute, value } => document
            .attribute(attribute)
            .map(|current| compare_values(Some(&current), Some(value)) == Ordering::Less)
            .unwrap_or(false),
        Query::GreaterThan { attribute, value } => document
            .attribute(attribute)
            .map(|current| compare_values(Some(&current), Some(value)) == Ordering::Greater)
            .unwrap_or(false),
        Query::Search { attribute, term } => match document.attribute(attribute) {
            Some(Value::String(text)) => text_matches(&text, term),
            _ => false,
        },
        Query::Or(children) => children.iter().any(|child| matches(document, child)),
        Query::And(children) => children.iter().all(|child| matches(document, child)),
        _ => true,
    }
}

fn text_matches(text: &str, term: &str) -> bool {
    let haystack = text.to_lowercase();
    term.split_whitespace()
        .any(|word| haystack.contains(&word.to_lowercase()))
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                let a = a.as_f64().unwrap_or_default();
                let b = b.as_f64().unwrap_or_default();
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (left, right) => type_rank(left).cmp(&type_rank(right)),
        },
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::error::DatabaseErrorCode;
    use crate::database::query::*;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Map};

    fn listing(id: &str, minute: u32, fields: Value) -> Document {
        let data: Map<String, Value> = fields.as_object().cloned().unwrap_or_default();
        Document::new(
            id,
            Utc.with_ymd_and_hms(2025, 1, 13, 12, minute, 0).unwrap(),
            data,
        )
    }

    fn seeded() -> InMemoryDocumentStore {
        let store = InMemoryDocumentStore::new();
        let rows = [
            ("a", 1, "Lake House", "Tahoe", "House", 900),
            ("b", 2, "City Loft", "Lakewood", "Apartment", 400),
            ("c", 3, "Garden Flat", "Austin", "Apartment", 300),
        ];
        for (id, minute, name, location, property_type, price) in rows {
            let fields = json!({
                "name": name,
                "location": location,
                "type": property_type,
                "price": price
            });
            store.insert("main", "properties", listing(id, minute, fields));
        }
        store
    }

    fn ids(list: &DocumentList) -> Vec<&str> {
        list.documents.iter().map(|doc| doc.id.as_str()).collect()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn orders_by_creation_time() {
        let store = seeded();
        let newest = store
            .list_documents("main", "properties", &[order_desc(CREATED_AT)])
            .await
            .unwrap();
        assert_eq!(ids(&newest), vec!["c", "b", "a"]);

        let oldest = store
            .list_documents("main", "properties", &[order_asc(CREATED_AT), limit(2)])
            .await
            .unwrap();
        assert_eq!(ids(&oldest), vec!["a", "b"]);
        assert_eq!(oldest.total, 3);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn combines_equality_and_search_group() {
        let store = seeded();
        let result = store
            .list_documents(
                "main",
                "properties",
                &[
                    order_desc(CREATED_AT),
                    equal("type", ["Apartment"]),
                    or([
                        search("name", "lake"),
                        search("location", "lake"),
                        search("type", "lake"),
                    ]),
                ],
            )
            .await
            .unwrap();
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn pages_with_offset_and_cursor() {
        let store = seeded();
        let second_page = store
            .list_documents("main", "properties", &[order_asc("price"), offset(1), limit(1)])
            .await
            .unwrap();
        assert_eq!(ids(&second_page), vec!["b"]);

        let after_cursor = store
            .list_documents("main", "properties", &[order_asc("price"), cursor_after("b")])
            .await
            .unwrap();
        assert_eq!(ids(&after_cursor), vec!["a"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unknown_cursor_is_rejected() {
        let store = seeded();
        let err = store
            .list_documents("main", "properties", &[cursor_after("zzz")])
            .await
            .unwrap_err();
        assert_eq!(err.code, DatabaseErrorCode::InvalidArgument);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn numeric_comparisons_filter_documents() {
        let store = seeded();
        let cheap = store
            .list_documents(
                "main",
                "properties",
                &[less_than("price", 500), order_asc("price")],
            )
            .await
            .unwrap();
        assert_eq!(ids(&cheap), vec!["c", "b"]);

        let not_houses = store
            .list_documents(
                "main",
                "properties",
                &[not_equal("type", "House"), greater_than("price", 350)],
            )
            .await
            .unwrap();
        assert_eq!(ids(&not_houses), vec!["b"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_document_is_not_found() {
        let store = seeded();
        assert_eq!(
            store.get_document("main", "properties", "a").await.unwrap().id,
            "a"
        );
        let err = store
            .get_document("main", "properties", "nope")
            .await
            .unwrap_err();
        assert_eq!(err.code, DatabaseErrorCode::NotFound);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_collection_lists_nothing() {
        let store = InMemoryDocumentStore::new();
        let result = store
            .list_documents("main", "agents", &[order_desc(CREATED_AT)])
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total, 0);
    }
}
