use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::database::error::{internal_error, DatabaseResult};
use crate::database::query::{CREATED_AT, DOCUMENT_ID};

/// A document returned by the remote store.
///
/// The system attributes are decoded into fields; everything else the collection defines
/// stays in [`Document::data`] as an opaque JSON payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            collection_id: String::new(),
            database_id: String::new(),
            created_at,
            updated_at: None,
            permissions: Vec::new(),
            data,
        }
    }

    /// Returns an application attribute.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.data.get(attribute)
    }

    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(Value::as_str)
    }

    /// Resolves application and system attributes alike, for predicate evaluation.
    pub(crate) fn attribute(&self, attribute: &str) -> Option<Value> {
        match attribute {
            DOCUMENT_ID => Some(Value::String(self.id.clone())),
            CREATED_AT => Some(Value::String(
                self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            )),
            "$updatedAt" => self
                .updated_at
                .map(|at| Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true))),
            other => self.data.get(other).cloned(),
        }
    }

    /// Decodes the document, system attributes included, into a typed model.
    pub fn to_typed<T>(&self) -> DatabaseResult<T>
    where
        T: DeserializeOwned,
    {
        let value = serde_json::to_value(self).map_err(|err| {
            internal_error(format!("Failed to encode document {}: {err}", self.id))
        })?;
        serde_json::from_value(value)
            .map_err(|err| internal_error(format!("Failed to decode document {}: {err}", self.id)))
    }
}

/// One page of a `list_documents` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    /// Number of documents matching the filters, ignoring limit and offset.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl DocumentList {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

impl IntoIterator for DocumentList {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Listing {
        #[serde(rename = "$id")]
        id: String,
        name: String,
    }

    fn sample() -> Value {
        json!({
            "$id": "prop-1",
            "$collectionId": "properties",
            "$databaseId": "main",
            "$createdAt": "2025-01-13T20:31:42.123+00:00",
            "$updatedAt": "2025-01-14T08:00:00.000+00:00",
            "$permissions": [],
            "name": "Lakeside Villa",
            "price": 4200
        })
    }

    #[test]
    fn decodes_system_attributes_and_payload() {
        let document: Document = serde_json::from_value(sample()).unwrap();
        assert_eq!(document.id, "prop-1");
        assert_eq!(document.collection_id, "properties");
        assert_eq!(document.get_str("name"), Some("Lakeside Villa"));
        assert_eq!(document.get("price"), Some(&json!(4200)));
        assert!(document.get("$id").is_none());
        assert_eq!(
            document.attribute(CREATED_AT),
            Some(json!("2025-01-13T20:31:42.123Z"))
        );
    }

    #[test]
    fn converts_into_typed_model() {
        let document: Document = serde_json::from_value(sample()).unwrap();
        let listing: Listing = document.to_typed().unwrap();
        assert_eq!(listing.id, "prop-1");
        assert_eq!(listing.name, "Lakeside Villa");
    }

    #[test]
    fn typed_conversion_reports_missing_fields() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("name");
        let document: Document = serde_json::from_value(value).unwrap();
        let err = document.to_typed::<Listing>().unwrap_err();
        assert_eq!(err.code_str(), "database/internal");
    }
}
