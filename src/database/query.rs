use std::fmt;

use serde_json::{json, Map, Value};

/// Attribute holding the server-assigned creation timestamp of every document.
pub const CREATED_AT: &str = "$createdAt";
/// Attribute holding the document identifier.
pub const DOCUMENT_ID: &str = "$id";

/// A single predicate of a list query.
///
/// Predicates compose conjunctively in the order they are sent; [`Query::Or`] groups its
/// children disjunctively. Each predicate serialises to the backend's JSON query form,
/// e.g. `{"method":"orderDesc","attribute":"$createdAt"}`.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    Equal { attribute: String, values: Vec<Value> },
    NotEqual { attribute: String, value: Value },
    LessThan { attribute: String, value: Value },
    GreaterThan { attribute: String, value: Value },
    Search { attribute: String, term: String },
    OrderAsc(String),
    OrderDesc(String),
    Limit(u32),
    Offset(u32),
    CursorAfter(String),
    Or(Vec<Query>),
    And(Vec<Query>),
}

impl Query {
    /// Name of the backend query method.
    pub fn method(&self) -> &'static str {
        match self {
            Query::Equal { .. } => "equal",
            Query::NotEqual { .. } => "notEqual",
            Query::LessThan { .. } => "lessThan",
            Query::GreaterThan { .. } => "greaterThan",
            Query::Search { .. } => "search",
            Query::OrderAsc(_) => "orderAsc",
            Query::OrderDesc(_) => "orderDesc",
            Query::Limit(_) => "limit",
            Query::Offset(_) => "offset",
            Query::CursorAfter(_) => "cursorAfter",
            Query::Or(_) => "or",
            Query::And(_) => "and",
        }
    }

    pub fn attribute(&self) -> Option<&str> {
        match self {
            Query::Equal { attribute, .. }
            | Query::NotEqual { attribute, .. }
            | Query::LessThan { attribute, .. }
            | Query::GreaterThan { attribute, .. }
            | Query::Search { attribute, .. } => Some(attribute),
            Query::OrderAsc(attribute) | Query::OrderDesc(attribute) => Some(attribute),
            _ => None,
        }
    }

    /// Whether the predicate narrows the result set (as opposed to ordering or paging it).
    pub fn is_filter(&self) -> bool {
        matches!(
            self,
            Query::Equal { .. }
                | Query::NotEqual { .. }
                | Query::LessThan { .. }
                | Query::GreaterThan { .. }
                | Query::Search { .. }
                | Query::Or(_)
                | Query::And(_)
        )
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("method".to_string(), Value::from(self.method()));
        if let Some(attribute) = self.attribute() {
            object.insert("attribute".to_string(), Value::from(attribute));
        }
        let values = match self {
            Query::Equal { values, .. } => Some(Value::Array(values.clone())),
            Query::NotEqual { value, .. }
            | Query::LessThan { value, .. }
            | Query::GreaterThan { value, .. } => Some(json!([value])),
            Query::Search { term, .. } => Some(json!([term])),
            Query::Limit(count) | Query::Offset(count) => Some(json!([count])),
            Query::CursorAfter(id) => Some(json!([id])),
            Query::Or(children) | Query::And(children) => Some(Value::Array(
                children.iter().map(Query::to_json).collect(),
            )),
            Query::OrderAsc(_) | Query::OrderDesc(_) => None,
        };
        if let Some(values) = values {
            object.insert("values".to_string(), values);
        }
        Value::Object(object)
    }

    /// Encodes the predicate as the string sent in a `queries[]` parameter.
    pub fn to_query_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Matches documents whose `attribute` equals any of `values`.
pub fn equal<I, V>(attribute: impl Into<String>, values: I) -> Query
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Query::Equal {
        attribute: attribute.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

pub fn not_equal(attribute: impl Into<String>, value: impl Into<Value>) -> Query {
    Query::NotEqual {
        attribute: attribute.into(),
        value: value.into(),
    }
}

pub fn less_than(attribute: impl Into<String>, value: impl Into<Value>) -> Query {
    Query::LessThan {
        attribute: attribute.into(),
        value: value.into(),
    }
}

pub fn greater_than(attribute: impl Into<String>, value: impl Into<Value>) -> Query {
    Query::GreaterThan {
        attribute: attribute.into(),
        value: value.into(),
    }
}

/// Full-text search on an indexed attribute.
pub fn search(attribute: impl Into<String>, term: impl Into<String>) -> Query {
    Query::Search {
        attribute: attribute.into(),
        term: term.into(),
    }
}

pub fn order_asc(attribute: impl Into<String>) -> Query {
    Query::OrderAsc(attribute.into())
}

pub fn order_desc(attribute: impl Into<String>) -> Query {
    Query::OrderDesc(attribute.into())
}

pub fn limit(count: u32) -> Query {
    Query::Limit(count)
}

pub fn offset(count: u32) -> Query {
    Query::Offset(count)
}

/// Starts the page right after the document with id `document_id`.
pub fn cursor_after(document_id: impl Into<String>) -> Query {
    Query::CursorAfter(document_id.into())
}

/// Matches documents satisfying any of `queries`.
pub fn or(queries: impl IntoIterator<Item = Query>) -> Query {
    Query::Or(queries.into_iter().collect())
}

pub fn and(queries: impl IntoIterator<Item = Query>) -> Query {
    Query::And(queries.into_iter().collect())
}
