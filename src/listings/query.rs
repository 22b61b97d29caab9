use crate::database::{equal, limit, or, order_asc, order_desc, search, Query, CREATED_AT};

/// Filter value that disables category filtering.
pub const ALL_FILTER: &str = "All";
/// Number of listings in the featured carousel.
pub const LATEST_LIMIT: u32 = 5;
/// Number of listings in the recommendation grid of the home screen.
pub const RECOMMENDED_LIMIT: u32 = 6;

pub const NAME_FIELD: &str = "name";
pub const LOCATION_FIELD: &str = "location";
pub const TYPE_FIELD: &str = "type";

/// Filter and search state of a listing screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyQuery {
    /// Category tag, or [`ALL_FILTER`].
    pub filter: String,
    /// Free-text search term, may be empty.
    pub query: String,
    pub limit: Option<u32>,
}

impl Default for PropertyQuery {
    fn default() -> Self {
        Self {
            filter: ALL_FILTER.to_string(),
            query: String::new(),
            limit: None,
        }
    }
}

impl PropertyQuery {
    pub fn new(filter: impl Into<String>, query: impl Into<String>, limit: Option<u32>) -> Self {
        Self {
            filter: filter.into(),
            query: query.into(),
            limit,
        }
    }

    /// Parameters of the home screen recommendation grid.
    pub fn recommended(filter: impl Into<String>, query: impl Into<String>) -> Self {
        Self::new(filter, query, Some(RECOMMENDED_LIMIT))
    }
}

/// Translates listing screen state into predicates, newest listings first.
///
/// Category equality, the name/location/type search group and the result cap are
/// appended in that order, each only when its input is set.
pub fn build_query(params: &PropertyQuery) -> Vec<Query> {
    let mut queries = vec![order_desc(CREATED_AT)];

    if !params.filter.is_empty() && params.filter != ALL_FILTER {
        queries.push(equal(TYPE_FIELD, [params.filter.as_str()]));
    }

    if !params.query.is_empty() {
        queries.push(or([
            search(NAME_FIELD, params.query.as_str()),
            search(LOCATION_FIELD, params.query.as_str()),
            search(TYPE_FIELD, params.query.as_str()),
        ]));
    }

    if let Some(count) = params.limit.filter(|count| *count > 0) {
        queries.push(limit(count));
    }

    queries
}

/// Predicates of the featured carousel: the oldest [`LATEST_LIMIT`] listings.
pub fn build_latest_query() -> Vec<Query> {
    vec![order_asc(CREATED_AT), limit(LATEST_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filter_without_search_only_orders() {
        let queries = build_query(&PropertyQuery::new("All", "", None));
        assert_eq!(queries, vec![order_desc(CREATED_AT)]);
    }

    #[test]
    fn category_filter_and_limit() {
        let queries = build_query(&PropertyQuery::new("Apartment", "", Some(6)));
        assert_eq!(queries, vec![order_desc(CREATED_AT), equal("type", ["Apartment"]), limit(6)]);
    }

    #[test]
    fn search_term_adds_one_disjunctive_group() {
        let queries = build_query(&PropertyQuery::new("All", "lake", None));
        assert_eq!(
            queries,
            vec![
                order_desc(CREATED_AT),
                or([
                    search("name", "lake"),
                    search("location", "lake"),
                    search("type", "lake"),
                ]),
            ]
        );
    }

    #[test]
    fn every_step_in_fixed_order() {
        let queries = build_query(&PropertyQuery::new("Villa", "sea view", Some(3)));
        let methods: Vec<&str> = queries.iter().map(Query::method).collect();
        assert_eq!(methods, vec!["orderDesc", "equal", "or", "limit"]);
    }

    #[test]
    fn empty_filter_and_zero_limit_are_skipped() {
        let queries = build_query(&PropertyQuery::new("", "", Some(0)));
        assert_eq!(queries, vec![order_desc(CREATED_AT)]);
    }

    #[test]
    fn composer_is_deterministic() {
        let params = PropertyQuery::recommended("House", "downtown");
        assert_eq!(build_query(&params), build_query(&params));
        assert_eq!(params.limit, Some(RECOMMENDED_LIMIT));
    }

    #[test]
    fn latest_query_is_fixed() {
        assert_eq!(build_latest_query(), vec![order_asc(CREATED_AT), limit(5)]);
    }
}
