//! Search request validation and query-document construction.
//!
//! The backend is an Elasticsearch 6.8.x index. The query document built here
//! carries the field boosts that make title/uri/description matches outrank
//! body matches, the static type/breadcrumb weighting functions, and the
//! highlight directives for excerpt extraction. The backend's boost
//! configuration is the single source of ranking truth; results are consumed
//! in the returned order.

use serde_json::{Value, json};

use crate::search::{ContentType, SearchError};

/// Highlight fragment size for body excerpts.
const FRAGMENT_SIZE: u32 = 150;

/// Excerpt length returned when nothing in the body matched.
const NO_MATCH_SIZE: u32 = 200;

/// A validated search request.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Free-text search term.
    pub term: String,

    /// Offset into the result list, for pagination.
    pub start_index: usize,

    /// Requested result count; clamped to the configured maximum.
    pub size: usize,

    /// Restrict results to one content category.
    pub type_filter: Option<ContentType>,

    /// Restrict results to a section path, one segment per breadcrumb level.
    pub breadcrumb_filter: Vec<String>,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into(), size: 30, ..Default::default() }
    }

    /// Validate the request parameters.
    ///
    /// An empty or whitespace-only term is rejected here, before any query
    /// document is constructed or any network call is made.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.term.trim().is_empty() {
            return Err(SearchError::InvalidQuery("search term cannot be empty".to_string()));
        }
        Ok(())
    }

    /// The result count actually requested: always within `[1, max_results]`.
    pub fn effective_size(&self, max_results: usize) -> usize {
        self.size.clamp(1, max_results)
    }

    /// Build the query document sent to the search API.
    ///
    /// Callers must `validate()` first; the term is used trimmed.
    pub fn build_payload(&self, max_results: usize) -> Value {
        let base_query = json!({
            "function_score": {
                "query": {
                    "simple_query_string": {
                        "fields": ["title^5", "uri^5", "description^5", "text"],
                        "default_operator": "AND",
                        "query": self.term.trim(),
                    },
                },
                "functions": [
                    {"filter": {"term": {"type": "Intranet"}}, "weight": 10},
                    {"filter": {"term": {"type": "Blog"}}, "weight": 0.01},
                    {"filter": {"term": {"breadcrumb_1": "changes"}}, "weight": 0.0001},
                    {"filter": {"term": {"breadcrumb_1": "api"}}, "weight": 0.0001},
                ]
            }
        });

        let mut must_clauses = vec![base_query];

        if let Some(type_filter) = &self.type_filter {
            must_clauses.push(json!({"term": {"type": type_filter.as_str()}}));
        }

        // breadcrumb fields are analyzed, so filters use match, not term
        for (position, crumb) in self.breadcrumb_filter.iter().enumerate() {
            let mut clause = serde_json::Map::new();
            clause.insert(format!("breadcrumb_{}", position + 1), json!(crumb));
            must_clauses.push(json!({"match": Value::Object(clause)}));
        }

        let query = if must_clauses.len() > 1 {
            json!({"bool": {"must": must_clauses}})
        } else {
            must_clauses.remove(0)
        };

        json!({
            "from": self.start_index,
            "size": self.effective_size(max_results),
            "sort": ["_score"],
            "_source": {"excludes": ["text", "body"]},
            "query": query,
            "highlight": {
                "fields": {
                    "body": {
                        "type": "unified",
                        "number_of_fragments": 1,
                        "no_match_size": NO_MATCH_SIZE,
                        "fragment_size": FRAGMENT_SIZE,
                    },
                    "title": {"type": "unified", "number_of_fragments": 1},
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req = SearchRequest::new("kubernetes upgrade");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_term_rejected() {
        let req = SearchRequest::new("");
        assert!(matches!(req.validate(), Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn test_whitespace_term_rejected() {
        let req = SearchRequest::new("   \t\n  ");
        assert!(matches!(req.validate(), Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn test_effective_size_clamped() {
        let req = SearchRequest { size: 500, ..SearchRequest::new("term") };
        assert_eq!(req.effective_size(50), 50);

        let req = SearchRequest { size: 0, ..SearchRequest::new("term") };
        assert_eq!(req.effective_size(50), 1);

        let req = SearchRequest { size: 10, ..SearchRequest::new("term") };
        assert_eq!(req.effective_size(50), 10);
    }

    #[test]
    fn test_payload_base_shape() {
        let req = SearchRequest::new("cluster autoscaler");
        let payload = req.build_payload(50);

        assert_eq!(payload["from"], 0);
        assert_eq!(payload["size"], 30);
        assert_eq!(payload["sort"][0], "_score");
        assert_eq!(payload["_source"]["excludes"][0], "text");

        // no filters: the function_score query is used directly, no bool wrapper
        assert!(payload["query"]["bool"].is_null());
        let sqs = &payload["query"]["function_score"]["query"]["simple_query_string"];
        assert_eq!(sqs["query"], "cluster autoscaler");
        assert_eq!(sqs["default_operator"], "AND");
        assert_eq!(sqs["fields"][0], "title^5");
    }

    #[test]
    fn test_payload_trims_term() {
        let req = SearchRequest::new("  cluster  ");
        let payload = req.build_payload(50);
        assert_eq!(
            payload["query"]["function_score"]["query"]["simple_query_string"]["query"],
            "cluster"
        );
    }

    #[test]
    fn test_payload_boost_functions() {
        let req = SearchRequest::new("term");
        let payload = req.build_payload(50);
        let functions = payload["query"]["function_score"]["functions"]
            .as_array()
            .unwrap();

        assert_eq!(functions.len(), 4);
        assert_eq!(functions[0]["filter"]["term"]["type"], "Intranet");
        assert_eq!(functions[0]["weight"], 10);
        assert_eq!(functions[1]["filter"]["term"]["type"], "Blog");
        assert_eq!(functions[1]["weight"], 0.01);
        assert_eq!(functions[2]["filter"]["term"]["breadcrumb_1"], "changes");
        assert_eq!(functions[3]["filter"]["term"]["breadcrumb_1"], "api");
    }

    #[test]
    fn test_payload_type_filter() {
        let req = SearchRequest {
            type_filter: Some(ContentType::Intranet),
            ..SearchRequest::new("term")
        };
        let payload = req.build_payload(50);

        let must = payload["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 2);
        assert!(must[0]["function_score"].is_object());
        assert_eq!(must[1]["term"]["type"], "Intranet");
    }

    #[test]
    fn test_payload_breadcrumb_filter_positions() {
        let req = SearchRequest {
            breadcrumb_filter: vec!["support-and-ops".into(), "runbooks".into()],
            ..SearchRequest::new("term")
        };
        let payload = req.build_payload(50);

        let must = payload["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 3);
        assert_eq!(must[1]["match"]["breadcrumb_1"], "support-and-ops");
        assert_eq!(must[2]["match"]["breadcrumb_2"], "runbooks");
    }

    #[test]
    fn test_payload_highlight_block() {
        let req = SearchRequest::new("term");
        let payload = req.build_payload(50);

        let body = &payload["highlight"]["fields"]["body"];
        assert_eq!(body["type"], "unified");
        assert_eq!(body["number_of_fragments"], 1);
        assert_eq!(body["fragment_size"], 150);
        assert_eq!(body["no_match_size"], 200);

        let title = &payload["highlight"]["fields"]["title"];
        assert_eq!(title["number_of_fragments"], 1);
    }

    #[test]
    fn test_payload_pagination() {
        let req = SearchRequest { start_index: 30, size: 10, ..SearchRequest::new("term") };
        let payload = req.build_payload(50);
        assert_eq!(payload["from"], 30);
        assert_eq!(payload["size"], 10);
    }
}
