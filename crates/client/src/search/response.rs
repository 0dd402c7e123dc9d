//! Search API response types and normalization.
//!
//! The raw hit shape varies by content category, so every `_source` field is
//! optional at the wire level; missing values degrade to empty strings rather
//! than failing the whole response. Hit order is preserved exactly as
//! returned — the backend is relevance-sorted and no client-side re-sorting
//! is applied.

use serde::{Deserialize, Serialize};

use crate::search::SearchError;

/// Excerpt length used when falling back to the description field.
const FALLBACK_EXCERPT_CHARS: usize = 200;

/// Classification of indexed content, with a fallback for categories this
/// client does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Documentation,
    Blog,
    Intranet,
    Runbook,
    Other(String),
}

impl ContentType {
    /// The category name as stored in the index's `type` field.
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Documentation => "Documentation",
            ContentType::Blog => "Blog",
            ContentType::Intranet => "Intranet",
            ContentType::Runbook => "Runbook",
            ContentType::Other(name) => name,
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Documentation" => ContentType::Documentation,
            "Blog" => ContentType::Blog,
            "Intranet" => ContentType::Intranet,
            "Runbook" => ContentType::Runbook,
            _ => ContentType::Other(value),
        }
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response from the search API.
#[derive(Debug, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub hits: Option<RawHits>,
}

/// Hit container with the total match count.
#[derive(Debug, Deserialize)]
pub struct RawHits {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

/// A single raw hit.
#[derive(Debug, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_score", default)]
    pub score: f64,
    #[serde(rename = "_source", default)]
    pub source: RawSource,
    #[serde(default)]
    pub highlight: RawHighlight,
}

/// Source document fields. Field presence varies by content category.
#[derive(Debug, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Highlighted fragments per field.
#[derive(Debug, Default, Deserialize)]
pub struct RawHighlight {
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub title: Vec<String>,
}

/// Normalized search results for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub items: Vec<ResultItem>,
    /// Total matches known to the backend (may exceed `items.len()`).
    pub total: u64,
    /// Offset this page of results starts at.
    pub start_index: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A normalized result record.
#[derive(Debug, Clone, Serialize)]
pub struct ResultItem {
    pub title: String,
    pub url: String,
    /// Highlighted fragment when available, else a description prefix.
    pub excerpt: String,
    pub content_type: ContentType,
    pub score: f64,
    pub breadcrumb: Vec<String>,
    pub description: String,
}

/// Normalize a raw response into an ordered result list.
///
/// Zero hits is a valid outcome and yields an empty list. A response without
/// the expected hit container is a protocol error, distinct from zero hits.
pub fn normalize(raw: RawSearchResponse, start_index: usize) -> Result<SearchResults, SearchError> {
    let hits = raw
        .hits
        .ok_or_else(|| SearchError::Protocol("response is missing the hits container".to_string()))?;

    let items = hits
        .hits
        .into_iter()
        .map(|hit| {
            let excerpt = excerpt_for(&hit);
            let content_type = hit
                .source
                .content_type
                .map(ContentType::from)
                .unwrap_or_else(|| ContentType::Other("Unknown".to_string()));

            ResultItem {
                title: hit.source.title,
                url: hit.source.url,
                excerpt,
                content_type,
                score: hit.score,
                breadcrumb: hit.source.breadcrumb,
                description: hit.source.description,
            }
        })
        .collect();

    Ok(SearchResults { items, total: hits.total, start_index })
}

/// Prefer the backend's highlighted body fragment; fall back to a bounded
/// prefix of the description when no highlight came back for this hit.
fn excerpt_for(hit: &RawHit) -> String {
    if let Some(fragment) = hit.highlight.body.first()
        && !fragment.is_empty()
    {
        return fragment.clone();
    }

    if hit.source.description.chars().count() > FALLBACK_EXCERPT_CHARS {
        hit.source.description.chars().take(FALLBACK_EXCERPT_CHARS).collect()
    } else {
        hit.source.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "took": 4,
        "timed_out": false,
        "hits": {
            "total": 42,
            "max_score": 11.4,
            "hits": [
                {
                    "_score": 11.4,
                    "_source": {
                        "title": "Cluster upgrades",
                        "url": "https://docs.giantswarm.io/platform/cluster-upgrades/",
                        "type": "Documentation",
                        "breadcrumb": ["platform", "cluster-upgrades"],
                        "description": "How cluster upgrades work."
                    },
                    "highlight": {
                        "body": ["How <em>cluster</em> upgrades are rolled out"],
                        "title": ["<em>Cluster</em> upgrades"]
                    }
                },
                {
                    "_score": 3.2,
                    "_source": {
                        "title": "Upgrade runbook",
                        "url": "https://intranet.giantswarm.io/docs/support-and-ops/runbooks/upgrade/",
                        "type": "Intranet",
                        "breadcrumb": ["docs", "support-and-ops", "runbooks"]
                    }
                },
                {
                    "_score": 0.4,
                    "_source": {
                        "url": "https://docs.giantswarm.io/changes/something/",
                        "type": "SomethingNew"
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_normalize_preserves_order_and_length() {
        let raw: RawSearchResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let results = normalize(raw, 0).unwrap();

        assert_eq!(results.total, 42);
        assert_eq!(results.items.len(), 3);
        assert_eq!(results.items[0].title, "Cluster upgrades");
        assert_eq!(results.items[1].title, "Upgrade runbook");
        assert!(results.items[0].score > results.items[1].score);
    }

    #[test]
    fn test_normalize_prefers_highlight() {
        let raw: RawSearchResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let results = normalize(raw, 0).unwrap();
        assert_eq!(
            results.items[0].excerpt,
            "How <em>cluster</em> upgrades are rolled out"
        );
    }

    #[test]
    fn test_normalize_falls_back_to_description() {
        let json = r#"{
            "hits": {
                "total": 1,
                "hits": [{
                    "_score": 1.0,
                    "_source": {
                        "title": "No highlight",
                        "url": "https://docs.giantswarm.io/x/",
                        "type": "Documentation",
                        "description": "A plain description."
                    }
                }]
            }
        }"#;
        let raw: RawSearchResponse = serde_json::from_str(json).unwrap();
        let results = normalize(raw, 0).unwrap();
        assert_eq!(results.items[0].excerpt, "A plain description.");
    }

    #[test]
    fn test_normalize_missing_fields_become_empty() {
        let raw: RawSearchResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let results = normalize(raw, 0).unwrap();

        let third = &results.items[2];
        assert_eq!(third.title, "");
        assert_eq!(third.description, "");
        assert!(third.breadcrumb.is_empty());
        assert_eq!(third.content_type, ContentType::Other("SomethingNew".to_string()));
    }

    #[test]
    fn test_normalize_missing_type_is_unknown() {
        let json = r#"{"hits": {"total": 1, "hits": [{"_score": 1.0, "_source": {"title": "t"}}]}}"#;
        let raw: RawSearchResponse = serde_json::from_str(json).unwrap();
        let results = normalize(raw, 0).unwrap();
        assert_eq!(
            results.items[0].content_type,
            ContentType::Other("Unknown".to_string())
        );
    }

    #[test]
    fn test_normalize_zero_hits_is_empty_not_error() {
        let json = r#"{"hits": {"total": 0, "hits": []}}"#;
        let raw: RawSearchResponse = serde_json::from_str(json).unwrap();
        let results = normalize(raw, 0).unwrap();
        assert!(results.is_empty());
        assert_eq!(results.total, 0);
    }

    #[test]
    fn test_normalize_missing_hits_container_is_protocol_error() {
        let json = r#"{"error": "index_not_found_exception"}"#;
        let raw: RawSearchResponse = serde_json::from_str(json).unwrap();
        let result = normalize(raw, 0);
        assert!(matches!(result, Err(SearchError::Protocol(_))));
    }

    #[test]
    fn test_excerpt_fallback_is_bounded() {
        let long_description = "x".repeat(500);
        let json = format!(
            r#"{{"hits": {{"total": 1, "hits": [{{"_score": 1.0, "_source": {{"description": "{long_description}"}}}}]}}}}"#
        );
        let raw: RawSearchResponse = serde_json::from_str(&json).unwrap();
        let results = normalize(raw, 0).unwrap();
        assert_eq!(results.items[0].excerpt.chars().count(), 200);
    }

    #[test]
    fn test_content_type_round_trip() {
        assert_eq!(ContentType::from("Intranet".to_string()), ContentType::Intranet);
        assert_eq!(ContentType::from("Runbook".to_string()), ContentType::Runbook);
        assert_eq!(
            ContentType::from("Wiki".to_string()),
            ContentType::Other("Wiki".to_string())
        );
        assert_eq!(ContentType::Intranet.to_string(), "Intranet");
        assert_eq!(ContentType::Other("Wiki".into()).to_string(), "Wiki");
    }

    #[test]
    fn test_start_index_carried_through() {
        let json = r#"{"hits": {"total": 42, "hits": []}}"#;
        let raw: RawSearchResponse = serde_json::from_str(json).unwrap();
        let results = normalize(raw, 30).unwrap();
        assert_eq!(results.start_index, 30);
    }
}
