// Unwrapping of MediaWiki `action=query` response bodies
//
// Every function here is lenient: a body that does not have the expected
// shape yields "nothing found" rather than an error.

use crate::weight::SizeMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Article namespace.
pub const MAIN_NAMESPACE: i64 = 0;

#[derive(Debug, Deserialize, Default)]
struct QueryResponse {
    #[serde(default)]
    query: QueryPayload,
}

#[derive(Debug, Deserialize, Default)]
struct QueryPayload {
    #[serde(default)]
    pages: BTreeMap<String, PageItem>,
    #[serde(default)]
    categorymembers: Vec<MemberItem>,
    #[serde(default)]
    normalized: Vec<NormalizedTitle>,
}

/// One `{from, to}` pair: the title as requested and the canonical title the API answered with.
#[derive(Debug, Deserialize)]
struct NormalizedTitle {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize, Default)]
struct PageItem {
    title: Option<String>,
    length: Option<u64>,
    missing: Option<Value>,
    revisions: Option<Vec<Revision>>,
    categories: Option<Vec<CategoryItem>>,
}

#[derive(Debug, Deserialize, Default)]
struct Revision {
    #[serde(rename = "*")]
    star: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryItem {
    title: String,
}

#[derive(Debug, Deserialize)]
struct MemberItem {
    ns: i64,
    title: String,
}

fn parse(body: &Value) -> QueryResponse {
    QueryResponse::deserialize(body).unwrap_or_else(|e| {
        warn!("Unexpected query response shape: {}", e);
        QueryResponse::default()
    })
}

/// Wikitext of the first page's latest revision. `None` when the page has no revisions.
pub fn page_content(body: &Value) -> Option<String> {
    let page = parse(body).query.pages.into_values().next()?;
    let revision = page.revisions?.into_iter().next()?;
    revision.star.or(revision.content)
}

/// Title → byte length for every page that reports both.
///
/// Titles the API normalized (`rust` → `Rust`, `New_York` → `New York`) are
/// also keyed by the requested spelling, so link tokens resolve as written.
pub fn page_sizes(body: &Value) -> SizeMap {
    let query = parse(body).query;
    let mut sizes: SizeMap = query
        .pages
        .into_values()
        .filter_map(|page| Some((page.title?, page.length?)))
        .collect();

    for pair in query.normalized {
        if let Some(&size) = sizes.get(&pair.to) {
            sizes.entry(pair.from).or_insert(size);
        }
    }

    sizes
}

/// Raw category titles (still `Category:`-prefixed) of the first page.
/// `None` when there is no page or the page is missing.
pub fn page_categories(body: &Value) -> Option<Vec<String>> {
    let page = parse(body).query.pages.into_values().next()?;
    if page.missing.is_some() {
        return None;
    }

    Some(
        page.categories
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.title)
            .collect(),
    )
}

/// Titles of the article-namespace members of a category, in response order.
pub fn category_members(body: &Value) -> Vec<String> {
    parse(body)
        .query
        .categorymembers
        .into_iter()
        .filter(|m| m.ns == MAIN_NAMESPACE)
        .map(|m| m.title)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_content_present() {
        let body = json!({
            "batchcomplete": "",
            "query": {"pages": {"12345": {
                "pageid": 12345, "ns": 0, "title": "Rust",
                "revisions": [{"contentformat": "text/x-wiki", "*": "'''Rust''' [[Mozilla]]"}]
            }}}
        });
        assert_eq!(page_content(&body).as_deref(), Some("'''Rust''' [[Mozilla]]"));
    }

    #[test]
    fn test_page_content_missing_page() {
        let body = json!({
            "query": {"pages": {"-1": {"ns": 0, "title": "Nope", "missing": ""}}}
        });
        assert_eq!(page_content(&body), None);
    }

    #[test]
    fn test_page_content_malformed_body() {
        assert_eq!(page_content(&json!({"query": "oops"})), None);
        assert_eq!(page_content(&json!(null)), None);
        assert_eq!(page_content(&json!({})), None);
    }

    #[test]
    fn test_page_sizes_skip_incomplete_entries() {
        let body = json!({
            "query": {"pages": {
                "1": {"title": "X", "length": 100},
                "2": {"title": "Y"},
                "-1": {"title": "Z", "missing": ""},
                "3": {"length": 5}
            }}
        });
        let sizes = page_sizes(&body);
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes.get("X"), Some(&100));
    }

    #[test]
    fn test_page_sizes_follow_normalized_titles() {
        let body = json!({
            "query": {
                "normalized": [
                    {"from": "New_York", "to": "New York"},
                    {"from": "rust", "to": "Rust"},
                    {"from": "nope", "to": "Nope"}
                ],
                "pages": {
                    "10": {"title": "New York", "length": 5000},
                    "11": {"title": "Rust", "length": 7000},
                    "-1": {"title": "Nope", "missing": ""}
                }
            }
        });
        let sizes = page_sizes(&body);
        assert_eq!(sizes.get("New_York"), Some(&5000));
        assert_eq!(sizes.get("New York"), Some(&5000));
        assert_eq!(sizes.get("rust"), Some(&7000));
        assert_eq!(sizes.get("Rust"), Some(&7000));
        assert!(!sizes.contains_key("nope"));
    }

    #[test]
    fn test_page_categories() {
        let body = json!({
            "query": {"pages": {"7": {
                "title": "Rust",
                "categories": [
                    {"ns": 14, "title": "Category:プログラミング言語"},
                    {"ns": 14, "title": "Category:Mozilla"}
                ]
            }}}
        });
        assert_eq!(
            page_categories(&body),
            Some(vec![
                "Category:プログラミング言語".to_string(),
                "Category:Mozilla".to_string()
            ])
        );
    }

    #[test]
    fn test_page_categories_absent_key_is_empty() {
        let body = json!({"query": {"pages": {"7": {"title": "Rust"}}}});
        assert_eq!(page_categories(&body), Some(vec![]));
    }

    #[test]
    fn test_page_categories_missing_page() {
        let body = json!({"query": {"pages": {"-1": {"title": "Nope", "missing": ""}}}});
        assert_eq!(page_categories(&body), None);
        assert_eq!(page_categories(&json!({})), None);
    }

    #[test]
    fn test_category_members_main_namespace_only() {
        let body = json!({
            "query": {"categorymembers": [
                {"pageid": 1, "ns": 0, "title": "Rust"},
                {"pageid": 2, "ns": 14, "title": "Category:Sub"},
                {"pageid": 3, "ns": 0, "title": "Go"},
                {"pageid": 4, "ns": 10, "title": "Template:Lang"}
            ]}
        });
        assert_eq!(category_members(&body), vec!["Rust", "Go"]);
    }
}
