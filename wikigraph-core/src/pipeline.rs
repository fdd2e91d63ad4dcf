// The two request-scoped pipelines: keyword -> link graph, keyword -> category tree
//
// Every outbound query is awaited in turn; nothing runs concurrently and
// nothing is cached between calls.

use crate::category::filter_categories;
use crate::error::{GraphError, Result};
use crate::extract::extract_links;
use crate::graph::{ChartKind, LinkGraph, MetricKind, build_link_graph};
use crate::response::{category_members, page_categories, page_content, page_sizes};
use crate::tree::{CategoryMemberMap, CategoryTree, build_category_tree};
use crate::weight::{SizeMap, count_weights, normalize, size_weights, sort_and_limit};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use wikigraph_fetch::params::{MAX_TITLES_PER_QUERY, TITLE_SEPARATOR};
use wikigraph_fetch::{ApiResponse, QueryParams, WikiClient};

pub const DEFAULT_MAX_NODES: usize = 20;
pub const DEFAULT_MEMBER_LIMIT: usize = 50;

/// Callback for reporting pipeline progress
pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// What the raw weight of a link target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightBy {
    /// Substring occurrences of the title in the article text
    #[default]
    Occurrences,
    /// Byte size of the target article
    ArticleSize,
}

/// Options for building a link graph
#[derive(Debug, Clone)]
pub struct LinkGraphOptions {
    pub max_nodes: usize,
    pub metric: MetricKind,
    pub chart: ChartKind,
    pub weight_by: WeightBy,
}

impl Default for LinkGraphOptions {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            metric: MetricKind::default(),
            chart: ChartKind::default(),
            weight_by: WeightBy::default(),
        }
    }
}

/// Options for building a category tree
#[derive(Debug, Clone)]
pub struct CategoryOptions {
    pub member_limit: usize,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self {
            member_limit: DEFAULT_MEMBER_LIMIT,
        }
    }
}

fn require_keyword(keyword: &str) -> Result<()> {
    if keyword.trim().is_empty() {
        return Err(GraphError::EmptyKeyword);
    }
    Ok(())
}

fn ensure_success(response: &ApiResponse) -> Result<()> {
    if !response.is_success() {
        error!("API response code: {}", response.status_code);
        return Err(GraphError::UpstreamFailure {
            status: response.status_code,
        });
    }
    Ok(())
}

/// Group `titles` so that no request names more than [`MAX_TITLES_PER_QUERY`]
/// titles once they are joined with `|`. A token that itself contains `|`
/// counts once per piece; a token with more pieces than the limit goes alone.
fn size_batches<'a>(titles: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut batches = Vec::new();
    let mut current = Vec::new();
    let mut pieces = 0;

    for &title in titles {
        let cost = title.split(TITLE_SEPARATOR).count();
        if !current.is_empty() && pieces + cost > MAX_TITLES_PER_QUERY {
            batches.push(std::mem::take(&mut current));
            pieces = 0;
        }
        current.push(title);
        pieces += cost;
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

/// Look up article sizes for `titles`, at most [`MAX_TITLES_PER_QUERY`] per request.
pub async fn fetch_sizes(client: &WikiClient, titles: &[&str]) -> Result<SizeMap> {
    let mut sizes = SizeMap::new();

    for batch in size_batches(titles) {
        let response = client.query(&QueryParams::info(&batch)).await?;
        ensure_success(&response)?;
        sizes.extend(page_sizes(&response.body));
    }

    let resolved = titles.iter().filter(|t| sizes.contains_key(**t)).count();
    if resolved < titles.len() {
        warn!(
            "Sizes found for {} of {} titles; the rest default to 0",
            resolved,
            titles.len()
        );
    }

    Ok(sizes)
}

fn distinct<'a>(titles: &'a [String]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    titles
        .iter()
        .map(String::as_str)
        .filter(|t| seen.insert(*t))
        .collect()
}

/// Build the weighted link graph for the article `keyword`.
pub async fn link_graph(
    client: &WikiClient,
    keyword: &str,
    options: &LinkGraphOptions,
) -> Result<LinkGraph> {
    require_keyword(keyword)?;
    info!("keyword: {}", keyword);
    info!("max_nodes: {}", options.max_nodes);

    let response = client.query(&QueryParams::revisions(keyword)).await?;
    ensure_success(&response)?;

    let content = page_content(&response.body)
        .ok_or_else(|| GraphError::PageNotFound(keyword.to_string()))?;

    let titles = extract_links(&content);
    debug!("Extracted {} link tokens", titles.len());
    if titles.is_empty() {
        return Err(GraphError::EmptyResultSet(keyword.to_string()));
    }

    let mut known_sizes = None;
    let raw = match options.weight_by {
        WeightBy::Occurrences => count_weights(&content, &titles),
        WeightBy::ArticleSize => {
            let sizes = fetch_sizes(client, &distinct(&titles)).await?;
            let raw = size_weights(&titles, &sizes);
            known_sizes = Some(sizes);
            raw
        }
    };
    if raw.is_empty() {
        return Err(GraphError::EmptyResultSet(keyword.to_string()));
    }
    debug!("Weighted {} distinct titles", raw.len());

    let ranked = sort_and_limit(&normalize(&raw)?, options.max_nodes);

    let sizes = match (options.chart, known_sizes) {
        (ChartKind::Search, _) => SizeMap::new(),
        (ChartKind::Link, Some(sizes)) => sizes,
        (ChartKind::Link, None) => {
            let shown: Vec<&str> = ranked.titles().collect();
            fetch_sizes(client, &shown).await?
        }
    };

    let graph = build_link_graph(keyword, &ranked, &sizes, options.metric, options.chart);
    info!("Built link graph with {} nodes", graph.nodes.len());
    Ok(graph)
}

/// Build the category → member-article tree for the article `keyword`.
pub async fn category_tree(
    client: &WikiClient,
    keyword: &str,
    options: &CategoryOptions,
    progress_callback: Option<ProgressCallback>,
) -> Result<CategoryTree> {
    require_keyword(keyword)?;
    info!("keyword: {}", keyword);

    let response = client.query(&QueryParams::categories(keyword)).await?;
    ensure_success(&response)?;

    let raw = page_categories(&response.body)
        .ok_or_else(|| GraphError::PageNotFound(keyword.to_string()))?;
    let categories = filter_categories(&raw);
    debug!(
        "Kept {} of {} categories after filtering",
        categories.len(),
        raw.len()
    );

    let unique = distinct(&categories);
    if unique.len() < categories.len() {
        debug!(
            "Skipping {} repeated categories",
            categories.len() - unique.len()
        );
    }

    let mut members = CategoryMemberMap::new();

    for (idx, category) in unique.iter().enumerate() {
        if let Some(ref callback) = progress_callback {
            callback(format!(
                "Fetching category {}/{}: {}",
                idx + 1,
                unique.len(),
                category
            ));
        }

        let response = client
            .query(&QueryParams::category_members(category, options.member_limit))
            .await?;
        ensure_success(&response)?;

        let articles = category_members(&response.body);
        debug!("{}: {} articles", category, articles.len());
        members.insert(*category, articles);
    }

    let tree = build_category_tree(keyword, &members);
    info!(
        "Built category tree with {} categories, {} articles",
        tree.children.len(),
        tree.article_count()
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keyword_rejected() {
        assert!(matches!(require_keyword(""), Err(GraphError::EmptyKeyword)));
        assert!(matches!(require_keyword("  \t"), Err(GraphError::EmptyKeyword)));
        assert!(require_keyword("Rust").is_ok());
    }

    #[test]
    fn test_ensure_success() {
        let ok = ApiResponse::new(200, serde_json::Value::Null);
        assert!(ensure_success(&ok).is_ok());

        let bad = ApiResponse::new(502, serde_json::Value::Null);
        assert!(matches!(
            ensure_success(&bad),
            Err(GraphError::UpstreamFailure { status: 502 })
        ));
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        let titles = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(distinct(&titles), vec!["b", "a"]);
    }

    #[test]
    fn test_size_batches_count_piped_titles() {
        let titles: Vec<String> = (0..30).map(|i| format!("T{}|label{}", i, i)).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

        let batches = size_batches(&titles);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 25);
        assert_eq!(batches[1].len(), 5);
        for batch in &batches {
            let joined = batch.join(TITLE_SEPARATOR);
            assert!(joined.split(TITLE_SEPARATOR).count() <= MAX_TITLES_PER_QUERY);
        }
    }

    #[test]
    fn test_size_batches_plain_titles() {
        let titles: Vec<String> = (0..120).map(|i| format!("T{}", i)).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

        let lens: Vec<usize> = size_batches(&titles).iter().map(Vec::len).collect();
        assert_eq!(lens, vec![50, 50, 20]);
        assert!(size_batches(&[]).is_empty());
    }
}
