// Query parameter sets for the MediaWiki `action=query` endpoint

/// Separator MediaWiki expects between multiple values of one parameter.
pub const TITLE_SEPARATOR: &str = "|";

/// Upper bound MediaWiki places on the number of titles in one query.
pub const MAX_TITLES_PER_QUERY: usize = 50;

/// An ordered list of query-string pairs. `format=json` and `action=query` are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    fn query() -> Self {
        Self {
            pairs: vec![
                ("format", "json".to_string()),
                ("action", "query".to_string()),
            ],
        }
    }

    fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((key, value.into()));
        self
    }

    /// Full wikitext of the latest revision of `title`.
    pub fn revisions(title: &str) -> Self {
        Self::query()
            .with("prop", "revisions")
            .with("rvprop", "content")
            .with("titles", title)
    }

    /// Page metadata (including byte `length`) for every title in `titles`.
    pub fn info<S: AsRef<str>>(titles: &[S]) -> Self {
        Self::query()
            .with("prop", "info")
            .with("titles", join_titles(titles))
    }

    /// Categories the page `title` belongs to.
    pub fn categories(title: &str) -> Self {
        Self::query()
            .with("prop", "categories")
            .with("cllimit", "max")
            .with("titles", title)
    }

    /// Members of the category `category` (given without its `Category:` prefix).
    pub fn category_members(category: &str, limit: usize) -> Self {
        Self::query()
            .with("list", "categorymembers")
            .with("cmtitle", format!("Category:{}", category))
            .with("cmlimit", limit.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// Join titles with `|`, no trailing separator.
pub fn join_titles<S: AsRef<str>>(titles: &[S]) -> String {
    titles
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}
