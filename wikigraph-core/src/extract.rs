// Wiki-link extraction from raw wikitext

use regex::Regex;
use std::sync::LazyLock;

/// Shortest `[[...]]` run, so adjacent links never merge into one match.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.+?)\]\]").expect("link pattern compiles"));

/// Return the inner text of every `[[...]]` token in `content`, in order of appearance,
/// duplicates kept.
///
/// The inner text is taken verbatim: a piped link `[[Target|label]]` yields
/// `"Target|label"` and a section link `[[Target#Part]]` yields `"Target#Part"`.
pub fn extract_links(content: &str) -> Vec<String> {
    LINK_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
