// Maintenance / meta category filtering

/// Namespace prefix the categories query puts in front of every category title.
pub const CATEGORY_PREFIX: &str = "Category:";

/// Maintenance categories removed on exact match.
pub const EXACT_DENY_LIST: &[&str] = &[
    "ISBNマジックリンクを使用しているページ",
    "PMIDマジックリンクを使用しているページ",
    "RFCマジックリンクを使用しているページ",
    "出典を必要とする記述のある記事",
    "出典を必要とする記事",
    "曖昧さ回避ページへのリンクがある記事",
    "外部リンクがリンク切れになっている記事",
    "言語表記が不適切な記事",
    "画像提供依頼",
    "座標一覧を含む記事",
    "ウィキデータにある座標",
    "ISBNエラーのあるページ",
    "Pages using ISBN magic links",
    "All articles with unsourced statements",
    "All articles with dead external links",
    "Articles with short description",
    "Short description is different from Wikidata",
    "Coordinates on Wikidata",
];

/// Maintenance categories removed when they contain any of these fragments.
pub const SUBSTRING_DENY_LIST: &[&str] = &[
    "出典を必要とする記述のある記事/",
    "出典皆無な存命人物記事",
    "独自研究の除去が必要な記事",
    "参照方法",
    "脚注の不足している記事",
    "雑多な内容を箇条書きした節のある記事",
    "スタブ",
    "典拠管理識別子",
    "ウィキデータにない",
    "Webarchiveテンプレート",
    "CS1",
    "Articles needing additional references",
    "Articles with unsourced statements",
    "Articles with dead external links",
    "Wikipedia articles with",
    "Webarchive template",
    "Use dmy dates",
    "Use mdy dates",
];

/// Remove one leading `Category:` from `raw`, if present. Nothing else is touched.
pub fn strip_category_prefix(raw: &str) -> &str {
    raw.strip_prefix(CATEGORY_PREFIX).unwrap_or(raw)
}

pub fn is_maintenance_category(name: &str) -> bool {
    EXACT_DENY_LIST.contains(&name)
        || SUBSTRING_DENY_LIST
            .iter()
            .any(|fragment| name.contains(fragment))
}

/// Strip the `Category:` prefix and drop maintenance categories.
/// Survivors keep their input order; duplicates are kept.
pub fn filter_categories<S: AsRef<str>>(raw_categories: &[S]) -> Vec<String> {
    raw_categories
        .iter()
        .map(|raw| strip_category_prefix(raw.as_ref()))
        .filter(|name| !is_maintenance_category(name))
        .map(str::to_string)
        .collect()
}
