use serde::Serialize;

/// Filtered category name → article titles (namespace 0) in that category, in lookup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMemberMap {
    entries: Vec<(String, Vec<String>)>,
}

impl CategoryMemberMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category. A repeated category replaces its earlier member list in place.
    pub fn insert(&mut self, category: impl Into<String>, members: Vec<String>) {
        let category = category.into();
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = members,
            None => self.entries.push((category, members)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, m)| m.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(c, m)| (c.as_str(), m.as_slice()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleLeaf {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBranch {
    pub name: String,
    pub children: Vec<ArticleLeaf>,
}

/// root keyword → categories → articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTree {
    pub name: String,
    pub children: Vec<CategoryBranch>,
}

impl CategoryTree {
    pub fn article_count(&self) -> usize {
        self.children.iter().map(|c| c.children.len()).sum()
    }
}

pub fn build_category_tree(keyword: &str, members: &CategoryMemberMap) -> CategoryTree {
    let children = members
        .iter()
        .map(|(category, articles)| CategoryBranch {
            name: category.to_string(),
            children: articles
                .iter()
                .map(|article| ArticleLeaf {
                    name: article.clone(),
                })
                .collect(),
        })
        .collect();

    CategoryTree {
        name: keyword.to_string(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_three_level_structure() {
        let mut members = CategoryMemberMap::new();
        members.insert("Lang", vec!["Rust".to_string(), "Go".to_string()]);
        members.insert("Empty", vec![]);

        let tree = build_category_tree("Root", &members);

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({
                "name": "Root",
                "children": [
                    {"name": "Lang", "children": [{"name": "Rust"}, {"name": "Go"}]},
                    {"name": "Empty", "children": []},
                ]
            })
        );
        assert_eq!(tree.article_count(), 2);
    }

    #[test]
    fn test_no_categories() {
        let tree = build_category_tree("Root", &CategoryMemberMap::new());
        assert_eq!(tree.name, "Root");
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_member_map_keeps_insertion_order() {
        let mut members = CategoryMemberMap::new();
        members.insert("b", vec!["1".to_string()]);
        members.insert("a", vec![]);
        members.insert("b", vec!["2".to_string()]);

        let names: Vec<&str> = members.iter().map(|(c, _)| c).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(members.get("b"), Some(&["2".to_string()][..]));
    }
}
