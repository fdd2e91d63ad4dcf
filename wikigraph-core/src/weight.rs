// Weight computation, normalization and ranking for link titles

use crate::error::{GraphError, Result};
use std::collections::HashMap;

/// Article title to byte size, as reported by the info query.
pub type SizeMap = HashMap<String, u64>;

/// Insertion-ordered title → weight mapping.
///
/// Re-inserting an existing title overwrites its weight in place. After
/// [`sort_and_limit`] the order is the display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedWordMap {
    entries: Vec<(String, f64)>,
}

impl WeightedWordMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: impl Into<String>, weight: f64) {
        let title = title.into();
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((title, weight)),
        }
    }

    pub fn get(&self, title: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, w)| *w)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(t, w)| (t.as_str(), *w))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, w)| *w)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for WeightedWordMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = WeightedWordMap::new();
        for (title, weight) in iter {
            map.insert(title, weight);
        }
        map
    }
}

impl IntoIterator for WeightedWordMap {
    type Item = (String, f64);
    type IntoIter = std::vec::IntoIter<(String, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Weight every distinct title by its number of (non-overlapping) substring
/// occurrences in `content`. Titles keep the order of their first appearance.
///
/// This is a literal substring count: a short title that also appears inside
/// longer words is counted each time.
pub fn count_weights<S: AsRef<str>>(content: &str, titles: &[S]) -> WeightedWordMap {
    let mut map = WeightedWordMap::new();
    for title in titles {
        let title = title.as_ref();
        if map.contains(title) {
            continue;
        }
        map.insert(title, content.matches(title).count() as f64);
    }
    map
}

/// Weight every distinct title by its article size. Titles without a size are left out.
pub fn size_weights<S: AsRef<str>>(titles: &[S], sizes: &SizeMap) -> WeightedWordMap {
    let mut map = WeightedWordMap::new();
    for title in titles {
        let title = title.as_ref();
        if let Some(size) = sizes.get(title)
            && !map.contains(title)
        {
            map.insert(title, *size as f64);
        }
    }
    map
}

/// Min-max scale all weights into `[0, 1]`. If every weight is equal each maps to `1`.
pub fn normalize(map: &WeightedWordMap) -> Result<WeightedWordMap> {
    let lo = map.values().reduce(f64::min).ok_or(GraphError::EmptyInput)?;
    let hi = map.values().reduce(f64::max).ok_or(GraphError::EmptyInput)?;
    let span = hi - lo;

    Ok(map
        .iter()
        .map(|(title, weight)| {
            let norm = if span == 0.0 { 1.0 } else { (weight - lo) / span };
            (title, norm)
        })
        .collect())
}

/// Stable sort by weight descending, then keep the first `max_count + 1` entries.
pub fn sort_and_limit(map: &WeightedWordMap, max_count: usize) -> WeightedWordMap {
    let mut entries = map.entries.clone();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.truncate(max_count.saturating_add(1));
    WeightedWordMap { entries }
}
