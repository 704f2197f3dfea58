use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};

/// Search case sensitivity mode
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Smart case: case-insensitive unless query contains uppercase letters
    #[default]
    SmartCase,
    /// Case-sensitive search (always)
    CaseSensitive,
}

/// Wrapper around nucleo for fuzzy filtering of result rows
pub struct SearchIndex {
    matcher: Matcher,
    mode: SearchMode,
}

impl SearchIndex {
    /// Create a new search index with default mode (SmartCase)
    pub fn new() -> Self {
        SearchIndex {
            matcher: Matcher::new(Config::DEFAULT),
            mode: SearchMode::default(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Toggle between SmartCase and CaseSensitive modes
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            SearchMode::SmartCase => SearchMode::CaseSensitive,
            SearchMode::CaseSensitive => SearchMode::SmartCase,
        };
    }

    /// Search items by query string
    /// Returns (item index, score) tuples, best match first
    pub fn search<S: AsRef<str>>(&mut self, items: &[S], query: &str) -> Vec<(usize, u32)> {
        if query.is_empty() {
            // Everything matches, in original order
            return (0..items.len()).map(|i| (i, u32::MAX)).collect();
        }

        let case_matching = match self.mode {
            SearchMode::SmartCase => CaseMatching::Smart,
            SearchMode::CaseSensitive => CaseMatching::Respect,
        };
        let pattern = Pattern::parse(query, case_matching, Normalization::Smart);

        let mut results: Vec<(usize, u32)> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let text = Utf32String::from(item.as_ref());
                pattern
                    .score(text.slice(..), &mut self.matcher)
                    .map(|score| (i, score))
            })
            .collect();

        // Stable sort keeps original order among equal scores
        results.sort_by(|a, b| b.1.cmp(&a.1));

        results
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_empty_query() {
        let mut index = SearchIndex::new();
        let items = ["hello world", "goodbye world"];

        let results = index.search(&items, "");
        assert_eq!(results, vec![(0, u32::MAX), (1, u32::MAX)]);
    }

    #[test]
    fn test_search_basic() {
        let mut index = SearchIndex::new();
        let items = ["hello world", "goodbye world", "unrelated"];

        let results = index.search(&items, "hello");
        assert!(!results.is_empty());
        assert_eq!(results[0].0, 0);
        assert!(results.iter().all(|(i, _)| *i != 2));
    }

    #[test]
    fn test_search_smart_case() {
        let mut index = SearchIndex::new();
        let items = ["Hello World"];

        assert_eq!(index.search(&items, "hello").len(), 1);
        assert_eq!(index.search(&items, "Hello").len(), 1);
        assert_eq!(index.search(&items, "HELLO").len(), 0);
    }

    #[test]
    fn test_case_sensitive_mode() {
        let mut index = SearchIndex::new();
        index.toggle_mode();
        let items = ["Hello World"];

        assert_eq!(index.search(&items, "hello").len(), 0);
        assert_eq!(index.search(&items, "Hello").len(), 1);
    }

    #[test]
    fn test_toggle_mode() {
        let mut index = SearchIndex::new();
        assert_eq!(index.mode(), SearchMode::SmartCase);

        index.toggle_mode();
        assert_eq!(index.mode(), SearchMode::CaseSensitive);

        index.toggle_mode();
        assert_eq!(index.mode(), SearchMode::SmartCase);
    }
}
