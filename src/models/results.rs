use ratatui::crossterm::event::{KeyCode, KeyEvent};

use super::search_index::{SearchIndex, SearchMode};
use crate::search_bar::SearchHost;

/// Filterable list of rows, and owner of the search bar's expanded flag
pub struct ResultsView {
    items: Vec<String>,
    /// Indices into `items`, best match first
    visible: Vec<usize>,
    query: String,
    selected: usize,
    expanded: bool,
    index: SearchIndex,
    /// Row chosen with Enter
    pub picked: Option<String>,
}

impl ResultsView {
    pub fn new(items: Vec<String>, expanded: bool) -> Self {
        let visible = (0..items.len()).collect();
        ResultsView {
            items,
            visible,
            query: String::new(),
            selected: 0,
            expanded,
            index: SearchIndex::new(),
            picked: None,
        }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Visible rows, in display order
    pub fn visible_items(&self) -> Vec<&str> {
        self.visible.iter().map(|&i| self.items[i].as_str()).collect()
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.visible
            .get(self.selected)
            .map(|&i| self.items[i].as_str())
    }

    pub fn move_down(&mut self, count: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = (self.selected + count).min(self.visible.len() - 1);
    }

    pub fn move_up(&mut self, count: usize) {
        self.selected = self.selected.saturating_sub(count);
    }

    /// Remember the highlighted row as the user's choice
    pub fn pick(&mut self) -> bool {
        match self.selected_item() {
            Some(item) => {
                log::info!("Picked: {}", item);
                self.picked = Some(item.to_string());
                true
            }
            None => false,
        }
    }

    /// Select the visible row at `offset` from the top of the list
    pub fn select_visible(&mut self, offset: usize) {
        if offset < self.visible.len() {
            self.selected = offset;
        }
    }

    pub fn search_mode(&self) -> SearchMode {
        self.index.mode()
    }

    /// Switch case sensitivity and rerun the current filter
    pub fn toggle_search_mode(&mut self) {
        self.index.toggle_mode();
        let query = std::mem::take(&mut self.query);
        self.apply_filter(&query);
        log::info!(
            "Search mode: {}",
            match self.index.mode() {
                SearchMode::SmartCase => "smart case",
                SearchMode::CaseSensitive => "case sensitive",
            }
        );
    }

    fn apply_filter(&mut self, query: &str) {
        self.query = query.to_string();
        self.visible = self
            .index
            .search(&self.items, query)
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }
}

impl SearchHost for ResultsView {
    fn expanded(&self) -> bool {
        self.expanded
    }

    fn set_expanded(&mut self, expanded: bool) {
        log::debug!("Search bar {}", if expanded { "expanded" } else { "collapsed" });
        self.expanded = expanded;
        // Collapsing always empties the field
        if !expanded && !self.query.is_empty() {
            self.apply_filter("");
        }
    }

    fn on_search(&mut self, text: &str) {
        self.apply_filter(text);
        log::debug!("Filter '{}' matches {} of {}", text, self.visible.len(), self.items.len());
    }

    fn on_clear(&mut self) {
        self.apply_filter("");
        log::info!("Search cleared");
    }

    fn on_key_down(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Up => self.move_up(1),
            KeyCode::Down => self.move_down(1),
            KeyCode::Enter => {
                self.pick();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn view() -> ResultsView {
        ResultsView::new(
            vec!["apple".to_string(), "banana".to_string(), "cherry".to_string()],
            false,
        )
    }

    #[test]
    fn test_on_search_filters_and_resets_selection() {
        let mut view = view();
        view.move_down(2);

        view.on_search("an");
        assert_eq!(view.visible_items(), vec!["banana"]);
        assert_eq!(view.selected(), 0);
        assert_eq!(view.query(), "an");
    }

    #[test]
    fn test_on_clear_restores_all_rows() {
        let mut view = view();
        view.on_search("zzz");
        assert!(view.visible_items().is_empty());

        view.on_clear();
        assert_eq!(view.visible_items().len(), 3);
        assert_eq!(view.query(), "");
    }

    #[test]
    fn test_collapse_drops_filter_quietly() {
        let mut view = view();
        view.set_expanded(true);
        view.on_search("ch");
        assert_eq!(view.visible_items(), vec!["cherry"]);

        view.set_expanded(false);
        assert_eq!(view.query(), "");
        assert_eq!(view.visible_items().len(), 3);
    }

    #[test]
    fn test_toggle_search_mode_refilters() {
        let mut view = ResultsView::new(
            vec!["Apple".to_string(), "apple pie".to_string()],
            true,
        );
        view.on_search("apple");
        assert_eq!(view.visible_items().len(), 2);

        view.toggle_search_mode();
        assert_eq!(view.search_mode(), SearchMode::CaseSensitive);
        assert_eq!(view.query(), "apple");
        assert_eq!(view.visible_items(), vec!["apple pie"]);

        view.toggle_search_mode();
        assert_eq!(view.search_mode(), SearchMode::SmartCase);
        assert_eq!(view.visible_items().len(), 2);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut view = view();
        view.move_down(10);
        assert_eq!(view.selected_item(), Some("cherry"));
        view.move_up(10);
        assert_eq!(view.selected_item(), Some("apple"));
    }

    #[test]
    fn test_enter_picks_highlighted_row() {
        let mut view = view();
        view.on_key_down(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        view.on_key_down(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(view.picked.as_deref(), Some("banana"));
    }

    #[test]
    fn test_pick_with_no_rows() {
        let mut view = view();
        view.on_search("zzz");
        assert!(!view.pick());
        assert_eq!(view.picked, None);
    }
}
