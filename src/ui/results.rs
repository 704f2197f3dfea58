use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use super::Theme;

/// What the results panel shows
pub struct ResultsRenderContext<'a> {
    pub items: &'a [&'a str],
    pub total: usize,
    pub query: &'a str,
    pub theme: &'a Theme,
}

/// Render the filtered results list with a match counter in the title.
/// `state` carries the selection in and the scroll offset out.
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    ctx: ResultsRenderContext,
    state: &mut ListState,
) {
    let theme = ctx.theme;

    let counter = if ctx.query.is_empty() {
        format!(" {} items ", ctx.total)
    } else {
        format!(" {} / {} ", ctx.items.len(), ctx.total)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.results_border)
        .title(Line::from(Span::styled(" Results ", theme.header_title)))
        .title(Line::from(Span::styled(counter, theme.results_count)).right_aligned())
        .padding(Padding::horizontal(1));

    let rows: Vec<ListItem> = ctx
        .items
        .iter()
        .map(|item| ListItem::new(Line::from(Span::styled(*item, theme.results_text))))
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(theme.results_selected)
        .highlight_symbol("▌ ");

    frame.render_stateful_widget(list, area, state);
}
