use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::time::Instant;

use super::SearchBarTheme;
use super::tooltip::{CLOSE_GLYPH, ICON_WIDTH, SEARCH_GLYPH, render_icon, render_tooltip};
use crate::search_bar::{Hover, InputStyle, SearchBar, SearchBarLayout};

/// Render the expandable search bar right-aligned in `area`.
///
/// The text field grows leftwards from the toggle icon. It needs two rows
/// for its underline; with a single row it is drawn without one.
pub fn render_search_bar(
    frame: &mut Frame,
    area: Rect,
    bar: &mut SearchBar,
    expanded: bool,
    theme: &SearchBarTheme,
    now: Instant,
) -> SearchBarLayout {
    bar.sync(expanded, now);

    let icon_width = ICON_WIDTH.min(area.width);
    let icon = Rect {
        x: area.right().saturating_sub(icon_width),
        y: area.y,
        width: icon_width,
        height: area.height.min(1),
    };

    let style = bar.rendered_style(now);
    let input_width = style.width.min(area.width - icon_width);
    let input = Rect {
        x: icon.x - input_width,
        y: area.y,
        width: input_width,
        height: area.height.min(2),
    };

    let layout = SearchBarLayout {
        root: Rect {
            x: input.x,
            y: area.y,
            width: input_width + icon_width,
            height: input.height.max(icon.height),
        },
        input,
        icon,
    };
    bar.set_layout(layout);

    if style.is_visible() && !input.is_empty() {
        render_input(frame, input, bar, style, theme);
    }

    let (glyph, label) = if expanded {
        (CLOSE_GLYPH, bar.options().close_label.as_str())
    } else {
        (SEARCH_GLYPH, bar.options().search_label.as_str())
    };
    let icon_hovered = bar.hover() == Hover::Icon;
    let icon_style = if icon_hovered { theme.icon_hover } else { theme.icon };
    if !icon.is_empty() {
        render_icon(frame, icon, glyph, icon_style);
    }
    if icon_hovered {
        render_tooltip(frame, icon, label, true, theme);
    }

    layout
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    bar: &SearchBar,
    style: InputStyle,
    theme: &SearchBarTheme,
) {
    let focused = bar.is_focused();
    let border = theme.border_for(focused, bar.hover() == Hover::Input);

    let mut block = Block::default();
    if area.height >= 2 {
        block = block
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(border));
    }
    let inner = block.inner(area);

    let input = bar.input();
    let scroll = input.visual_scroll(inner.width as usize);
    let line = if input.value().is_empty() {
        let placeholder = bar.options().placeholder.as_deref().unwrap_or("");
        let placeholder_style = if focused {
            theme.placeholder.fg(theme.label_focused)
        } else {
            theme.placeholder
        };
        Line::from(Span::styled(placeholder, placeholder_style))
    } else {
        Line::from(Span::styled(input.value(), theme.text))
    };

    // Fading in or out
    let partial = style.opacity < 1.0;
    let mut paragraph = Paragraph::new(line).block(block);
    if !input.value().is_empty() {
        paragraph = paragraph.scroll((0, scroll as u16));
    }
    if partial {
        paragraph = paragraph.style(Style::default().add_modifier(Modifier::DIM));
    }
    frame.render_widget(paragraph, area);

    if focused && !partial && !inner.is_empty() {
        let offset = (input.visual_cursor().max(scroll) - scroll) as u16;
        let x = (inner.x + offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_bar::{SearchBarOptions, SearchHost};
    use crate::ui::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{Event, KeyModifiers, MouseEvent, MouseEventKind};
    use std::time::Duration;

    struct Host {
        expanded: bool,
    }

    impl SearchHost for Host {
        fn expanded(&self) -> bool {
            self.expanded
        }

        fn set_expanded(&mut self, expanded: bool) {
            self.expanded = expanded;
        }

        fn on_search(&mut self, _text: &str) {}
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 2,
    };

    fn bar() -> SearchBar {
        SearchBar::new(SearchBarOptions {
            placeholder: Some("Filter".to_string()),
            expanded_width: 12,
            ..SearchBarOptions::default()
        })
    }

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        bar: &mut SearchBar,
        expanded: bool,
        now: Instant,
    ) -> SearchBarLayout {
        let theme = SearchBarTheme::derive(&Theme::default());
        let mut layout = None;
        terminal
            .draw(|frame| {
                layout = Some(render_search_bar(frame, AREA, bar, expanded, &theme, now));
            })
            .unwrap();
        layout.unwrap()
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_collapsed_renders_only_icon() {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut bar = bar();

        let layout = draw(&mut terminal, &mut bar, false, Instant::now());
        assert_eq!(layout.input.width, 0);
        assert_eq!(layout.icon, Rect::new(37, 0, 3, 1));
        assert!(bar.is_mounted());
        assert_eq!(row(&terminal, 0).trim(), SEARCH_GLYPH);
        assert!(row(&terminal, 1).trim().is_empty());
    }

    #[test]
    fn test_expanded_renders_field_and_close_icon() {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut bar = bar();
        let mut host = Host { expanded: false };
        let start = Instant::now();

        draw(&mut terminal, &mut bar, false, start);
        bar.click_search_icon(&mut host, start);
        let layout = draw(&mut terminal, &mut bar, true, start + Duration::from_millis(300));

        assert_eq!(layout.input, Rect::new(25, 0, 12, 2));
        let top = row(&terminal, 0);
        assert!(top.contains("Filter"));
        assert!(top.contains(CLOSE_GLYPH));
        assert!(row(&terminal, 1).contains("─"));
    }

    #[test]
    fn test_focused_underline_uses_focus_color() {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut bar = bar();
        let mut host = Host { expanded: false };
        let start = Instant::now();
        let theme = SearchBarTheme::derive(&Theme::default());

        draw(&mut terminal, &mut bar, false, start);
        bar.click_search_icon(&mut host, start);
        draw(&mut terminal, &mut bar, true, start + Duration::from_millis(300));
        assert_eq!(terminal.backend().buffer()[(26, 1)].fg, theme.border);

        assert!(bar.tick(&mut host, start + Duration::from_millis(300)));
        draw(&mut terminal, &mut bar, true, start + Duration::from_millis(320));
        assert_eq!(terminal.backend().buffer()[(26, 1)].fg, theme.border_focused);
    }

    #[test]
    fn test_hovered_icon_shows_tooltip() {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut bar = bar();
        let mut host = Host { expanded: false };
        let now = Instant::now();

        let layout = draw(&mut terminal, &mut bar, false, now);
        let hover = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: layout.icon.x + 1,
            row: layout.icon.y,
            modifiers: KeyModifiers::NONE,
        });
        bar.handle_event(&hover, &mut host, now);
        draw(&mut terminal, &mut bar, false, now);

        assert!(row(&terminal, 1).contains('▲'));
        assert!(row(&terminal, 2).contains("Search"));
    }

    #[test]
    fn test_narrow_area_clamps_field() {
        let mut terminal = Terminal::new(TestBackend::new(8, 2)).unwrap();
        let mut bar = bar();
        let theme = SearchBarTheme::derive(&Theme::default());
        let area = Rect::new(0, 0, 8, 2);

        let mut layout = None;
        terminal
            .draw(|frame| {
                layout = Some(render_search_bar(frame, area, &mut bar, true, &theme, Instant::now()));
            })
            .unwrap();

        let layout = layout.unwrap();
        assert!(layout.root.width <= 8);
        assert_eq!(layout.icon, Rect::new(5, 0, 3, 1));
    }
}
