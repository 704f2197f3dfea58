use log::Level;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::logging::FlashMessage;

const BROWSE_HINTS: &[(&[&str], &str)] = &[
    (&["/"], "search"),
    (&["j", "k"], "move"),
    (&["Enter"], "pick"),
    (&["^T"], "case"),
    (&["q"], "quit"),
];

const EXPANDED_HINTS: &[(&[&str], &str)] = &[
    (&["/"], "collapse"),
    (&["Esc"], "close"),
    (&["j", "k"], "move"),
    (&["Enter"], "pick"),
];

const TYPING_HINTS: &[(&[&str], &str)] = &[
    (&["↑", "↓"], "move"),
    (&["Esc"], "leave field"),
    (&["Enter"], "pick"),
];

/// Which set of hints applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMode {
    Browse,
    Expanded,
    Typing,
}

/// Render keyboard hints bar, with the newest flash message on the right
pub fn render_keyboard_hints(
    frame: &mut Frame,
    area: Rect,
    mode: HintMode,
    flash: Option<&FlashMessage>,
    theme: &Theme,
) {
    let hint_data = match mode {
        HintMode::Browse => BROWSE_HINTS,
        HintMode::Expanded => EXPANDED_HINTS,
        HintMode::Typing => TYPING_HINTS,
    };

    let mut hints = Vec::new();
    for (keys, description) in hint_data {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("/", theme.status_desc.add_modifier(Modifier::DIM)));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }
        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }

    let bar_style = theme.status_desc.bg(theme.status_bar_bg);
    frame.render_widget(Paragraph::new(Line::from(hints)).style(bar_style), area);

    if let Some(msg) = flash {
        let style = match msg.level {
            Level::Error => theme.flash_error,
            Level::Warn => theme.flash_warn,
            _ => theme.flash_info,
        };
        let text = Line::from(Span::styled(format!("{} ", msg.message), style)).right_aligned();
        frame.render_widget(Paragraph::new(text).style(bar_style), area);
    }
}
