use ratatui::prelude::*;

use super::Theme;

/// Styling scoped to the search bar
///
/// Derived from the ambient theme's palette and handed only to the search
/// bar renderer, so its border overrides never reach sibling widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBarTheme {
    /// Underline at rest
    pub border: Color,
    /// Underline while the pointer is over the field
    pub border_hover: Color,
    /// Underline while the field has focus
    pub border_focused: Color,
    pub label_focused: Color,
    pub text: Style,
    pub placeholder: Style,
    pub icon: Style,
    pub icon_hover: Style,
    pub tooltip: Style,
    pub tooltip_arrow: Style,
}

impl SearchBarTheme {
    pub fn derive(theme: &Theme) -> Self {
        let palette = &theme.palette;
        let focused = palette.graphics_default;

        SearchBarTheme {
            border: palette.border_strong,
            border_hover: palette.graphics_default,
            border_focused: focused,
            label_focused: focused,
            text: Style::default().fg(palette.text_default),
            placeholder: Style::default()
                .fg(palette.text_muted)
                .add_modifier(Modifier::ITALIC),
            icon: Style::default().fg(palette.icon_default),
            icon_hover: Style::default()
                .fg(palette.icon_default)
                .add_modifier(Modifier::BOLD),
            tooltip: Style::default().fg(palette.tooltip_fg).bg(palette.tooltip_bg),
            tooltip_arrow: Style::default().fg(palette.tooltip_bg),
        }
    }

    /// Underline color for the field's state (focus wins over hover)
    pub fn border_for(&self, focused: bool, hovered: bool) -> Color {
        if focused {
            self.border_focused
        } else if hovered {
            self.border_hover
        } else {
            self.border
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_uses_palette() {
        let theme = Theme::catppuccin_latte();
        let scoped = SearchBarTheme::derive(&theme);

        assert_eq!(scoped.border, theme.palette.border_strong);
        assert_eq!(scoped.border_hover, theme.palette.graphics_default);
        assert_eq!(scoped.border_focused, theme.palette.graphics_default);
        assert_eq!(scoped.label_focused, scoped.border_focused);
        assert_eq!(scoped.text.fg, Some(theme.palette.text_default));
        assert_eq!(scoped.icon.fg, Some(theme.palette.icon_default));
    }

    #[test]
    fn test_derive_leaves_ambient_theme_untouched() {
        let theme = Theme::tokyonight_night();
        let before = theme.clone();

        let _ = SearchBarTheme::derive(&theme);
        assert_eq!(theme, before);
    }

    #[test]
    fn test_border_precedence() {
        let scoped = SearchBarTheme::derive(&Theme::default());
        let mut distinct = scoped;
        distinct.border_hover = Color::Red;

        assert_eq!(distinct.border_for(false, false), distinct.border);
        assert_eq!(distinct.border_for(false, true), Color::Red);
        assert_eq!(distinct.border_for(true, true), distinct.border_focused);
        assert_eq!(distinct.border_for(true, false), distinct.border_focused);
    }
}
