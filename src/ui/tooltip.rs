use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::SearchBarTheme;

pub const SEARCH_GLYPH: &str = "⌕";
pub const CLOSE_GLYPH: &str = "✕";

/// Cells taken by an icon button (glyph plus one cell of padding each side)
pub const ICON_WIDTH: u16 = 3;

/// Render an icon button centered in `area`
pub fn render_icon(frame: &mut Frame, area: Rect, glyph: &str, style: Style) {
    let icon = Paragraph::new(Line::from(Span::styled(glyph, style)))
        .alignment(Alignment::Center);
    frame.render_widget(icon, area);
}

/// Where a tooltip was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipPlacement {
    pub label: Rect,
    pub arrow: Option<Position>,
}

/// Compute tooltip placement for an anchor inside `bounds`.
///
/// The tooltip goes below the anchor, or above it when there is no room.
/// Returns `None` when it cannot fit at all.
pub fn place_tooltip(anchor: Rect, label: &str, arrow: bool, bounds: Rect) -> Option<TooltipPlacement> {
    let width = (label.width() as u16 + 2).min(bounds.width);
    if width == 0 {
        return None;
    }
    let gap = u16::from(arrow);
    let needed = 1 + gap;

    let (label_y, arrow_y) = if anchor.bottom() + needed <= bounds.bottom() {
        (anchor.bottom() + gap, anchor.bottom())
    } else if anchor.y >= bounds.y + needed {
        (anchor.y - needed, anchor.y - 1)
    } else {
        return None;
    };

    let center = anchor.x + anchor.width / 2;
    let max_x = bounds.right().saturating_sub(width);
    let label_x = center.saturating_sub(width / 2).clamp(bounds.x, max_x);

    Some(TooltipPlacement {
        label: Rect::new(label_x, label_y, width, 1),
        arrow: arrow.then(|| Position::new(center, arrow_y)),
    })
}

/// Render a hover tooltip for `anchor`, with an optional arrow pointing at it
pub fn render_tooltip(
    frame: &mut Frame,
    anchor: Rect,
    label: &str,
    arrow: bool,
    theme: &SearchBarTheme,
) -> Option<TooltipPlacement> {
    let placement = place_tooltip(anchor, label, arrow, frame.area())?;

    frame.render_widget(Clear, placement.label);
    frame.render_widget(
        Paragraph::new(format!(" {} ", label)).style(theme.tooltip),
        placement.label,
    );

    if let Some(tip) = placement.arrow {
        let glyph = if tip.y >= anchor.bottom() { "▲" } else { "▼" };
        let area = Rect::new(tip.x, tip.y, 1, 1);
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(glyph).style(theme.tooltip_arrow), area);
    }

    Some(placement)
}
