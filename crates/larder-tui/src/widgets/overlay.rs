//! Centered overlay placement shared by the modal dialogs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::theme;

/// A rect of at most `width` x `height`, centered within `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

/// Paint the overlay background so the screen underneath doesn't bleed through.
pub fn clear_under(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_fits_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let dialog = centered(area, 60, 20);
        assert!(dialog.width <= area.width);
        assert!(dialog.height <= area.height);
        assert_eq!(dialog.width, 36);
    }

    #[test]
    fn centered_is_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let dialog = centered(area, 40, 10);
        assert_eq!(dialog.x, 20);
        assert_eq!(dialog.y, 7);
    }
}
