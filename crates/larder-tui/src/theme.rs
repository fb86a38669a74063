//! Copper Kitchen palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const COPPER: Color = Color::Rgb(214, 126, 77); // #d67e4d
pub const SAGE: Color = Color::Rgb(156, 199, 140); // #9cc78c
pub const CREAM: Color = Color::Rgb(235, 226, 209); // #ebe2d1
pub const HONEY: Color = Color::Rgb(240, 195, 102); // #f0c366
pub const PAPRIKA: Color = Color::Rgb(226, 91, 69); // #e25b45

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(199, 194, 183); // #c7c2b7
pub const BORDER_GRAY: Color = Color::Rgb(110, 118, 135); // #6e7687
pub const BG_HIGHLIGHT: Color = Color::Rgb(45, 40, 35); // #2d2823
pub const BG_DARK: Color = Color::Rgb(26, 23, 20); // #1a1714

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(CREAM).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(COPPER)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(CREAM)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(COPPER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(COPPER).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(CREAM).add_modifier(Modifier::BOLD)
}

/// Form field label.
pub fn field_label() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Form field value with input focus.
pub fn field_active() -> Style {
    Style::default().fg(COPPER).add_modifier(Modifier::BOLD)
}

/// Inline validation message.
pub fn alert() -> Style {
    Style::default().fg(PAPRIKA)
}
