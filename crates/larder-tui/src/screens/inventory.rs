//! Inventory screen — read-only paginated table of stocked items.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use tokio::sync::mpsc::UnboundedSender;

use larder_api::types::{InventoryItem, PageMeta, SortOrder};

use crate::action::{Action, InventoryQuery};
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt;

const ROWS_PER_PAGE: [usize; 3] = [10, 25, 50];

pub struct InventoryScreen {
    focused: bool,

    items: Vec<InventoryItem>,
    meta: PageMeta,
    /// 0-based page cursor; the wire query is 1-based.
    page: usize,
    rows_per_page: usize,
    search_query: String,
    sort_order: SortOrder,
    loading: bool,
    selected: usize,
    throbber: throbber_widgets_tui::ThrobberState,
}

impl InventoryScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            items: Vec::new(),
            meta: PageMeta::default(),
            page: 0,
            rows_per_page: ROWS_PER_PAGE[0],
            search_query: String::new(),
            sort_order: SortOrder::Asc,
            loading: false,
            selected: 0,
            throbber: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn query(&self) -> InventoryQuery {
        InventoryQuery {
            page: u32::try_from(self.page).unwrap_or(0) + 1,
            per_page: u32::try_from(self.rows_per_page).unwrap_or(10),
            search: self.search_query.trim().to_owned(),
            order: self.sort_order,
        }
    }

    fn reload(&mut self) -> Action {
        self.loading = true;
        Action::LoadInventory(self.query())
    }

    /// A unit string when the service includes one in the extra fields.
    fn unit_of(item: &InventoryItem) -> String {
        item.extra
            .get("unit")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_owned()
    }
}

impl Component for InventoryScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        let initial = self.reload();
        action_tx.send(initial)?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') => {
                self.selected = self.items.len().saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Char('n' | 'l') => {
                let total = usize::try_from(self.meta.total_pages).unwrap_or(0);
                if self.page + 1 < total {
                    self.page += 1;
                    self.selected = 0;
                    Some(self.reload())
                } else {
                    None
                }
            }
            KeyCode::Left | KeyCode::Char('p' | 'h') => {
                if self.page > 0 {
                    self.page -= 1;
                    self.selected = 0;
                    Some(self.reload())
                } else {
                    None
                }
            }
            KeyCode::Char('r') => {
                let idx = ROWS_PER_PAGE
                    .iter()
                    .position(|&n| n == self.rows_per_page)
                    .unwrap_or(0);
                self.rows_per_page = ROWS_PER_PAGE[(idx + 1) % ROWS_PER_PAGE.len()];
                self.page = 0;
                self.selected = 0;
                Some(self.reload())
            }
            KeyCode::Char('s') => {
                self.sort_order = self.sort_order.toggled();
                Some(self.reload())
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.loading {
                    self.throbber.calc_next();
                }
            }

            Action::InventoryLoaded(page) => {
                self.items = page.data.clone();
                self.meta = page.meta;
                self.loading = false;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
            }

            Action::InventoryLoadFailed(_) => {
                self.loading = false;
            }

            Action::SearchSubmit(query) => {
                if self.focused {
                    self.search_query = query.trim().to_owned();
                    self.page = 0;
                    self.selected = 0;
                    return Ok(Some(self.reload()));
                }
            }

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

        let total = self.meta.total_data.max(0);
        let mut title = format!(" Inventory ({total}) ");
        if !self.search_query.is_empty() {
            title = format!(" Inventory ({total}) · search: {} ", self.search_query);
        }

        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);

        if self.loading && self.items.is_empty() {
            let inner = block.inner(layout[0]);
            frame.render_widget(block, layout[0]);
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Loading inventory\u{2026}")
                .style(theme::key_hint())
                .throbber_style(ratatui::style::Style::default().fg(theme::COPPER));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber.clone());
        } else if self.items.is_empty() {
            let inner = block.inner(layout[0]);
            frame.render_widget(block, layout[0]);
            frame.render_widget(
                Paragraph::new(Span::styled(" No inventory items", theme::key_hint())),
                inner,
            );
        } else {
            let arrow = match self.sort_order {
                SortOrder::Asc => "▲",
                SortOrder::Desc => "▼",
            };
            let header = Row::new(vec![
                Cell::from(format!("Item {arrow}")),
                Cell::from("On hand"),
                Cell::from("Unit"),
            ])
            .style(theme::table_header());

            let rows: Vec<Row> = self
                .items
                .iter()
                .map(|i| {
                    Row::new(vec![
                        Cell::from(i.item.clone()),
                        Cell::from(fmt::fmt_qty(i.qty)),
                        Cell::from(Self::unit_of(i)),
                    ])
                    .style(theme::table_row())
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Min(24),
                    Constraint::Length(10),
                    Constraint::Length(8),
                ],
            )
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("▸ ");

            let mut state = TableState::default();
            state.select(Some(self.selected));
            frame.render_stateful_widget(table, layout[0], &mut state);
        }

        let total_pages = self.meta.total_pages.max(0);
        let footer = Line::from(vec![
            Span::styled(
                format!(" Page {}/{total_pages} · rows {} ", self.page + 1, self.rows_per_page),
                theme::key_hint(),
            ),
            Span::styled("│ ", theme::key_hint()),
            Span::styled("s", theme::key_hint_key()),
            Span::styled("ort  ", theme::key_hint()),
            Span::styled("r", theme::key_hint_key()),
            Span::styled("ows  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(footer), layout[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "inventory"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use larder_api::types::Paged;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_screen() -> InventoryScreen {
        let mut screen = InventoryScreen::new();
        screen.set_focused(true);
        let page = Paged {
            data: vec![
                InventoryItem {
                    id: 1,
                    item: "Flour".into(),
                    qty: 10.0,
                    extra: HashMap::new(),
                },
                InventoryItem {
                    id: 2,
                    item: "Sugar".into(),
                    qty: 2.5,
                    extra: HashMap::new(),
                },
            ],
            meta: PageMeta {
                total_data: 30,
                total_pages: 3,
                current_page: 1,
            },
        };
        screen.update(&Action::InventoryLoaded(page)).unwrap();
        screen
    }

    #[test]
    fn query_is_one_based() {
        let mut screen = loaded_screen();
        screen.page = 1;
        let q = screen.query();
        assert_eq!(q.page, 2);
        assert_eq!(q.per_page, 10);
    }

    #[test]
    fn pagination_clamps_to_bounds() {
        let mut screen = loaded_screen();
        assert!(screen.handle_key_event(key(KeyCode::Char('p'))).unwrap().is_none());
        assert!(screen.handle_key_event(key(KeyCode::Char('n'))).unwrap().is_some());
        assert_eq!(screen.page, 1);
    }

    #[test]
    fn search_submit_resets_page() {
        let mut screen = loaded_screen();
        screen.page = 2;
        let follow = screen.update(&Action::SearchSubmit("flour".into())).unwrap();
        match follow {
            Some(Action::LoadInventory(q)) => {
                assert_eq!(q.page, 1);
                assert_eq!(q.search, "flour");
            }
            other => panic!("expected LoadInventory, got: {other:?}"),
        }
    }
}
