//! Recipe detail modal — recipe fields plus its ingredient table.
//!
//! The modal is a small state machine: it opens in `Loading` and only shows
//! content once the detail fetch lands. Any ingredient mutation triggers a
//! full detail re-fetch rather than a local patch, so the table always
//! reflects what the service stored.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use larder_api::types::RecipeDetail;

use crate::action::{Action, ConfirmAction};
use crate::modals::ingredient_form::IngredientForm;
use crate::theme;
use crate::widgets::{fmt, overlay};

#[derive(Debug, Clone, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading,
    Open(RecipeDetail),
}

#[derive(Default)]
pub struct DetailModal {
    state: DetailState,
    selected: usize,
    /// Nested add/edit ingredient form, rendered over the detail view.
    pub form: Option<IngredientForm>,
}

impl DetailModal {
    pub fn is_open(&self) -> bool {
        !matches!(self.state, DetailState::Closed)
    }

    /// Begin opening: show the loading state until the fetch lands.
    pub fn open_loading(&mut self) {
        self.state = DetailState::Loading;
        self.selected = 0;
        self.form = None;
    }

    pub fn close(&mut self) {
        self.state = DetailState::Closed;
        self.form = None;
    }

    /// The id of the recipe being viewed, if any.
    #[allow(dead_code)]
    pub fn recipe_id(&self) -> Option<u64> {
        match &self.state {
            DetailState::Open(detail) => Some(detail.recipe.id),
            DetailState::Closed | DetailState::Loading => None,
        }
    }

    /// A detail fetch landed. Ignored when the modal is closed, so a stale
    /// refresh can never pop the dialog back open.
    pub fn on_loaded(&mut self, detail: &RecipeDetail) {
        match self.state {
            DetailState::Closed => {}
            DetailState::Loading | DetailState::Open(_) => {
                self.selected = self
                    .selected
                    .min(detail.ingredients.len().saturating_sub(1));
                self.state = DetailState::Open(detail.clone());
            }
        }
    }

    /// The initial fetch failed; leave the view unopened.
    pub fn on_load_failed(&mut self) {
        if matches!(self.state, DetailState::Loading) {
            self.state = DetailState::Closed;
        }
    }

    /// Handle a key while the detail view (not the nested form) has focus.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let DetailState::Open(detail) = &self.state else {
            // Loading: only Esc does anything, and the caller handles it.
            if key.code == KeyCode::Esc {
                self.close();
            }
            return None;
        };

        match key.code {
            KeyCode::Esc => {
                self.close();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < detail.ingredients.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('a') => {
                self.form = Some(IngredientForm::create(detail.recipe.id));
                Some(Action::LoadInventoryOptions)
            }
            KeyCode::Char('e') => {
                let ingredient = detail.ingredients.get(self.selected)?;
                self.form = Some(IngredientForm::edit(detail.recipe.id, ingredient));
                Some(Action::LoadInventoryOptions)
            }
            KeyCode::Char('d') => {
                let ingredient = detail.ingredients.get(self.selected)?;
                Some(Action::ShowConfirm(ConfirmAction::DeleteIngredient {
                    id: ingredient.id,
                    recipe_id: detail.recipe.id,
                    item: ingredient.item.clone(),
                }))
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_open() {
            return;
        }

        let dialog = overlay::centered(area, 64, 20);
        overlay::clear_under(frame, dialog);

        let block = Block::default()
            .title(" Recipe ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        match &self.state {
            DetailState::Closed => {}
            DetailState::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled(" Loading\u{2026}", theme::key_hint())),
                    inner,
                );
            }
            DetailState::Open(detail) => {
                let layout = Layout::vertical([
                    Constraint::Length(3), // recipe fields
                    Constraint::Min(3),    // ingredient table
                    Constraint::Length(1), // hints
                ])
                .split(inner);

                let fields = vec![
                    Line::from(vec![
                        Span::styled(" Name  ", theme::field_label()),
                        Span::styled(detail.recipe.name.clone(), theme::title_style()),
                    ]),
                    Line::from(vec![
                        Span::styled(" SKU   ", theme::field_label()),
                        Span::styled(detail.recipe.sku.clone(), theme::table_row()),
                    ]),
                    Line::from(vec![
                        Span::styled(" Cost  ", theme::field_label()),
                        Span::styled(fmt::fmt_money(detail.recipe.cogs), theme::table_row()),
                    ]),
                ];
                frame.render_widget(Paragraph::new(fields), layout[0]);

                self.render_ingredients(frame, layout[1], detail);

                frame.render_widget(
                    Paragraph::new(Line::from(vec![
                        Span::styled(" a ", theme::key_hint_key()),
                        Span::styled("add  ", theme::key_hint()),
                        Span::styled("e ", theme::key_hint_key()),
                        Span::styled("edit  ", theme::key_hint()),
                        Span::styled("d ", theme::key_hint_key()),
                        Span::styled("delete  ", theme::key_hint()),
                        Span::styled("Esc ", theme::key_hint_key()),
                        Span::styled("close", theme::key_hint()),
                    ])),
                    layout[2],
                );
            }
        }

        if let Some(form) = &self.form {
            form.render(frame, area);
        }
    }

    fn render_ingredients(&self, frame: &mut Frame, area: Rect, detail: &RecipeDetail) {
        let block = Block::default()
            .title(format!(" Ingredients ({}) ", detail.ingredients.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        if detail.ingredients.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled(" No ingredients yet", theme::key_hint())),
                inner,
            );
            return;
        }

        let header = Row::new(vec![Cell::from("Item"), Cell::from("Quantity")])
            .style(theme::table_header());

        let rows: Vec<Row> = detail
            .ingredients
            .iter()
            .map(|i| {
                Row::new(vec![
                    Cell::from(i.item.clone()),
                    Cell::from(fmt::fmt_qty(i.quantity)),
                ])
                .style(theme::table_row())
            })
            .collect();

        let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(10)])
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("▸ ");

        let mut state = TableState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use larder_api::types::{Ingredient, RecipeItem};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn detail() -> RecipeDetail {
        RecipeDetail {
            recipe: RecipeItem {
                id: 7,
                name: "Chicken Soup".into(),
                sku: "SOUP-001".into(),
                cogs: 12.5,
            },
            ingredients: vec![
                Ingredient {
                    id: 41,
                    item: "Chicken Breast".into(),
                    quantity: 0.5,
                    inventory_id: Some(1),
                },
                Ingredient {
                    id: 42,
                    item: "Carrot".into(),
                    quantity: 2.0,
                    inventory_id: Some(2),
                },
            ],
        }
    }

    #[test]
    fn opens_through_loading_state() {
        let mut modal = DetailModal::default();
        assert!(!modal.is_open());

        modal.open_loading();
        assert!(modal.is_open());
        assert!(modal.recipe_id().is_none());

        modal.on_loaded(&detail());
        assert_eq!(modal.recipe_id(), Some(7));
    }

    #[test]
    fn failed_initial_load_leaves_modal_closed() {
        let mut modal = DetailModal::default();
        modal.open_loading();
        modal.on_load_failed();
        assert!(!modal.is_open());
    }

    #[test]
    fn stale_refresh_never_reopens_closed_modal() {
        let mut modal = DetailModal::default();
        modal.open_loading();
        modal.on_loaded(&detail());
        modal.close();

        // A refresh issued before the close lands afterwards
        modal.on_loaded(&detail());
        assert!(!modal.is_open());
    }

    #[test]
    fn refresh_clamps_selection() {
        let mut modal = DetailModal::default();
        modal.open_loading();
        modal.on_loaded(&detail());
        modal.handle_key(key(KeyCode::Down));
        assert_eq!(modal.selected, 1);

        // Re-fetch after a delete shrank the table
        let mut shrunk = detail();
        shrunk.ingredients.truncate(1);
        modal.on_loaded(&shrunk);
        assert_eq!(modal.selected, 0);
    }

    #[test]
    fn delete_key_requests_confirmation() {
        let mut modal = DetailModal::default();
        modal.open_loading();
        modal.on_loaded(&detail());
        modal.handle_key(key(KeyCode::Down));

        let action = modal.handle_key(key(KeyCode::Char('d')));
        match action {
            Some(Action::ShowConfirm(ConfirmAction::DeleteIngredient {
                id,
                recipe_id,
                item,
            })) => {
                assert_eq!(id, 42);
                assert_eq!(recipe_id, 7);
                assert_eq!(item, "Carrot");
            }
            other => panic!("expected DeleteIngredient confirm, got: {other:?}"),
        }
    }

    #[test]
    fn add_key_opens_form_and_fetches_options() {
        let mut modal = DetailModal::default();
        modal.open_loading();
        modal.on_loaded(&detail());

        let action = modal.handle_key(key(KeyCode::Char('a')));
        assert!(matches!(action, Some(Action::LoadInventoryOptions)));
        assert!(modal.form.is_some());
    }
}
