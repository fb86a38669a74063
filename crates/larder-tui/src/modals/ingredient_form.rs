//! Ingredient add/edit form — an inventory picker plus a quantity field.
//!
//! The picker is populated by a one-shot inventory fetch issued when the
//! form opens. Until that lands the form shows a loading row; if the fetch
//! fails the form stays usable except for the picker.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use larder_api::types::{Ingredient, IngredientPayload};

use crate::action::{Action, InventoryOption};
use crate::theme;
use crate::widgets::{fmt::fmt_qty, overlay};

/// Inventory picker population state.
#[derive(Debug, Clone)]
pub enum OptionsState {
    Loading,
    Ready(Vec<InventoryOption>),
    Failed(String),
}

/// Which form field currently has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Picker,
    Quantity,
}

pub struct IngredientForm {
    recipe_id: u64,
    /// Set when editing an existing ingredient line.
    editing: Option<u64>,
    /// Display name of the picked inventory item.
    picked_name: String,
    picked_inventory_id: Option<u64>,
    quantity: String,
    options: OptionsState,
    option_idx: usize,
    field: FormField,
    saving: bool,
    alert: Option<String>,
}

impl IngredientForm {
    /// Blank form for adding an ingredient to `recipe_id`.
    pub fn create(recipe_id: u64) -> Self {
        Self {
            recipe_id,
            editing: None,
            picked_name: String::new(),
            picked_inventory_id: None,
            quantity: String::new(),
            options: OptionsState::Loading,
            option_idx: 0,
            field: FormField::Picker,
            saving: false,
            alert: None,
        }
    }

    /// Form prefilled from an existing ingredient line.
    pub fn edit(recipe_id: u64, ingredient: &Ingredient) -> Self {
        Self {
            recipe_id,
            editing: Some(ingredient.id),
            picked_name: ingredient.item.clone(),
            picked_inventory_id: ingredient.inventory_id,
            quantity: fmt_qty(ingredient.quantity),
            options: OptionsState::Loading,
            option_idx: 0,
            field: FormField::Quantity,
            saving: false,
            alert: None,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Picker options arrived. When editing, reposition the cursor on the
    /// currently associated inventory item.
    pub fn on_options_loaded(&mut self, options: Vec<InventoryOption>) {
        if let Some(current) = self.picked_inventory_id {
            if let Some(idx) = options.iter().position(|o| o.inventory_id == current) {
                self.option_idx = idx;
            }
        } else if let Some(idx) = options.iter().position(|o| o.name == self.picked_name) {
            // Older records carry no inventory link; fall back to the name.
            self.option_idx = idx;
            self.picked_inventory_id = Some(options[idx].inventory_id);
        }
        self.options = OptionsState::Ready(options);
    }

    pub fn on_options_failed(&mut self, message: String) {
        self.options = OptionsState::Failed(message);
    }

    /// A save round-trip failed; re-enable input and surface the message.
    pub fn on_save_failed(&mut self, message: &str) {
        self.saving = false;
        self.alert = Some(message.to_owned());
    }

    /// Handle a key while the form is open. Esc is handled by the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.saving {
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    FormField::Picker => FormField::Quantity,
                    FormField::Quantity => FormField::Picker,
                };
                None
            }
            KeyCode::Up | KeyCode::Char('k') if self.field == FormField::Picker => {
                self.option_idx = self.option_idx.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') if self.field == FormField::Picker => {
                if let OptionsState::Ready(options) = &self.options {
                    if self.option_idx + 1 < options.len() {
                        self.option_idx += 1;
                    }
                }
                None
            }
            KeyCode::Enter if self.field == FormField::Picker => {
                if let OptionsState::Ready(options) = &self.options {
                    if let Some(option) = options.get(self.option_idx) {
                        self.picked_inventory_id = Some(option.inventory_id);
                        self.picked_name = option.name.clone();
                        self.alert = None;
                        self.field = FormField::Quantity;
                    }
                }
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace if self.field == FormField::Quantity => {
                self.quantity.pop();
                self.alert = None;
                None
            }
            KeyCode::Char(c) if self.field == FormField::Quantity => {
                self.quantity.push(c);
                self.alert = None;
                None
            }
            _ => None,
        }
    }

    /// Validate and build the save action. All fields are required and the
    /// quantity must be numeric; invalid input never leaves the form.
    fn submit(&mut self) -> Option<Action> {
        let quantity_raw = self.quantity.trim();

        let Some(inventory_id) = self.picked_inventory_id else {
            self.alert = Some("All fields are required".into());
            return None;
        };
        if self.picked_name.trim().is_empty() || quantity_raw.is_empty() {
            self.alert = Some("All fields are required".into());
            return None;
        }

        let Ok(quantity) = quantity_raw.parse::<f64>() else {
            self.alert = Some("Quantity must be a number".into());
            return None;
        };
        if !quantity.is_finite() {
            self.alert = Some("Quantity must be a number".into());
            return None;
        }

        self.saving = true;
        Some(Action::SaveIngredient {
            id: self.editing,
            payload: IngredientPayload {
                recipe_id: self.recipe_id,
                inventory_id,
                quantity,
            },
        })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog = overlay::centered(area, 52, 16);
        overlay::clear_under(frame, dialog);

        let title = if self.editing.is_some() {
            " Edit Ingredient "
        } else {
            " Add Ingredient "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let layout = Layout::vertical([
            Constraint::Length(1), // picked item
            Constraint::Min(3),    // picker list
            Constraint::Length(1), // quantity
            Constraint::Length(1), // alert
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let picked = if self.picked_name.is_empty() {
            "(none)"
        } else {
            &self.picked_name
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Item: ", theme::field_label()),
                Span::styled(picked, Style::default().fg(theme::CREAM)),
            ])),
            layout[0],
        );

        self.render_picker(frame, layout[1]);

        let quantity_style = if self.field == FormField::Quantity {
            theme::field_active()
        } else {
            theme::field_label()
        };
        let cursor = if self.field == FormField::Quantity && !self.saving {
            "█"
        } else {
            ""
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Quantity: ", theme::field_label()),
                Span::styled(format!("{}{cursor}", self.quantity), quantity_style),
            ])),
            layout[2],
        );

        if let Some(alert) = &self.alert {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {alert}"), theme::alert())),
                layout[3],
            );
        } else if self.saving {
            frame.render_widget(
                Paragraph::new(Span::styled(" Saving\u{2026}", theme::key_hint())),
                layout[3],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Tab ", theme::key_hint_key()),
                Span::styled("field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("pick/save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])),
            layout[4],
        );
    }

    fn render_picker(&self, frame: &mut Frame, area: Rect) {
        let border = if self.field == FormField::Picker {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Inventory ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);

        match &self.options {
            OptionsState::Loading => {
                let inner = block.inner(area);
                frame.render_widget(block, area);
                frame.render_widget(
                    Paragraph::new(Span::styled(" Loading inventory\u{2026}", theme::key_hint())),
                    inner,
                );
            }
            OptionsState::Failed(message) => {
                let inner = block.inner(area);
                frame.render_widget(block, area);
                frame.render_widget(
                    Paragraph::new(Span::styled(format!(" {message}"), theme::alert())),
                    inner,
                );
            }
            OptionsState::Ready(options) => {
                let items: Vec<ListItem> = options
                    .iter()
                    .map(|o| {
                        ListItem::new(Line::from(vec![
                            Span::styled(o.name.clone(), theme::table_row()),
                            Span::styled(
                                format!("  ({} on hand)", o.quantity),
                                theme::key_hint(),
                            ),
                        ]))
                    })
                    .collect();

                let list = List::new(items)
                    .block(block)
                    .highlight_style(theme::table_selected())
                    .highlight_symbol("▸ ");

                let mut state = ListState::default();
                state.select(Some(self.option_idx));
                frame.render_stateful_widget(list, area, &mut state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut IngredientForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn options() -> Vec<InventoryOption> {
        vec![
            InventoryOption {
                inventory_id: 3,
                name: "Flour".into(),
                quantity: "10".into(),
            },
            InventoryOption {
                inventory_id: 4,
                name: "Sugar".into(),
                quantity: "2.5".into(),
            },
        ]
    }

    #[test]
    fn submit_requires_all_fields() {
        let mut form = IngredientForm::create(7);
        form.on_options_loaded(options());

        // No item picked, no quantity
        form.field = FormField::Quantity;
        assert!(form.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(form.alert.as_deref(), Some("All fields are required"));
    }

    #[test]
    fn submit_rejects_non_numeric_quantity() {
        let mut form = IngredientForm::create(7);
        form.on_options_loaded(options());
        form.handle_key(key(KeyCode::Enter)); // pick Flour, moves to quantity
        type_str(&mut form, "abc");

        assert!(form.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(form.alert.as_deref(), Some("Quantity must be a number"));
        assert!(!form.saving);
    }

    #[test]
    fn submit_builds_create_payload() {
        let mut form = IngredientForm::create(7);
        form.on_options_loaded(options());
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Enter)); // pick Sugar
        type_str(&mut form, "1.5");

        let action = form.handle_key(key(KeyCode::Enter));
        match action {
            Some(Action::SaveIngredient { id: None, payload }) => {
                assert_eq!(payload.recipe_id, 7);
                assert_eq!(payload.inventory_id, 4);
                assert!((payload.quantity - 1.5).abs() < f64::EPSILON);
            }
            other => panic!("expected SaveIngredient, got: {other:?}"),
        }
        assert!(form.saving);
    }

    #[test]
    fn edit_prefills_and_keeps_ingredient_id() {
        let ingredient = Ingredient {
            id: 42,
            item: "Flour".into(),
            quantity: 2.0,
            inventory_id: Some(3),
        };
        let mut form = IngredientForm::edit(7, &ingredient);
        form.on_options_loaded(options());

        assert_eq!(form.option_idx, 0); // Flour
        assert_eq!(form.quantity, "2");

        let action = form.handle_key(key(KeyCode::Enter));
        match action {
            Some(Action::SaveIngredient { id: Some(42), payload }) => {
                assert_eq!(payload.inventory_id, 3);
            }
            other => panic!("expected SaveIngredient for id 42, got: {other:?}"),
        }
    }

    #[test]
    fn edit_without_inventory_link_matches_by_name() {
        let ingredient = Ingredient {
            id: 43,
            item: "Sugar".into(),
            quantity: 1.0,
            inventory_id: None,
        };
        let mut form = IngredientForm::edit(7, &ingredient);
        form.on_options_loaded(options());

        assert_eq!(form.option_idx, 1);
        assert_eq!(form.picked_inventory_id, Some(4));
    }

    #[test]
    fn save_failure_reopens_input() {
        let mut form = IngredientForm::create(7);
        form.on_options_loaded(options());
        form.handle_key(key(KeyCode::Enter));
        type_str(&mut form, "3");
        form.handle_key(key(KeyCode::Enter));
        assert!(form.saving);

        // While saving, input is ignored
        assert!(form.handle_key(key(KeyCode::Char('9'))).is_none());
        assert_eq!(form.quantity, "3");

        form.on_save_failed("SKU already in use");
        assert!(!form.saving);
        assert_eq!(form.alert.as_deref(), Some("SKU already in use"));
    }
}
