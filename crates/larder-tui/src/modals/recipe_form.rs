//! Recipe add/edit form — name, SKU, and cost fields.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use larder_api::types::{RecipeDraft, RecipeItem};

use crate::action::Action;
use crate::theme;
use crate::widgets::overlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Sku,
    Cogs,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Sku,
            Self::Sku => Self::Cogs,
            Self::Cogs => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Cogs,
            Self::Sku => Self::Name,
            Self::Cogs => Self::Sku,
        }
    }
}

pub struct RecipeForm {
    /// Set when editing an existing recipe.
    editing: Option<u64>,
    name: String,
    sku: String,
    cogs: String,
    field: FormField,
    saving: bool,
    alert: Option<String>,
}

impl RecipeForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            name: String::new(),
            sku: String::new(),
            cogs: String::new(),
            field: FormField::Name,
            saving: false,
            alert: None,
        }
    }

    pub fn edit(recipe: &RecipeItem) -> Self {
        Self {
            editing: Some(recipe.id),
            name: recipe.name.clone(),
            sku: recipe.sku.clone(),
            cogs: recipe.cogs.to_string(),
            field: FormField::Name,
            saving: false,
            alert: None,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// A save round-trip failed; re-enable input and surface the message.
    pub fn on_save_failed(&mut self, message: &str) {
        self.saving = false;
        self.alert = Some(message.to_owned());
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Sku => &mut self.sku,
            FormField::Cogs => &mut self.cogs,
        }
    }

    /// Handle a key while the form is open. Esc is handled by the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.saving {
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.field = self.field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = self.field.prev();
                None
            }
            KeyCode::Enter => {
                // Enter advances through the fields; on the last it submits.
                if self.field == FormField::Cogs {
                    self.submit()
                } else {
                    self.field = self.field.next();
                    None
                }
            }
            KeyCode::Backspace => {
                self.active_buffer().pop();
                self.alert = None;
                None
            }
            KeyCode::Char(c) => {
                self.active_buffer().push(c);
                self.alert = None;
                None
            }
            _ => None,
        }
    }

    fn submit(&mut self) -> Option<Action> {
        let name = self.name.trim();
        let sku = self.sku.trim();
        let cogs_raw = self.cogs.trim();

        if name.is_empty() || sku.is_empty() || cogs_raw.is_empty() {
            self.alert = Some("All fields are required".into());
            return None;
        }

        let Ok(cogs) = cogs_raw.parse::<f64>() else {
            self.alert = Some("Cost must be a number".into());
            return None;
        };
        if !cogs.is_finite() || cogs < 0.0 {
            self.alert = Some("Cost must be a non-negative number".into());
            return None;
        }

        self.saving = true;
        Some(Action::SaveRecipe {
            id: self.editing,
            draft: RecipeDraft {
                name: name.to_owned(),
                sku: sku.to_owned(),
                cogs,
            },
        })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog = overlay::centered(area, 48, 11);
        overlay::clear_under(frame, dialog);

        let title = if self.editing.is_some() {
            " Edit Recipe "
        } else {
            " Add Recipe "
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
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1), // spacer
            Constraint::Length(1), // alert / saving
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_field(frame, layout[0], "Name", &self.name, FormField::Name);
        self.render_field(frame, layout[1], "SKU", &self.sku, FormField::Sku);
        self.render_field(frame, layout[2], "Cost", &self.cogs, FormField::Cogs);

        if let Some(alert) = &self.alert {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {alert}"), theme::alert())),
                layout[4],
            );
        } else if self.saving {
            frame.render_widget(
                Paragraph::new(Span::styled(" Saving\u{2026}", theme::key_hint())),
                layout[4],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Tab ", theme::key_hint_key()),
                Span::styled("field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("next/save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])),
            layout[5],
        );
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, label: &str, value: &str, field: FormField) {
        let active = self.field == field && !self.saving;
        let style = if active {
            theme::field_active()
        } else {
            theme::field_label()
        };
        let cursor = if active { "█" } else { "" };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {label:<6} "), theme::field_label()),
                Span::styled(format!("{value}{cursor}"), style),
            ])),
            area,
        );
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

    fn type_str(form: &mut RecipeForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_walks_fields_then_submits() {
        let mut form = RecipeForm::create();
        type_str(&mut form, "Chicken Soup");
        form.handle_key(key(KeyCode::Enter));
        type_str(&mut form, "SOUP-001");
        form.handle_key(key(KeyCode::Enter));
        type_str(&mut form, "12.5");

        let action = form.handle_key(key(KeyCode::Enter));
        match action {
            Some(Action::SaveRecipe { id: None, draft }) => {
                assert_eq!(draft.name, "Chicken Soup");
                assert_eq!(draft.sku, "SOUP-001");
                assert!((draft.cogs - 12.5).abs() < f64::EPSILON);
            }
            other => panic!("expected SaveRecipe, got: {other:?}"),
        }
        assert!(form.saving);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut form = RecipeForm::create();
        form.field = FormField::Cogs;
        assert!(form.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(form.alert.as_deref(), Some("All fields are required"));
    }

    #[test]
    fn non_numeric_cost_is_rejected() {
        let mut form = RecipeForm::create();
        type_str(&mut form, "Soup");
        form.field = FormField::Sku;
        type_str(&mut form, "S-1");
        form.field = FormField::Cogs;
        type_str(&mut form, "cheap");

        assert!(form.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(form.alert.as_deref(), Some("Cost must be a number"));
    }

    #[test]
    fn edit_prefills_from_recipe() {
        let recipe = RecipeItem {
            id: 7,
            name: "Beef Rendang".into(),
            sku: "MAIN-014".into(),
            cogs: 31.0,
        };
        let mut form = RecipeForm::edit(&recipe);
        assert_eq!(form.name, "Beef Rendang");
        assert_eq!(form.cogs, "31");

        form.field = FormField::Cogs;
        let action = form.handle_key(key(KeyCode::Enter));
        assert!(matches!(action, Some(Action::SaveRecipe { id: Some(7), .. })));
    }

    #[test]
    fn save_failure_keeps_form_editable() {
        let mut form = RecipeForm::create();
        type_str(&mut form, "Soup");
        form.field = FormField::Sku;
        type_str(&mut form, "S-1");
        form.field = FormField::Cogs;
        type_str(&mut form, "3");
        form.handle_key(key(KeyCode::Enter));
        assert!(form.saving);

        form.on_save_failed("SKU already in use");
        assert!(!form.saving);
        assert_eq!(form.alert.as_deref(), Some("SKU already in use"));
        // Input works again
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.cogs, "");
    }
}
