//! Recipes screen — paginated, searchable recipe table with detail modal
//! and add/edit forms.
//!
//! The screen owns the list query (page, rows per page, committed search,
//! sort order) and re-fetches from the service whenever any part of it
//! changes. Mutations never patch the table in place beyond the immediate
//! removal of a deleted row; the authoritative state always comes from the
//! post-mutation re-fetch.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use tokio::sync::mpsc::UnboundedSender;

use larder_api::types::{PageMeta, RecipeItem, SortOrder};

use crate::action::{Action, ConfirmAction, RecipeQuery};
use crate::component::Component;
use crate::modals::detail::DetailModal;
use crate::modals::recipe_form::RecipeForm;
use crate::theme;
use crate::widgets::fmt;

/// Selectable page sizes, cycled with `r`.
const ROWS_PER_PAGE: [usize; 3] = [5, 10, 25];

pub struct RecipesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,

    recipes: Vec<RecipeItem>,
    meta: PageMeta,
    /// 0-based page cursor; the wire query is 1-based.
    page: usize,
    rows_per_page: usize,
    /// Committed search filter. Staged overlay input lives in the app until
    /// submitted, so typing alone never triggers a fetch.
    search_query: String,
    sort_order: SortOrder,
    loading: bool,
    selected: usize,
    throbber: throbber_widgets_tui::ThrobberState,

    detail: DetailModal,
    recipe_form: Option<RecipeForm>,
}

impl RecipesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            recipes: Vec::new(),
            meta: PageMeta::default(),
            page: 0,
            rows_per_page: ROWS_PER_PAGE[0],
            search_query: String::new(),
            sort_order: SortOrder::Asc,
            loading: false,
            selected: 0,
            throbber: throbber_widgets_tui::ThrobberState::default(),
            detail: DetailModal::default(),
            recipe_form: None,
        }
    }

    /// Build the wire query from the current view state.
    fn query(&self) -> RecipeQuery {
        RecipeQuery {
            page: u32::try_from(self.page).unwrap_or(0) + 1,
            per_page: u32::try_from(self.rows_per_page).unwrap_or(5),
            search: self.search_query.trim().to_owned(),
            order: self.sort_order,
        }
    }

    /// Mark loading and produce the fetch action for the current query.
    fn reload(&mut self) -> Action {
        self.loading = true;
        Action::LoadRecipes(self.query())
    }

    fn selected_recipe(&self) -> Option<&RecipeItem> {
        self.recipes.get(self.selected)
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.recipes.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') => {
                self.selected = self.recipes.len().saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Char('n' | 'l') => {
                let total = usize::try_from(self.meta.total_pages).unwrap_or(0);
                if self.page + 1 < total {
                    self.page += 1;
                    self.selected = 0;
                    return Some(self.reload());
                }
                None
            }
            KeyCode::Left | KeyCode::Char('p' | 'h') => {
                if self.page > 0 {
                    self.page -= 1;
                    self.selected = 0;
                    return Some(self.reload());
                }
                None
            }
            KeyCode::Char('r') => {
                // Cycle page size and restart from the first page
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
            KeyCode::Char('a') => {
                self.recipe_form = Some(RecipeForm::create());
                None
            }
            KeyCode::Char('e') => {
                let recipe = self.selected_recipe()?.clone();
                self.recipe_form = Some(RecipeForm::edit(&recipe));
                None
            }
            KeyCode::Char('d') => {
                let recipe = self.selected_recipe()?;
                Some(Action::ShowConfirm(ConfirmAction::DeleteRecipe {
                    id: recipe.id,
                    name: recipe.name.clone(),
                }))
            }
            KeyCode::Enter => {
                let recipe = self.selected_recipe()?;
                let id = recipe.id;
                self.detail.open_loading();
                Some(Action::LoadRecipeDetail(id))
            }
            _ => None,
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let total = self.meta.total_data.max(0);
        let mut title = format!(" Recipes ({total}) ");
        if !self.search_query.is_empty() {
            title = format!(" Recipes ({total}) · search: {} ", self.search_query);
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

        if self.loading && self.recipes.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Loading recipes\u{2026}")
                .style(theme::key_hint())
                .throbber_style(ratatui::style::Style::default().fg(theme::COPPER));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber.clone());
            return;
        }

        if self.recipes.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let message = if self.search_query.is_empty() {
                " No recipes found".to_owned()
            } else {
                format!(" No recipes match \"{}\"", self.search_query)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(message, theme::key_hint())),
                inner,
            );
            return;
        }

        let arrow = match self.sort_order {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        };
        let header = Row::new(vec![
            Cell::from(format!("Name {arrow}")),
            Cell::from("SKU"),
            Cell::from("Cost"),
        ])
        .style(theme::table_header());

        let rows: Vec<Row> = self
            .recipes
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.name.clone()),
                    Cell::from(r.sku.clone()),
                    Cell::from(fmt::fmt_money(r.cogs)),
                ])
                .style(theme::table_row())
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(14),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        let mut state = TableState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let total_pages = self.meta.total_pages.max(0);
        let page_info = format!(
            " Page {}/{total_pages} · rows {} ",
            self.page + 1,
            self.rows_per_page
        );

        let line = Line::from(vec![
            Span::styled(page_info, theme::key_hint()),
            Span::styled("│ ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("view  ", theme::key_hint()),
            Span::styled("a", theme::key_hint_key()),
            Span::styled("dd  ", theme::key_hint()),
            Span::styled("e", theme::key_hint_key()),
            Span::styled("dit  ", theme::key_hint()),
            Span::styled("d", theme::key_hint_key()),
            Span::styled("elete  ", theme::key_hint()),
            Span::styled("s", theme::key_hint_key()),
            Span::styled("ort  ", theme::key_hint()),
            Span::styled("r", theme::key_hint_key()),
            Span::styled("ows  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for RecipesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        // Initial fetch on mount
        let initial = self.reload();
        action_tx.send(initial)?;
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Innermost overlay first: recipe form, then the detail modal
        // (which routes to its own nested ingredient form).
        if let Some(form) = &mut self.recipe_form {
            if key.code == KeyCode::Esc && !form.is_saving() {
                self.recipe_form = None;
                return Ok(None);
            }
            return Ok(form.handle_key(key));
        }

        if let Some(form) = &mut self.detail.form {
            if key.code == KeyCode::Esc && !form.is_saving() {
                self.detail.form = None;
                return Ok(None);
            }
            return Ok(form.handle_key(key));
        }

        if self.detail.is_open() {
            return Ok(self.detail.handle_key(key));
        }

        Ok(self.handle_table_key(key))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.loading {
                    self.throbber.calc_next();
                }
            }

            Action::RecipesLoaded(page) => {
                self.recipes = page.data.clone();
                self.meta = page.meta;
                self.loading = false;
                self.selected = self.selected.min(self.recipes.len().saturating_sub(1));
            }

            Action::RecipesLoadFailed(_) => {
                self.loading = false;
            }

            Action::ReloadRecipes => {
                return Ok(Some(self.reload()));
            }

            // Deleted rows disappear immediately; the reload that follows
            // re-syncs the page with the service.
            Action::RecipeRemoved(id) => {
                self.recipes.retain(|r| r.id != *id);
                self.selected = self.selected.min(self.recipes.len().saturating_sub(1));
            }

            Action::SearchInput(_) => {
                // Staged input only; committed on SearchSubmit.
            }

            Action::SearchSubmit(query) => {
                if self.focused {
                    self.search_query = query.trim().to_owned();
                    self.page = 0;
                    self.selected = 0;
                    return Ok(Some(self.reload()));
                }
            }

            Action::RecipeDetailLoaded(detail) => {
                self.detail.on_loaded(detail);
            }

            Action::RecipeDetailLoadFailed(_) => {
                self.detail.on_load_failed();
            }

            Action::InventoryOptionsLoaded(options) => {
                if let Some(form) = &mut self.detail.form {
                    form.on_options_loaded(options.clone());
                }
            }

            Action::InventoryOptionsFailed(message) => {
                if let Some(form) = &mut self.detail.form {
                    form.on_options_failed(message.clone());
                }
            }

            Action::IngredientSaved { recipe_id } => {
                self.detail.form = None;
                // Ingredient lines feed the recipe's cost column, so the
                // list reloads along with the open detail view.
                if let Some(tx) = &self.action_tx {
                    let _ = tx.send(Action::ReloadRecipes);
                }
                if self.detail.is_open() {
                    return Ok(Some(Action::LoadRecipeDetail(*recipe_id)));
                }
            }

            Action::IngredientSaveFailed(message) => {
                if let Some(form) = &mut self.detail.form {
                    form.on_save_failed(message);
                }
            }

            Action::RecipeSaved { .. } => {
                self.recipe_form = None;
                return Ok(Some(Action::ReloadRecipes));
            }

            Action::RecipeSaveFailed(message) => {
                if let Some(form) = &mut self.recipe_form {
                    form.on_save_failed(message);
                }
            }

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

        self.render_table(frame, layout[0]);
        self.render_footer(frame, layout[1]);

        // Overlays: detail modal (with its nested ingredient form), then
        // the recipe form on top.
        self.detail.render(frame, area);
        if let Some(form) = &self.recipe_form {
            form.render(frame, area);
        }
    }

    fn capturing_input(&self) -> bool {
        self.detail.is_open() || self.recipe_form.is_some()
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "recipes"
    }
}
