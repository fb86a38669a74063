//! Application core — event loop, screen management, action dispatch.
//!
//! All service I/O happens in spawned tokio tasks that report back through
//! the action channel. Every fetch family carries a generation counter so a
//! stale response (issued before the user changed the query or closed the
//! view) is dropped instead of overwriting fresh state.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use larder_api::ApiClient;
use larder_api::types::SortOrder;

use crate::action::{
    Action, ConfirmAction, InventoryOption, InventoryQuery, Notification, RecipeQuery,
};
use crate::component::Component;
use crate::event::{Event, EventPump};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::overlay;

/// One generation counter per fetch family.
#[derive(Clone, Default)]
struct Generations {
    recipes: Arc<AtomicU64>,
    detail: Arc<AtomicU64>,
    inventory: Arc<AtomicU64>,
    options: Arc<AtomicU64>,
}

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search overlay visibility.
    search_active: bool,
    /// Staged search text while the overlay is open. Committed to the
    /// active screen only on Enter.
    search_query: String,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Service client. Cheap to clone into fetch tasks.
    client: ApiClient,
    /// Host label for the status bar.
    server_label: String,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    generations: Generations,
}

impl App {
    pub fn new(client: ApiClient, server_label: String) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Recipes,
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            client,
            server_label,
            pending_confirm: None,
            notification: None,
            generations: Generations::default(),
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        // Focus the initial screen
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        let mut events = EventPump::start();

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        // Search overlay captures text input until Enter or Esc
        if self.search_active {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::CloseSearch)),
                KeyCode::Enter => Ok(Some(Action::SearchSubmit(self.search_query.clone()))),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // An open modal/form takes all keys except Ctrl+C
        if self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.capturing_input())
        {
            if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            // Help
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Search
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                let n = c.to_digit(10).unwrap_or(0);
                if let Some(screen) = ScreenId::from_number(u8::try_from(n).unwrap_or(0)) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc — context-dependent back
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to components.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }

            Action::CloseSearch => {
                // Staged text is discarded; the committed filter is untouched.
                self.search_active = false;
                self.search_query.clear();
            }

            Action::SearchSubmit(_) => {
                self.search_active = false;
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Render => {}

            Action::Tick => {
                // Auto-dismiss notifications after 3 seconds
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > Duration::from_secs(3) {
                        self.notification = None;
                    }
                }
                // Forward ticks to the active screen for throbber animation
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    let _ = screen.update(action);
                }
            }

            // ── Fetches ───────────────────────────────────────────────
            Action::LoadRecipes(query) => {
                self.fetch_recipes(query.clone());
            }

            Action::LoadRecipeDetail(id) => {
                self.fetch_recipe_detail(*id);
            }

            Action::LoadInventory(query) => {
                self.fetch_inventory(query.clone());
            }

            Action::LoadInventoryOptions => {
                self.fetch_inventory_options();
            }

            // ── Mutations ─────────────────────────────────────────────
            Action::SaveRecipe { id, draft } => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                let id = *id;
                let draft = draft.clone();
                tokio::spawn(async move {
                    let result = match id {
                        Some(id) => client.update_recipe(id, &draft).await,
                        None => client.create_recipe(&draft).await,
                    };
                    match result {
                        Ok(saved) => {
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Saved {}",
                                saved.name
                            ))));
                            let _ = tx.send(Action::RecipeSaved { created: id.is_none() });
                        }
                        Err(e) => {
                            warn!(error = %e, "recipe save failed");
                            let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                            let _ = tx.send(Action::RecipeSaveFailed(e.to_string()));
                        }
                    }
                });
            }

            Action::SaveIngredient { id, payload } => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                let id = *id;
                let payload = payload.clone();
                tokio::spawn(async move {
                    let result = match id {
                        Some(id) => client.update_ingredient(id, &payload).await,
                        None => client.create_ingredient(&payload).await,
                    };
                    match result {
                        Ok(saved) => {
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Saved {}",
                                saved.item
                            ))));
                            let _ = tx.send(Action::IngredientSaved {
                                recipe_id: payload.recipe_id,
                            });
                        }
                        Err(e) => {
                            warn!(error = %e, "ingredient save failed");
                            let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                            let _ = tx.send(Action::IngredientSaveFailed(e.to_string()));
                        }
                    }
                });
            }

            // Confirmation dialog management
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            // Notifications
            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            // Data results go to ALL screens so they stay in sync
            Action::RecipesLoaded(_)
            | Action::RecipesLoadFailed(_)
            | Action::ReloadRecipes
            | Action::RecipeRemoved(_)
            | Action::RecipeDetailLoaded(_)
            | Action::RecipeDetailLoadFailed(_)
            | Action::RecipeSaved { .. }
            | Action::RecipeSaveFailed(_)
            | Action::InventoryOptionsLoaded(_)
            | Action::InventoryOptionsFailed(_)
            | Action::IngredientSaved { .. }
            | Action::IngredientSaveFailed(_)
            | Action::InventoryLoaded(_)
            | Action::InventoryLoadFailed(_) => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // Everything else goes to the active screen only
            other => {
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    // ── Fetch tasks ───────────────────────────────────────────────────

    /// Bump a generation counter, returning the new value and a handle for
    /// the spawned task to compare against.
    fn next_generation(counter: &Arc<AtomicU64>) -> (u64, Arc<AtomicU64>) {
        let generation = counter.fetch_add(1, Ordering::Relaxed) + 1;
        (generation, counter.clone())
    }

    fn fetch_recipes(&self, query: RecipeQuery) {
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        let (generation, gen_ref) = Self::next_generation(&self.generations.recipes);

        tokio::spawn(async move {
            let result = client
                .list_recipes(query.page, query.per_page, &query.search, query.order, "name")
                .await;

            // A newer query was issued while we were fetching; discard.
            if gen_ref.load(Ordering::Relaxed) != generation {
                return;
            }

            match result {
                Ok(page) => {
                    let _ = tx.send(Action::RecipesLoaded(page));
                }
                Err(e) => {
                    warn!(error = %e, "recipe list fetch failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "Failed to load recipes: {e}"
                    ))));
                    let _ = tx.send(Action::RecipesLoadFailed(e.to_string()));
                }
            }
        });
    }

    fn fetch_recipe_detail(&self, id: u64) {
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        let (generation, gen_ref) = Self::next_generation(&self.generations.detail);

        tokio::spawn(async move {
            let result = client.get_recipe_detail(id).await;

            if gen_ref.load(Ordering::Relaxed) != generation {
                return;
            }

            match result {
                Ok(detail) => {
                    let _ = tx.send(Action::RecipeDetailLoaded(detail));
                }
                Err(e) => {
                    warn!(error = %e, recipe_id = id, "recipe detail fetch failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "Failed to load recipe: {e}"
                    ))));
                    let _ = tx.send(Action::RecipeDetailLoadFailed(e.to_string()));
                }
            }
        });
    }

    fn fetch_inventory(&self, query: InventoryQuery) {
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        let (generation, gen_ref) = Self::next_generation(&self.generations.inventory);

        tokio::spawn(async move {
            let result = client
                .list_inventory(query.page, query.per_page, &query.search, query.order, "item")
                .await;

            if gen_ref.load(Ordering::Relaxed) != generation {
                return;
            }

            match result {
                Ok(page) => {
                    let _ = tx.send(Action::InventoryLoaded(page));
                }
                Err(e) => {
                    warn!(error = %e, "inventory fetch failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!(
                        "Failed to load inventory: {e}"
                    ))));
                    let _ = tx.send(Action::InventoryLoadFailed(e.to_string()));
                }
            }
        });
    }

    /// One-shot fetch of the ingredient form's picker options: the first
    /// hundred inventory items by id, reshaped for display.
    fn fetch_inventory_options(&self) {
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        let (generation, gen_ref) = Self::next_generation(&self.generations.options);

        tokio::spawn(async move {
            let result = client.list_inventory(1, 100, "", SortOrder::Asc, "id").await;

            if gen_ref.load(Ordering::Relaxed) != generation {
                return;
            }

            match result {
                Ok(page) => {
                    let options: Vec<InventoryOption> =
                        page.data.iter().map(InventoryOption::from).collect();
                    let _ = tx.send(Action::InventoryOptionsLoaded(options));
                }
                Err(e) => {
                    warn!(error = %e, "inventory options fetch failed");
                    let _ = tx.send(Action::InventoryOptionsFailed(e.to_string()));
                }
            }
        });
    }

    // ── Confirmed mutations ───────────────────────────────────────────

    fn execute_confirm(&self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteRecipe { id, name } => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match client.delete_recipe(id).await {
                        Ok(()) => {
                            let _ = tx.send(Action::RecipeRemoved(id));
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Deleted {name}"
                            ))));
                        }
                        Err(e) => {
                            warn!(error = %e, recipe_id = id, "recipe delete failed");
                            let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                        }
                    }
                    // The list re-fetches whether or not the delete stuck,
                    // so the table matches the service either way.
                    let _ = tx.send(Action::ReloadRecipes);
                });
            }

            ConfirmAction::DeleteIngredient { id, recipe_id, item } => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match client.delete_ingredient(id).await {
                        Ok(()) => {
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Removed {item}"
                            ))));
                        }
                        Err(e) => {
                            warn!(error = %e, ingredient_id = id, "ingredient delete failed");
                            let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                        }
                    }
                    // Always re-sync the open detail view.
                    let _ = tx.send(Action::LoadRecipeDetail(recipe_id));
                });
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = layout[0];
        let tab_area = layout[1];
        let status_area = layout[2];

        // Render active screen
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Render overlays on top (order matters: last = topmost)
        if let Some((ref notif, _)) = self.notification {
            self.render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            self.render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar with the server label and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::COPPER)),
                Span::styled(&self.search_query, Style::default().fg(theme::CREAM)),
                Span::styled("█", Style::default().fg(theme::CREAM)),
                Span::styled("  Esc cancel  Enter submit", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled("⌂ ", Style::default().fg(theme::SAGE)),
            Span::styled(&self.server_label, Style::default().fg(theme::DIM_WHITE)),
            Span::styled(" │ ? help  / search  q quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_area = overlay::centered(area, 58, 20);
        overlay::clear_under(frame, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let help_text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "  Navigation",
                Style::default().fg(theme::CREAM),
            )]),
            Line::from(Span::styled("  ─────────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  1-2       ", theme::key_hint_key()),
                Span::styled("Jump to screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Tab       ", theme::key_hint_key()),
                Span::styled("Next screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  j/k ↑/↓   ", theme::key_hint_key()),
                Span::styled("Move up/down", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  n/p ←/→   ", theme::key_hint_key()),
                Span::styled("Next / previous page", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Enter     ", theme::key_hint_key()),
                Span::styled("Open recipe", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Esc       ", theme::key_hint_key()),
                Span::styled("Back / close", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "  Actions",
                Style::default().fg(theme::CREAM),
            )]),
            Line::from(Span::styled("  ───────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  a / e / d ", theme::key_hint_key()),
                Span::styled("Add / edit / delete", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  s         ", theme::key_hint_key()),
                Span::styled("Toggle sort          ", theme::key_hint()),
                Span::styled("r  ", theme::key_hint_key()),
                Span::styled("Rows per page", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  /         ", theme::key_hint_key()),
                Span::styled("Search               ", theme::key_hint()),
                Span::styled("q  ", theme::key_hint_key()),
                Span::styled("Quit", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "                        Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a centered confirmation dialog.
    #[allow(clippy::unused_self)]
    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let dialog_area = overlay::centered(area, 50, 5);
        overlay::clear_under(frame, dialog_area);

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::HONEY));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) {
        use crate::action::NotificationLevel;

        let msg_len = u16::try_from(notif.message.len()).unwrap_or(u16::MAX);
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        overlay::clear_under(frame, toast_area);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SAGE, "✓"),
            NotificationLevel::Error => (theme::PAPRIKA, "✗"),
            NotificationLevel::Info => (theme::CREAM, "·"),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
