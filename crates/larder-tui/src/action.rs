//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use larder_api::types::{
    IngredientPayload, InventoryItem, Paged, RecipeDetail, RecipeDraft, RecipeItem, SortOrder,
};

use crate::screen::ScreenId;

/// Query parameters for a recipe list fetch. `page` is 1-based, matching the
/// wire contract; screens convert from their 0-based cursor when building one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub order: SortOrder,
}

/// Query parameters for an inventory list fetch. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub order: SortOrder,
}

/// An inventory item reshaped for the ingredient form's picker.
///
/// `quantity` is the stock level rendered as display text; the form never
/// edits it, it only shows what is on hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryOption {
    pub inventory_id: u64,
    pub name: String,
    pub quantity: String,
}

impl From<&InventoryItem> for InventoryOption {
    fn from(item: &InventoryItem) -> Self {
        Self {
            inventory_id: item.id,
            name: item.item.clone(),
            quantity: crate::widgets::fmt::fmt_qty(item.qty),
        }
    }
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    #[allow(dead_code)]
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteRecipe { id: u64, name: String },
    DeleteIngredient { id: u64, recipe_id: u64, item: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteRecipe { name, .. } => {
                write!(f, "Delete recipe {name}? This cannot be undone.")
            }
            Self::DeleteIngredient { item, .. } => {
                write!(f, "Remove {item} from this recipe?")
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit(String),

    // ── Recipe list ───────────────────────────────────────────────
    LoadRecipes(RecipeQuery),
    RecipesLoaded(Paged<RecipeItem>),
    RecipesLoadFailed(String),
    /// Re-fetch the recipe list with its current query (post-mutation).
    ReloadRecipes,
    /// Local removal of a deleted row, applied before the list re-fetch lands.
    RecipeRemoved(u64),

    // ── Recipe detail ─────────────────────────────────────────────
    /// Fetch (or re-fetch) a recipe's detail view by id.
    LoadRecipeDetail(u64),
    RecipeDetailLoaded(RecipeDetail),
    RecipeDetailLoadFailed(String),

    // ── Recipe form ───────────────────────────────────────────────
    SaveRecipe { id: Option<u64>, draft: RecipeDraft },
    RecipeSaved { created: bool },
    RecipeSaveFailed(String),

    // ── Ingredient form ───────────────────────────────────────────
    LoadInventoryOptions,
    InventoryOptionsLoaded(Vec<InventoryOption>),
    InventoryOptionsFailed(String),
    SaveIngredient { id: Option<u64>, payload: IngredientPayload },
    IngredientSaved { recipe_id: u64 },
    IngredientSaveFailed(String),

    // ── Inventory screen ──────────────────────────────────────────
    LoadInventory(InventoryQuery),
    InventoryLoaded(Paged<InventoryItem>),
    InventoryLoadFailed(String),

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inventory_option_reshapes_item_for_picker() {
        let item = InventoryItem {
            id: 1,
            item: "Flour".into(),
            qty: 10.0,
            extra: std::collections::HashMap::new(),
        };

        let option = InventoryOption::from(&item);
        assert_eq!(option.inventory_id, 1);
        assert_eq!(option.name, "Flour");
        // Whole stock levels render without a trailing ".0"
        assert_eq!(option.quantity, "10");
    }

    #[test]
    fn inventory_option_keeps_fractional_stock() {
        let item = InventoryItem {
            id: 9,
            item: "Saffron".into(),
            qty: 0.25,
            extra: std::collections::HashMap::new(),
        };

        assert_eq!(InventoryOption::from(&item).quantity, "0.25");
    }
}
