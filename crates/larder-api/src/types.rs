//! Wire types for the larder back-office REST API.
//!
//! Field names match the JSON the service emits; the pagination meta
//! object mixes camelCase and snake_case on the wire, so renames are
//! explicit rather than blanket `rename_all`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Pagination ───────────────────────────────────────────────────────

/// Pagination metadata returned by all list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(rename = "totalData")]
    pub total_data: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    pub current_page: i64,
}

/// Generic list-endpoint envelope: one page of records plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire representation (`asc` / `desc`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

// ── Recipes ──────────────────────────────────────────────────────────

/// Recipe overview — one row of `GET /recipes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeItem {
    pub id: u64,
    pub name: String,
    pub sku: String,
    /// Cost of goods sold.
    pub cogs: f64,
}

/// Recipe detail — from `GET /recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub recipe: RecipeItem,
    pub ingredients: Vec<Ingredient>,
}

/// One ingredient line of a recipe: an inventory association plus quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u64,
    /// Display name of the underlying inventory item.
    pub item: String,
    pub quantity: f64,
    /// Backing inventory item, when the service includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_id: Option<u64>,
}

/// Create/update body for `POST /recipes` and `PUT /recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub sku: String,
    pub cogs: f64,
}

/// Create/update body for `POST /ingredients` and `PUT /ingredients/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientPayload {
    pub recipe_id: u64,
    pub inventory_id: u64,
    pub quantity: f64,
}

// ── Inventory ────────────────────────────────────────────────────────

/// Stocked item — one row of `GET /inventory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u64,
    /// Item name.
    pub item: String,
    /// Quantity on hand.
    pub qty: f64,
    /// Catch-all for additional fields not modeled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
