//! Screen implementations. Each screen is a top-level Component.

pub mod inventory;
pub mod recipes;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Recipes, Box::new(recipes::RecipesScreen::new())),
        (
            ScreenId::Inventory,
            Box::new(inventory::InventoryScreen::new()),
        ),
    ]
}
