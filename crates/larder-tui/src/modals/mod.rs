//! Modal dialogs layered over the recipes screen.

pub mod detail;
pub mod ingredient_form;
pub mod recipe_form;
