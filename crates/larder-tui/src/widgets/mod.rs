//! Shared rendering helpers used across screens and modals.

pub mod fmt;
pub mod overlay;
