//! Screen identifier enum for tab-bar navigation.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Recipes, // 1
    Inventory, // 2
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 2] = [Self::Recipes, Self::Inventory];

    /// Numeric key (1-2) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Recipes => 1,
            Self::Inventory => 2,
        }
    }

    /// Screen from a numeric key (1-2). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Recipes),
            2 => Some(Self::Inventory),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Recipes => "Recipes",
            Self::Inventory => "Inventory",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn number_round_trip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(screen.number()), Some(screen));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(9), None);
    }

    #[test]
    fn tab_cycling_wraps() {
        assert_eq!(ScreenId::Recipes.next(), ScreenId::Inventory);
        assert_eq!(ScreenId::Inventory.next(), ScreenId::Recipes);
        assert_eq!(ScreenId::Recipes.prev(), ScreenId::Inventory);
    }
}
