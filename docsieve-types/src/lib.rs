//! Shared types for docsieve
//!
//! This crate provides common types used across the docsieve ecosystem,
//! including dropdown identifiers and filter change events.

use serde::{Deserialize, Serialize};

/// Name of a selection control, matching its `name` attribute on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DropdownName(pub String);

impl DropdownName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DropdownName {
    fn from(name: &str) -> Self {
        DropdownName(name.to_string())
    }
}

impl std::fmt::Display for DropdownName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filter change event
///
/// Every interaction that can alter the visible set funnels through one of
/// these variants; the controller applies them synchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FilterEvent {
    /// A dropdown's value changed
    SelectionChanged {
        dropdown: DropdownName,
        value: String,
    },

    /// A badge was clicked, shortcutting a dropdown to the badge's tag
    BadgeClicked {
        dropdown: DropdownName,
        value: String,
    },

    /// The page was visited with a query string that may preselect a version
    QueryPreselect { query_value: String },
}
