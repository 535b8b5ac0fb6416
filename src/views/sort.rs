//! Column sorting for list views.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::service::Shared;
use crate::utils::numeric_suffix;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column and direction of one view.
///
/// This is a plain value owned by the caller and round-tripped through the
/// client (e.g. as `sortColumn` / `sortOrder` query parameters), so
/// concurrent requests never share it. Column `"0"` means unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    #[serde(rename = "sortColumn", default = "default_column")]
    pub column: String,
    #[serde(rename = "sortOrder", default)]
    pub order: SortOrder,
}

fn default_column() -> String {
    "0".to_string()
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: default_column(),
            order: SortOrder::Asc,
        }
    }
}

impl SortState {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// State after a click on a column header.
    ///
    /// Clicking the active column flips the direction, clicking another
    /// column sorts it ascending, and no click keeps the state.
    #[must_use]
    pub fn toggled(&self, requested: Option<&str>) -> Self {
        match requested {
            Some(column) if column == self.column => Self::new(column, self.order.flipped()),
            Some(column) => Self::new(column, SortOrder::Asc),
            None => self.clone(),
        }
    }
}

/// Per-column comparison for a sortable entity.
///
/// Columns are identified by the header index the view uses. Unknown
/// columns compare equal.
pub trait ColumnOrd {
    fn compare_column(&self, other: &Self, column: &str) -> Ordering;
}

/// Sort handles by the active column, keeping the relative order of
/// elements that compare equal.
pub fn sort_by_state<T: ColumnOrd>(items: &mut [Shared<T>], state: &SortState) {
    items.sort_by(|a, b| {
        if Arc::ptr_eq(a, b) {
            return Ordering::Equal;
        }
        let ordering = a.read().compare_column(&b.read(), &state.column);
        match state.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Compare two codes by numeric suffix when both have a positive one,
/// falling back to plain string comparison.
///
/// `"CH-9"` sorts before `"CH-10"`; `"ALG"` and `"CH-2"` compare as strings.
pub fn compare_codes(a: &str, b: &str) -> Ordering {
    match (numeric_suffix(a), numeric_suffix(b)) {
        (x, y) if x > 0 && y > 0 => x.cmp(&y),
        _ => a.cmp(b),
    }
}
