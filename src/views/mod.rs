//! Derived views over cached lists.
//!
//! - `associate` - join two cached lists through a foreign key
//! - `sort` - per-column stable sorting and the sort state of a view
//! - `filter` - in-place compaction of cached lists

mod associate;
mod filter;
mod sort;

pub use associate::{Child, Parent, associate};
pub use filter::{ProblemFilter, skip_archived};
pub use sort::{ColumnOrd, SortOrder, SortState, compare_codes, sort_by_state};
