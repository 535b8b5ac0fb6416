//! In-place filters for list views.
//!
//! Views filter the cached list itself, under its write lock, with
//! `Vec::retain`: kept elements move to the front in their original order
//! and the vector is truncated, reusing its allocation. Every later reader
//! of that cache entry sees the filtered list until it is refetched.

use std::collections::HashSet;

use crate::models::{Problem, Test};
use crate::service::Shared;

/// Problem filter of the problem picker.
///
/// Empty difficulty or subtype means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemFilter {
    pub difficulty: Option<String>,
    pub subtype: Option<String>,
    /// Problems already selected elsewhere, hidden from the picker.
    pub excluded: HashSet<i32>,
}

impl ProblemFilter {
    /// Build from raw picker inputs.
    ///
    /// `selected_ids` is a comma-separated ID list; unparsable entries are
    /// ignored.
    pub fn from_inputs(difficulty: &str, subtype: &str, selected_ids: &str) -> Self {
        Self {
            difficulty: non_empty(difficulty),
            subtype: non_empty(subtype),
            excluded: selected_ids
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect(),
        }
    }

    pub fn accepts(&self, problem: &Problem) -> bool {
        self.difficulty
            .as_deref()
            .is_none_or(|d| problem.difficulty_level == d)
            && self.subtype.as_deref().is_none_or(|s| problem.subtype == s)
            && !self.excluded.contains(&problem.id)
    }

    pub fn apply(&self, problems: &mut Vec<Shared<Problem>>) {
        problems.retain(|p| self.accepts(&p.read()));
    }
}

/// Drop archived tests.
pub fn skip_archived(tests: &mut Vec<Shared<Test>>) {
    tests.retain(|t| !t.read().is_archived());
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
