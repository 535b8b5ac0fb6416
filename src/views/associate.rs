//! Parent/child association across two cached lists.

use std::collections::HashMap;
use std::sync::Arc;

use crate::service::{Resource, Shared};

/// An entity that collects children of type `C`.
pub trait Parent<C>: Resource {
    fn children_mut(&mut self) -> &mut Vec<Shared<C>>;
}

/// An entity that points at its parent by foreign key.
pub trait Child<P: Resource>: Resource {
    fn parent_id(&self) -> P::Id;
}

/// Attach every child to the parent named by its foreign key.
///
/// Each parent's children are cleared first, so running this again on the
/// same inputs gives the same grouping. Children whose parent is not in
/// `parents` are skipped. Parents receive handles, so later in-place updates
/// to a child are visible from its parent.
pub fn associate<P, C>(parents: &[Shared<P>], children: &[Shared<C>])
where
    P: Parent<C>,
    C: Child<P>,
{
    let mut by_id: HashMap<P::Id, &Shared<P>> = HashMap::with_capacity(parents.len());
    for parent in parents {
        let mut guard = parent.write();
        guard.children_mut().clear();
        by_id.insert(guard.id(), parent);
    }

    for child in children {
        let parent_id = child.read().parent_id();
        if let Some(parent) = by_id.get(&parent_id) {
            parent.write().children_mut().push(Arc::clone(child));
        }
    }
}
