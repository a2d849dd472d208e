//! Row-scoped in-flight tracking
//!
//! A row whose id is in the set shows a spinner and rejects further actions.
//! Ids leave the set when their [`InFlightGuard`] drops, so a resolved,
//! failed or cancelled action can never leave a row stuck.

use dashmap::DashSet;
use std::hash::Hash;
use std::sync::Arc;

/// Shared set of ids with an action in progress
#[derive(Debug)]
pub struct InFlight<Id: Eq + Hash> {
    ids: Arc<DashSet<Id>>,
}

impl<Id: Eq + Hash> Clone for InFlight<Id> {
    fn clone(&self) -> Self {
        Self {
            ids: Arc::clone(&self.ids),
        }
    }
}

impl<Id: Eq + Hash> Default for InFlight<Id> {
    fn default() -> Self {
        Self {
            ids: Arc::new(DashSet::new()),
        }
    }
}

impl<Id: Eq + Hash + Copy> InFlight<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` busy. Returns `None` if it already is.
    pub fn begin(&self, id: Id) -> Option<InFlightGuard<Id>> {
        self.ids.insert(id).then(|| InFlightGuard {
            ids: Arc::clone(&self.ids),
            id,
        })
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Removes its id from the set on drop
#[derive(Debug)]
pub struct InFlightGuard<Id: Eq + Hash> {
    ids: Arc<DashSet<Id>>,
    id: Id,
}

impl<Id: Eq + Hash> Drop for InFlightGuard<Id> {
    fn drop(&mut self) {
        self.ids.remove(&self.id);
    }
}
