use std::collections::BTreeSet;

use tracing::debug;

use super::store::{InspectionStore, StoreError};
use super::types::LocationId;

/// Computes the closure of a location over the parent/child hierarchy.
pub struct LocationExpander<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: InspectionStore + ?Sized> LocationExpander<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Return `root` and all of its transitive descendants.
    ///
    /// Expansion is level by level: only ids not seen before join the next
    /// frontier, so shared children are expanded once and a cycle in the
    /// stored hierarchy cannot loop forever.
    pub async fn expand(&self, root: LocationId) -> Result<BTreeSet<LocationId>, StoreError> {
        let limit = self.store.max_bind_params().max(1);
        let mut visited = BTreeSet::from([root]);
        let mut frontier = vec![root];
        let mut depth = 0usize;

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for parents in frontier.chunks(limit) {
                for child in self.store.child_locations(parents).await? {
                    if visited.insert(child) {
                        next.push(child);
                    }
                }
            }

            depth += 1;
            debug!(depth, discovered = next.len(), "Expanded location level");
            frontier = next;
        }

        Ok(visited)
    }
}
