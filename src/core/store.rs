//! Store traits for filtering and sorting

use crate::core::entity::Vehicle;
use crate::core::query::{QuerySpec, SortKey};
use crate::engine;

/// Trait for stores that support filtering and sorting
///
/// Implementors only provide [`list_all`](QueryableStore::list_all); the
/// filter and sort steps default to the shared engine.
pub trait QueryableStore<T: Vehicle>: Send + Sync {
    /// Apply filters to a collection of entities
    ///
    /// # Parameters
    /// - `data`: Collection of entities to filter
    /// - `filter`: Filter criteria
    ///
    /// # Returns
    /// Matching entities, in input order
    fn apply_filters(&self, data: Vec<T>, filter: &QuerySpec) -> Vec<T> {
        data.into_iter()
            .filter(|item| engine::matches(item, filter))
            .collect()
    }

    /// Apply sorting to a collection of entities
    ///
    /// `None` keeps the input order.
    fn apply_sort(&self, data: Vec<T>, sort: Option<SortKey>) -> Vec<T> {
        match sort {
            Some(key) => engine::sort(data, key),
            None => data,
        }
    }

    /// Get all entities (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Filter then sort everything in the store
    fn query(&self, filter: &QuerySpec, sort: Option<SortKey>) -> Vec<T> {
        let filtered = self.apply_filters(self.list_all(), filter);
        self.apply_sort(filtered, sort)
    }
}
