//! Sectioning by stored category

use indexmap::IndexMap;

use crate::core::entity::Vehicle;
use crate::core::vehicle::Category;

/// Ordered mapping from stored category to its members
///
/// Keys appear in order of first occurrence in the input.
pub type Groups<V> = IndexMap<Category, Vec<V>>;

/// Partition a collection by stored category, keeping input order
///
/// Electric vehicles stay under their stored `bike`/`scooter` category even
/// though the filter engine also lets them match `ev`. Grouping never
/// produces an `ev` bucket.
pub fn group<V, I>(vehicles: I) -> Groups<V>
where
    V: Vehicle,
    I: IntoIterator<Item = V>,
{
    let mut groups: Groups<V> = IndexMap::new();
    for vehicle in vehicles {
        groups.entry(vehicle.category()).or_default().push(vehicle);
    }
    groups
}
