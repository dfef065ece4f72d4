//! Read-only vehicle catalog
//!
//! The catalog is seeded once per session from an embedded dataset and never
//! changes afterwards. Everything else in the storefront reads from it.

mod page;
mod seed;

use std::collections::HashMap;

pub use page::{CategoryPage, SPORT_BIKE_MIN_CC};
pub use seed::{SEED_YAML, check_invariants, parse_records};

use crate::core::entity::Vehicle;
use crate::core::error::CatalogError;
use crate::core::query::QuerySpec;
use crate::core::store::QueryableStore;
use crate::core::vehicle::VehicleRecord;
use crate::engine;

/// Price window used to suggest similar vehicles
pub const SIMILAR_PRICE_WINDOW: u64 = 50_000;

/// Number of similar vehicles suggested
pub const SIMILAR_LIMIT: usize = 3;

/// Seeded, immutable collection of vehicles
#[derive(Debug, Clone)]
pub struct Catalog {
    vehicles: Vec<VehicleRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load the embedded seed dataset
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(SEED_YAML)
    }

    /// Load a catalog from a YAML list of records
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Self::from_records(parse_records(yaml)?)
    }

    /// Build a catalog, checking the seeding invariants
    pub fn from_records(vehicles: Vec<VehicleRecord>) -> Result<Self, CatalogError> {
        check_invariants(&vehicles)?;

        let index = vehicles
            .iter()
            .enumerate()
            .map(|(position, vehicle)| (vehicle.id.clone(), position))
            .collect();

        tracing::info!(vehicles = vehicles.len(), "catalog seeded");
        Ok(Self { vehicles, index })
    }

    pub fn get(&self, id: &str) -> Option<&VehicleRecord> {
        self.index.get(id).map(|&position| &self.vehicles[position])
    }

    /// Like [`get`](Self::get) but unknown ids are an error
    pub fn require(&self, id: &str) -> Result<&VehicleRecord, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All vehicles, in seed order
    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Vehicles matching a query spec, in seed order
    pub fn search(&self, spec: &QuerySpec) -> Vec<VehicleRecord> {
        engine::filter(&self.vehicles, spec)
    }

    /// Vehicles shown on a category page
    pub fn category_page(&self, page: &CategoryPage) -> Vec<VehicleRecord> {
        let result: Vec<VehicleRecord> = self
            .vehicles
            .iter()
            .filter(|vehicle| page.matches(vehicle))
            .cloned()
            .collect();

        tracing::debug!(page = page.title(), matched = result.len(), "category page");
        result
    }

    /// Vehicles of the same category priced within `window` of `id`
    ///
    /// The vehicle itself is excluded; at most `limit` results are returned,
    /// in seed order.
    pub fn similar_to(
        &self,
        id: &str,
        window: u64,
        limit: usize,
    ) -> Result<Vec<VehicleRecord>, CatalogError> {
        let target = self.require(id)?;

        Ok(self
            .vehicles
            .iter()
            .filter(|vehicle| {
                vehicle.id != target.id
                    && vehicle.category() == target.category()
                    && vehicle.price().abs_diff(target.price()) < window
            })
            .take(limit)
            .cloned()
            .collect())
    }
}

impl QueryableStore<VehicleRecord> for Catalog {
    fn list_all(&self) -> Vec<VehicleRecord> {
        self.vehicles.clone()
    }
}
