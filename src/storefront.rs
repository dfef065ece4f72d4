//! The storefront application store
//!
//! [`Storefront`] owns the state the browse and search views share: the
//! catalog, the active search and its results, and the wishlist. It is
//! passed around explicitly; the wishlist toggle is its only write to
//! anything catalog related.

use indexmap::IndexSet;
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Catalog, CategoryPage};
use crate::config::BrowseConfig;
use crate::core::error::CatalogError;
use crate::core::events::{EventBus, StoreEvent};
use crate::core::query::{PriceRange, QuerySpec, SortKey};
use crate::core::vehicle::VehicleRecord;
use crate::engine::{self, Groups};

/// A page of browse results with the size of the unfiltered catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseResult {
    pub vehicles: Vec<VehicleRecord>,
    pub total: usize,
}

impl BrowseResult {
    /// `Showing 4 of 15 vehicles`
    pub fn summary(&self) -> String {
        result_summary(self.vehicles.len(), self.total)
    }
}

/// `Showing <shown> of <total> vehicles`
pub fn result_summary(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} vehicles")
}

/// Owned application state
#[derive(Debug)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    query: QuerySpec,
    results: Vec<VehicleRecord>,
    wishlist: IndexSet<String>,
    browse: BrowseConfig,
    events: EventBus,
}

impl Storefront {
    /// Start with an empty search showing the whole catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let results = catalog.vehicles().to_vec();
        Self {
            catalog,
            query: QuerySpec::new(),
            results,
            wishlist: IndexSet::new(),
            browse: BrowseConfig::default(),
            events: EventBus::default(),
        }
    }

    /// Use the configured price slider for browsing
    pub fn with_browse_config(mut self, config: BrowseConfig) -> Self {
        self.browse = config;
        self
    }

    /// Publish on a shared bus instead of a private one
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = bus;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn vehicle(&self, id: &str) -> Option<&VehicleRecord> {
        self.catalog.get(id)
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// Replace the active search and recompute its results
    pub fn search(&mut self, spec: QuerySpec) -> &[VehicleRecord] {
        self.results = self.catalog.search(&spec);
        tracing::debug!(
            matched = self.results.len(),
            summary = %spec.describe(),
            "search updated"
        );
        self.events.publish(StoreEvent::Search {
            query: spec.clone(),
            matched: self.results.len(),
        });
        self.query = spec;
        &self.results
    }

    /// Drop every criterion; results go back to the full catalog
    pub fn clear_search(&mut self) -> &[VehicleRecord] {
        self.search(QuerySpec::new())
    }

    pub fn query(&self) -> &QuerySpec {
        &self.query
    }

    pub fn results(&self) -> &[VehicleRecord] {
        &self.results
    }

    /// Summary of the active search, empty when nothing is set
    pub fn filter_summary(&self) -> String {
        self.query.describe()
    }

    // ------------------------------------------------------------------------
    // Browse
    // ------------------------------------------------------------------------

    /// Slider range from raw handle positions, snapped to the configured steps
    pub fn slider_range(&self, min: u64, max: u64) -> PriceRange {
        PriceRange::new(self.browse.snap(min), self.browse.snap(max))
    }

    /// Filter then sort the whole catalog, independent of the active search
    ///
    /// Without an explicit price range the configured slider range applies.
    pub fn browse(&self, spec: &QuerySpec, sort: Option<SortKey>) -> BrowseResult {
        let mut spec = spec.clone();
        if spec.price_range.is_none() {
            spec.price_range = Some(self.browse.price_range());
        }
        let filtered = engine::filter(self.catalog.vehicles(), &spec);
        let vehicles = match sort {
            Some(key) => engine::sort(filtered, key),
            None => filtered,
        };
        BrowseResult {
            vehicles,
            total: self.catalog.len(),
        }
    }

    /// Like [`browse`](Self::browse), sectioned by stored category
    pub fn browse_grouped(&self, spec: &QuerySpec, sort: Option<SortKey>) -> Groups<VehicleRecord> {
        engine::group(self.browse(spec, sort).vehicles)
    }

    /// Vehicles for a named category page
    pub fn category_page(&self, name: &str) -> Vec<VehicleRecord> {
        self.catalog.category_page(&CategoryPage::from_name(name))
    }

    // ------------------------------------------------------------------------
    // Wishlist
    // ------------------------------------------------------------------------

    /// Add or remove a vehicle; returns whether it is now wishlisted
    pub fn toggle_wishlist(&mut self, id: &str) -> Result<bool, CatalogError> {
        self.catalog.require(id)?;

        // shift_remove keeps the remaining ids in insertion order
        let wishlisted = if self.wishlist.shift_remove(id) {
            false
        } else {
            self.wishlist.insert(id.to_string());
            true
        };

        tracing::debug!(vehicle_id = id, wishlisted, "wishlist toggled");
        self.events.publish(StoreEvent::Wishlist {
            vehicle_id: id.to_string(),
            wishlisted,
        });
        Ok(wishlisted)
    }

    pub fn is_wishlisted(&self, id: &str) -> bool {
        self.wishlist.contains(id)
    }

    /// Wishlisted vehicles in the order they were added
    pub fn wishlist(&self) -> Vec<&VehicleRecord> {
        self.wishlist
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    pub fn wishlist_ids(&self) -> impl Iterator<Item = &str> {
        self.wishlist.iter().map(String::as_str)
    }
}
