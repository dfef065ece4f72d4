//! Entity traits shared by catalog vehicles and user listings
//!
//! The filter, sort and grouping engines are written against [`Vehicle`],
//! so the same pipeline serves the catalog and the local listings.

use chrono::{DateTime, Utc};

use crate::core::vehicle::{Category, ELECTRIC};

/// Base trait for every record the storefront handles.
///
/// All entities have:
/// - id: stable lookup key
/// - created_at: optional creation timestamp (used by recency sorts)
pub trait Entity: Clone + Send + Sync + 'static {
    /// Get the unique identifier for this entity instance
    fn id(&self) -> &str;

    /// Get the creation timestamp, if the record carries one
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// Trait for records that can be searched as vehicles.
///
/// Vehicles extend the base Entity with the fields the query pipeline reads:
/// - name / brand: matched by free text
/// - price: matched by brackets and ranges, used by price sorts
/// - category / fuel_type: matched by the category filter
pub trait Vehicle: Entity {
    fn name(&self) -> &str;

    fn brand(&self) -> &str;

    /// Price in whole rupees
    fn price(&self) -> u64;

    /// Stored category (never the `ev` pseudo-category)
    fn category(&self) -> Category;

    fn fuel_type(&self) -> &str;

    /// Check if the vehicle runs on electricity
    fn is_electric(&self) -> bool {
        self.fuel_type() == ELECTRIC
    }
}
