//! Shared test harness for storefront integration tests
//!
//! Provides vehicle fixtures, a seeded catalog helper, and the
//! `local_store_tests!` conformance suite for `LocalStore` backends.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

pub mod local_store_tests;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::Arc;

use motomart::catalog::Catalog;
use motomart::core::vehicle::{Category, VehicleRecord};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// The embedded catalog, shared
pub fn seeded_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::seeded().expect("embedded catalog is valid"))
}

/// A minimal petrol bike; adjust fields with struct update syntax
pub fn vehicle(id: &str, price: u64) -> VehicleRecord {
    VehicleRecord {
        id: id.to_string(),
        name: format!("Vehicle {id}"),
        brand: "Test".to_string(),
        price,
        original_price: None,
        image: None,
        rating: 4.0,
        reviews: 0,
        mileage: 40.0,
        fuel_type: "Petrol".to_string(),
        engine_capacity: Some(150),
        category: Category::Bike,
        is_new: false,
        discount: None,
        description: String::new(),
        specifications: IndexMap::new(),
        created_at: None,
    }
}

pub fn at(rfc3339: &str) -> Option<DateTime<Utc>> {
    Some(
        DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid timestamp")
            .with_timezone(&Utc),
    )
}

/// Ids of a result, in order
pub fn ids(vehicles: &[VehicleRecord]) -> Vec<String> {
    vehicles.iter().map(|v| v.id.clone()).collect()
}
