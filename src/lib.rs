//! # motomart
//!
//! Storefront core for a two-wheeler marketplace: catalog search, filtering,
//! sorting and grouping, plus the local "sell your bike" listings and
//! test-ride bookings around them.
//!
//! ## Features
//!
//! - **Query engine**: text, category, `ev` fuel aliasing, price brackets and
//!   slider ranges, composed with AND
//! - **Stable sorts**: newest, oldest, price ascending and descending
//! - **Grouping**: ordered sections by stored category
//! - **Live search**: debounced recomputation, last input wins
//! - **Listings and bookings**: validated local records kept in local storage
//! - **Identity**: pluggable provider trait with a development mock
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use motomart::prelude::*;
//!
//! let catalog = Arc::new(Catalog::seeded()?);
//! let mut storefront = Storefront::new(catalog.clone());
//!
//! // Electric vehicles between 1L and 2L, cheapest first
//! let spec = QuerySpec::from_params("", "ev", "1l-2l");
//! let result = storefront.browse(&spec, SortKey::from_param("price-low-high"));
//! println!("{}", result.summary());
//!
//! // Sectioned by category for the "view all" page
//! for (category, vehicles) in storefront.browse_grouped(&QuerySpec::new(), None) {
//!     println!("{}: {}", category.display_name(), vehicles.len());
//! }
//! ```

pub mod bookings;
pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod listings;
pub mod search;
pub mod storage;
pub mod storefront;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{IdentityProvider, MockIdentityProvider, SellerCredentials, SellerGate, User},
        debounce::Debouncer,
        entity::{Entity, Vehicle},
        error::{
            AuthError, BookingError, CatalogError, ConfigError, ListingError, MartError,
            MartResult, StorageError,
        },
        events::{EventBus, EventEnvelope, RecordEvent, StoreEvent},
        field::FieldFormat,
        query::{CategoryFilter, PriceBracket, PriceRange, QuerySpec, SortKey},
        store::QueryableStore,
        vehicle::{Category, ELECTRIC, VehicleRecord},
    };

    // === Engine ===
    pub use crate::engine::{Groups, filter, group, sort, sort_by_param};

    // === Catalog & storefront ===
    pub use crate::catalog::{Catalog, CategoryPage};
    pub use crate::search::{LiveSearch, SearchOutcome};
    pub use crate::storefront::{BrowseResult, Storefront};

    // === Listings & bookings ===
    pub use crate::bookings::{Booking, BookingBook, BookingRequest};
    pub use crate::listings::{Listing, ListingBook, ListingDraft, ListingStats};

    // === Storage ===
    pub use crate::storage::{FileLocalStore, InMemoryLocalStore, LocalStore, LocalStoreExt};

    // === Config ===
    pub use crate::config::StorefrontConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
