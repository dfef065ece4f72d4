//! Core module containing the fundamental traits and types of the storefront

pub mod auth;
pub mod debounce;
pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod query;
pub mod store;
pub mod vehicle;

pub use auth::{IdentityProvider, MockIdentityProvider, SellerCredentials, SellerGate, User};
pub use debounce::Debouncer;
pub use entity::{Entity, Vehicle};
pub use error::{
    AuthError, BookingError, CatalogError, ConfigError, ErrorResponse, ListingError, MartError,
    MartResult, StorageError,
};
pub use events::{EventBus, EventEnvelope, RecordEvent, StoreEvent};
pub use field::FieldFormat;
pub use query::{CategoryFilter, PriceBracket, PriceRange, QuerySpec, SortKey};
pub use store::QueryableStore;
pub use vehicle::{Category, ELECTRIC, VehicleRecord};
