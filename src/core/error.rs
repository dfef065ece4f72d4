//! Typed error handling for the storefront
//!
//! The pure query engines never fail. Errors only come from the stateful
//! parts around them: catalog seeding, listing and booking forms, identity,
//! configuration and local storage.
//!
//! # Error Categories
//!
//! - [`CatalogError`]: seeding invariants and unknown vehicle ids
//! - [`ListingError`]: "sell your bike" form validation and lookups
//! - [`BookingError`]: test-ride form validation and slot conflicts
//! - [`AuthError`]: identity provider and seller gate failures
//! - [`ConfigError`]: invalid configuration values
//! - [`StorageError`]: local storage I/O and encoding
//!
//! # Example
//!
//! ```rust,ignore
//! match bookings.book(request) {
//!     Ok(booking) => println!("Booked {}", booking.id),
//!     Err(MartError::Booking(BookingError::SlotUnavailable { time, .. })) => {
//!         println!("{} is taken, pick another slot", time);
//!     }
//!     Err(e) => eprintln!("[{}] {}", e.error_code(), e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the storefront
#[derive(Debug, Error)]
pub enum MartError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Convenience alias used across the crate
pub type MartResult<T> = Result<T, MartError>;

/// Error payload suitable for showing to a user or logging as JSON
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl MartError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MartError::Catalog(e) => e.error_code(),
            MartError::Listing(e) => e.error_code(),
            MartError::Booking(e) => e.error_code(),
            MartError::Auth(e) => e.error_code(),
            MartError::Config(_) => "CONFIG_ERROR",
            MartError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether the user can fix this by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            MartError::Listing(_) | MartError::Booking(_) | MartError::Auth(_)
        ) || matches!(self, MartError::Catalog(CatalogError::NotFound { .. }))
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("vehicle with id '{id}' not found")]
    NotFound { id: String },

    #[error("duplicate vehicle id '{id}' in catalog")]
    DuplicateId { id: String },

    #[error("vehicle '{id}' has original price {original_price} below its price {price}")]
    InvalidOriginalPrice {
        id: String,
        price: u64,
        original_price: u64,
    },

    #[error("failed to parse catalog dataset: {message}")]
    Seed { message: String },
}

impl CatalogError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "VEHICLE_NOT_FOUND",
            CatalogError::DuplicateId { .. } => "DUPLICATE_VEHICLE_ID",
            CatalogError::InvalidOriginalPrice { .. } => "INVALID_ORIGINAL_PRICE",
            CatalogError::Seed { .. } => "CATALOG_SEED_ERROR",
        }
    }
}

// =============================================================================
// Listing Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("please fill in all required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("'{field}' must be a number (got '{value}')")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown listing category '{value}'")]
    InvalidCategory { value: String },

    #[error("listing with id '{id}' not found")]
    NotFound { id: String },
}

impl ListingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ListingError::MissingFields { .. } => "LISTING_MISSING_FIELDS",
            ListingError::InvalidNumber { .. } => "LISTING_INVALID_NUMBER",
            ListingError::InvalidCategory { .. } => "LISTING_INVALID_CATEGORY",
            ListingError::NotFound { .. } => "LISTING_NOT_FOUND",
        }
    }
}

// =============================================================================
// Booking Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("please fill in all required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("no vehicle with id '{vehicle_id}' can be booked")]
    UnknownVehicle { vehicle_id: String },

    #[error("'{time}' is not an offered time slot")]
    UnknownSlot { time: String },

    #[error(
        "the {time} slot on {date} is already booked for vehicle '{vehicle_id}', please choose another time"
    )]
    SlotUnavailable {
        vehicle_id: String,
        date: chrono::NaiveDate,
        time: String,
    },

    #[error("booking with id '{id}' not found")]
    NotFound { id: Uuid },
}

impl BookingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::MissingFields { .. } => "BOOKING_MISSING_FIELDS",
            BookingError::InvalidField { .. } => "BOOKING_INVALID_FIELD",
            BookingError::UnknownVehicle { .. } => "BOOKING_UNKNOWN_VEHICLE",
            BookingError::UnknownSlot { .. } => "BOOKING_UNKNOWN_SLOT",
            BookingError::SlotUnavailable { .. } => "SLOT_UNAVAILABLE",
            BookingError::NotFound { .. } => "BOOKING_NOT_FOUND",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("sign in required")]
    NotSignedIn,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("seller access has not been granted")]
    SellerAccessDenied,

    #[error("identity provider error: {message}")]
    Provider { message: String },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotSignedIn => "NOT_SIGNED_IN",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::SellerAccessDenied => "SELLER_ACCESS_DENIED",
            AuthError::Provider { .. } => "IDENTITY_PROVIDER_ERROR",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage key '{key}' is not valid")]
    InvalidKey { key: String },

    #[error("failed to access storage key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode or decode storage key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to acquire storage lock: {message}")]
    Lock { message: String },
}
