//! Configuration loading and management
//!
//! Every section has defaults, so an empty YAML document is a valid
//! configuration:
//!
//! ```yaml
//! search:
//!   debounce_ms: 300
//! browse:
//!   price_min: 0
//!   price_max: 1000000
//!   price_step: 10000
//! listings:
//!   price_min: 0
//!   price_max: 500000
//!   storage_key: userListings
//! bookings:
//!   storage_key: testRideBookings
//!   similar_price_window: 50000
//!   similar_limit: 3
//! storage:
//!   dir: ./motomart-data
//! seller:
//!   email: seller@example.com
//!   password: change-me
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{SIMILAR_LIMIT, SIMILAR_PRICE_WINDOW};
use crate::core::auth::SellerCredentials;
use crate::core::error::ConfigError;
use crate::core::query::PriceRange;

/// Time slots offered for test rides, in display order
pub const DEFAULT_TIME_SLOTS: [&str; 9] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM",
    "04:00 PM", "05:00 PM",
];

/// Live search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a typed query is applied
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

/// Price slider of the "view all vehicles" page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub price_min: u64,
    pub price_max: u64,
    pub price_step: u64,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            price_min: 0,
            price_max: 1_000_000,
            price_step: 10_000,
        }
    }
}

impl BrowseConfig {
    pub fn price_range(&self) -> PriceRange {
        PriceRange::new(self.price_min, self.price_max)
    }

    /// Clamp a slider value into the range and round it to the nearest step
    pub fn snap(&self, value: u64) -> u64 {
        let clamped = value.clamp(self.price_min, self.price_max);
        let step = self.price_step.max(1);
        let offset = clamped - self.price_min;
        let snapped = self.price_min + (offset + step / 2) / step * step;
        snapped.min(self.price_max)
    }
}

/// "Sell your bike" listing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingsConfig {
    pub price_min: u64,
    pub price_max: u64,
    pub storage_key: String,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            price_min: 0,
            price_max: 500_000,
            storage_key: "userListings".to_string(),
        }
    }
}

impl ListingsConfig {
    pub fn price_range(&self) -> PriceRange {
        PriceRange::new(self.price_min, self.price_max)
    }
}

/// Test-ride booking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingsConfig {
    pub time_slots: Vec<String>,
    pub storage_key: String,
    /// Suggested vehicles must be priced strictly closer than this
    pub similar_price_window: u64,
    pub similar_limit: usize,
}

impl Default for BookingsConfig {
    fn default() -> Self {
        Self {
            time_slots: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
            storage_key: "testRideBookings".to_string(),
            similar_price_window: SIMILAR_PRICE_WINDOW,
            similar_limit: SIMILAR_LIMIT,
        }
    }
}

/// Local storage location
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for file-backed storage; in-memory when absent
    pub dir: Option<PathBuf>,
}

/// Complete storefront configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub search: SearchConfig,
    pub browse: BrowseConfig,
    pub listings: ListingsConfig,
    pub bookings: BookingsConfig,
    pub storage: StorageConfig,

    /// Seller gate credentials; development mode when absent
    pub seller: Option<SellerCredentials>,
}

impl StorefrontConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.browse.price_min > self.browse.price_max {
            return Err(ConfigError::InvalidValue {
                field: "browse.price_min",
                message: "must not exceed browse.price_max".to_string(),
            });
        }
        if self.browse.price_step == 0 {
            return Err(ConfigError::InvalidValue {
                field: "browse.price_step",
                message: "must be positive".to_string(),
            });
        }
        if self.listings.price_min > self.listings.price_max {
            return Err(ConfigError::InvalidValue {
                field: "listings.price_min",
                message: "must not exceed listings.price_max".to_string(),
            });
        }
        if self.bookings.time_slots.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bookings.time_slots",
                message: "at least one slot is required".to_string(),
            });
        }
        if let Some(duplicate) = self
            .bookings
            .time_slots
            .iter()
            .enumerate()
            .find(|(i, slot)| self.bookings.time_slots[..*i].contains(slot))
            .map(|(_, slot)| slot)
        {
            return Err(ConfigError::InvalidValue {
                field: "bookings.time_slots",
                message: format!("slot '{duplicate}' is listed twice"),
            });
        }
        for (field, key) in [
            ("listings.storage_key", &self.listings.storage_key),
            ("bookings.storage_key", &self.bookings.storage_key),
        ] {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: "must not be empty".to_string(),
                });
            }
        }
        if self.listings.storage_key == self.bookings.storage_key {
            return Err(ConfigError::InvalidValue {
                field: "bookings.storage_key",
                message: "must differ from listings.storage_key".to_string(),
            });
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
