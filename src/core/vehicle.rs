//! Catalog vehicle record and its stored category

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::entity::{Entity, Vehicle};

/// Fuel type value that marks a vehicle as electric.
///
/// Electric vehicles form the `ev` pseudo-category at filter time; they are
/// never stored under a category of their own.
pub const ELECTRIC: &str = "Electric";

/// Stored vehicle category
///
/// This is a closed set. `ev` is deliberately not a variant: it is derived
/// from the fuel type by the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bike,
    Scooter,
}

impl Category {
    /// All stored categories, in display order
    pub const ALL: [Category; 2] = [Category::Bike, Category::Scooter];

    /// Raw category label as stored on records
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bike => "bike",
            Category::Scooter => "scooter",
        }
    }

    /// Parse a stored label. Matching is exact and case-sensitive.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "bike" => Some(Category::Bike),
            "scooter" => Some(Category::Scooter),
            _ => None,
        }
    }

    /// Heading used for a sectioned listing of this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Bike => "Bikes",
            Category::Scooter => "Scooters",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle in the catalog
///
/// Records are seeded once per session and never mutated afterwards.
/// Field names serialize in camelCase to match the seed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub name: String,
    pub brand: String,

    /// Price in whole rupees
    pub price: u64,

    /// Pre-discount price, only present when a discount applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub rating: f32,
    pub reviews: u32,

    /// km per litre, or km per charge for electric vehicles
    pub mileage: f32,

    pub fuel_type: String,

    /// Engine displacement in cc, absent for electric vehicles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_capacity: Option<u32>,

    pub category: Category,

    #[serde(default)]
    pub is_new: bool,

    /// Discount percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub specifications: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl VehicleRecord {
    /// Unit for the mileage figure
    pub fn mileage_unit(&self) -> &'static str {
        if self.is_electric() { "km/charge" } else { "kmpl" }
    }

    /// Amount saved against the original price, if discounted
    pub fn savings(&self) -> Option<u64> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }
}

impl Entity for VehicleRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Vehicle for VehicleRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn price(&self) -> u64 {
        self.price
    }

    fn category(&self) -> Category {
        self.category
    }

    fn fuel_type(&self) -> &str {
        &self.fuel_type
    }
}
