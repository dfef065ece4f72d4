//! Listing records and the form they are created from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Vehicle};
use crate::core::error::ListingError;
use crate::core::vehicle::{Category, ELECTRIC};

/// A vehicle a user put up for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: u64,
    pub year: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f32>,

    #[serde(default)]
    pub fuel_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_capacity: Option<u32>,

    #[serde(default)]
    pub description: String,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Turn the listing back into form values, for editing
    pub fn to_draft(&self) -> ListingDraft {
        ListingDraft {
            name: self.name.clone(),
            brand: self.brand.clone(),
            price: self.price.to_string(),
            year: self.year.to_string(),
            mileage: self.mileage.map(|m| m.to_string()).unwrap_or_default(),
            fuel_type: self.fuel_type.clone(),
            engine_capacity: self
                .engine_capacity
                .map(|cc| cc.to_string())
                .unwrap_or_default(),
            description: self.description.clone(),
            category: self.category.as_str().to_string(),
            image: self.image.clone(),
        }
    }
}

impl Entity for Listing {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Vehicle for Listing {
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

/// Raw values of the "sell your bike" form
///
/// Numbers arrive as text. `name`, `brand`, `price` and `year` are required;
/// the other numeric fields may be left blank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingDraft {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub year: String,
    pub mileage: String,
    pub fuel_type: String,
    pub engine_capacity: String,
    pub description: String,
    /// `bike`, `scooter` or `ev`; blank means `bike`
    pub category: String,
    pub image: Option<String>,
}

/// Draft values after validation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidDraft {
    pub name: String,
    pub brand: String,
    pub price: u64,
    pub year: u16,
    pub mileage: Option<f32>,
    pub fuel_type: String,
    pub engine_capacity: Option<u32>,
    pub description: String,
    pub category: Category,
    pub image: Option<String>,
}

impl ValidDraft {
    pub fn into_listing(self, id: String, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            name: self.name,
            brand: self.brand,
            price: self.price,
            year: self.year,
            mileage: self.mileage,
            fuel_type: self.fuel_type,
            engine_capacity: self.engine_capacity,
            description: self.description,
            category: self.category,
            image: self.image,
            created_at,
        }
    }
}

impl ListingDraft {
    /// Check the form without keeping the parsed values
    pub fn validate(&self) -> Result<(), ListingError> {
        self.parse().map(|_| ())
    }

    pub(crate) fn parse(&self) -> Result<ValidDraft, ListingError> {
        let required = [
            ("name", &self.name),
            ("brand", &self.brand),
            ("price", &self.price),
            ("year", &self.year),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(ListingError::MissingFields { fields: missing });
        }

        // `ev` is offered by the form but is not a stored category
        let (category, fuel_type) = match self.category.trim() {
            "" => (Category::Bike, self.fuel_type.trim().to_string()),
            "ev" => (Category::Bike, ELECTRIC.to_string()),
            other => match Category::from_param(other) {
                Some(category) => (category, self.fuel_type.trim().to_string()),
                None => {
                    return Err(ListingError::InvalidCategory {
                        value: other.to_string(),
                    });
                }
            },
        };

        Ok(ValidDraft {
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            price: parse_number("price", &self.price)?,
            year: parse_number("year", &self.year)?,
            mileage: parse_optional("mileage", &self.mileage)?,
            fuel_type,
            engine_capacity: parse_optional("engineCapacity", &self.engine_capacity)?,
            description: self.description.trim().to_string(),
            category,
            image: self.image.clone().filter(|image| !image.trim().is_empty()),
        })
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ListingError> {
    value.trim().parse().map_err(|_| ListingError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_optional<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> Result<Option<T>, ListingError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_number(field, value).map(Some)
    }
}
