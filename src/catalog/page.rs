//! Named category pages of the storefront navigation

use serde::{Deserialize, Serialize};

use crate::core::entity::Vehicle;
use crate::core::vehicle::{Category, VehicleRecord};

/// Minimum displacement for a bike to show on the sport bikes page
pub const SPORT_BIKE_MIN_CC: u32 = 200;

/// A category page, resolved from its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", content = "name", rename_all = "kebab-case")]
pub enum CategoryPage {
    /// "Electric Vehicles": anything running on electricity
    ElectricVehicles,
    /// "Sport Bikes": bikes of at least [`SPORT_BIKE_MIN_CC`]
    SportBikes,
    /// "Scooters"
    Scooters,
    /// "Upcoming Launches": the whole catalog for now
    UpcomingLaunches,
    /// Any other name, matched against the stored category in lowercase
    Named(String),
}

impl CategoryPage {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Electric Vehicles" => CategoryPage::ElectricVehicles,
            "Sport Bikes" => CategoryPage::SportBikes,
            "Scooters" => CategoryPage::Scooters,
            "Upcoming Launches" => CategoryPage::UpcomingLaunches,
            other => CategoryPage::Named(other.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CategoryPage::ElectricVehicles => "Electric Vehicles",
            CategoryPage::SportBikes => "Sport Bikes",
            CategoryPage::Scooters => "Scooters",
            CategoryPage::UpcomingLaunches => "Upcoming Launches",
            CategoryPage::Named(name) => name,
        }
    }

    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        match self {
            CategoryPage::ElectricVehicles => vehicle.is_electric(),
            CategoryPage::SportBikes => {
                vehicle.category == Category::Bike
                    && vehicle
                        .engine_capacity
                        .is_some_and(|cc| cc >= SPORT_BIKE_MIN_CC)
            }
            CategoryPage::Scooters => vehicle.category == Category::Scooter,
            CategoryPage::UpcomingLaunches => true,
            CategoryPage::Named(name) => {
                Category::from_param(&name.to_lowercase()) == Some(vehicle.category)
            }
        }
    }
}
