//! Stable ordering by one of the fixed sort keys

use crate::core::entity::Vehicle;
use crate::core::query::SortKey;

/// Creation time assumed for records without a timestamp (2020-01-01T00:00:00Z)
pub const DEFAULT_CREATED_AT_MILLIS: i64 = 1_577_836_800_000;

/// Order a collection by `key`
///
/// `Vec::sort_by` is stable, so records comparing equal keep their input
/// order for every key.
pub fn sort<V: Vehicle>(mut vehicles: Vec<V>, key: SortKey) -> Vec<V> {
    match key {
        SortKey::PriceLowHigh => vehicles.sort_by_key(|v| v.price()),
        SortKey::PriceHighLow => vehicles.sort_by(|a, b| b.price().cmp(&a.price())),
        SortKey::Newest => vehicles.sort_by(|a, b| created_millis(b).cmp(&created_millis(a))),
        SortKey::Oldest => vehicles.sort_by_key(created_millis),
    }

    vehicles
}

/// Order a collection by a raw sort value; unknown values keep input order
pub fn sort_by_param<V: Vehicle>(vehicles: Vec<V>, key: &str) -> Vec<V> {
    match SortKey::from_param(key) {
        Some(key) => sort(vehicles, key),
        None => {
            tracing::debug!(sort = key, "unknown sort key, keeping input order");
            vehicles
        }
    }
}

fn created_millis<V: Vehicle>(vehicle: &V) -> i64 {
    vehicle
        .created_at()
        .map(|at| at.timestamp_millis())
        .unwrap_or(DEFAULT_CREATED_AT_MILLIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::vehicle::{Category, VehicleRecord};
    use chrono::{DateTime, TimeZone, Utc};
    use indexmap::IndexMap;

    fn vehicle(id: &str, price: u64, created_at: Option<DateTime<Utc>>) -> VehicleRecord {
        VehicleRecord {
            id: id.to_string(),
            name: format!("Vehicle {id}"),
            brand: "Test".to_string(),
            price,
            original_price: None,
            image: None,
            rating: 4.0,
            reviews: 1,
            mileage: 40.0,
            fuel_type: "Petrol".to_string(),
            engine_capacity: Some(150),
            category: Category::Bike,
            is_new: false,
            discount: None,
            description: String::new(),
            specifications: IndexMap::new(),
            created_at,
        }
    }

    fn ids(vehicles: &[VehicleRecord]) -> Vec<&str> {
        vehicles.iter().map(|v| v.id()).collect()
    }

    #[test]
    fn test_default_epoch_matches_2020() {
        let epoch = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(epoch.timestamp_millis(), DEFAULT_CREATED_AT_MILLIS);
    }

    #[test]
    fn test_price_high_low() {
        let input = vec![
            vehicle("a", 68000, None),
            vehicle("b", 520000, None),
            vehicle("c", 125000, None),
        ];
        let sorted = sort(input, SortKey::PriceHighLow);
        let prices: Vec<u64> = sorted.iter().map(|v| v.price).collect();
        assert_eq!(prices, vec![520000, 125000, 68000]);
    }

    #[test]
    fn test_equal_prices_keep_input_order() {
        let input = vec![
            vehicle("x", 125000, None),
            vehicle("low", 75000, None),
            vehicle("y", 125000, None),
        ];

        let asc = sort(input.clone(), SortKey::PriceLowHigh);
        assert_eq!(ids(&asc), vec!["low", "x", "y"]);

        let desc = sort(input, SortKey::PriceHighLow);
        assert_eq!(ids(&desc), vec!["x", "y", "low"]);
    }

    #[test]
    fn test_missing_timestamps_sort_as_default_epoch() {
        let before = Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let input = vec![
            vehicle("none-1", 1, None),
            vehicle("old", 1, Some(before)),
            vehicle("new", 1, Some(after)),
            vehicle("none-2", 1, None),
        ];

        let newest = sort(input.clone(), SortKey::Newest);
        assert_eq!(ids(&newest), vec!["new", "none-1", "none-2", "old"]);

        let oldest = sort(input, SortKey::Oldest);
        assert_eq!(ids(&oldest), vec!["old", "none-1", "none-2", "new"]);
    }

    #[test]
    fn test_unknown_param_is_identity() {
        let input = vec![vehicle("b", 2, None), vehicle("a", 1, None)];
        assert_eq!(sort_by_param(input.clone(), "rating-desc"), input);
    }
}
