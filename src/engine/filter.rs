//! Multi-predicate filtering
//!
//! Predicates compose with AND. A criterion that is absent, empty or
//! unrecognised never narrows the result.

use crate::core::entity::Vehicle;
use crate::core::query::QuerySpec;

/// Check a single record against every criterion of a spec
pub fn matches<V: Vehicle>(vehicle: &V, spec: &QuerySpec) -> bool {
    matches_with_needle(vehicle, spec, spec.needle().as_deref())
}

/// Return the records matching `spec`, in input order
///
/// The input is left untouched; matching records are cloned into a new
/// collection. No match yields an empty vector.
pub fn filter<V: Vehicle>(vehicles: &[V], spec: &QuerySpec) -> Vec<V> {
    // Lowercase the needle once instead of per record
    let needle = spec.needle();

    let result: Vec<V> = vehicles
        .iter()
        .filter(|vehicle| matches_with_needle(*vehicle, spec, needle.as_deref()))
        .cloned()
        .collect();

    tracing::debug!(
        total = vehicles.len(),
        matched = result.len(),
        category = spec.category.as_param(),
        "filtered vehicles"
    );

    result
}

fn matches_with_needle<V: Vehicle>(vehicle: &V, spec: &QuerySpec, needle: Option<&str>) -> bool {
    matches_text(vehicle, needle)
        && spec.category.matches(vehicle)
        && spec
            .price_bracket
            .is_none_or(|bracket| bracket.contains(vehicle.price()))
        && spec
            .price_range
            .is_none_or(|range| range.contains(vehicle.price()))
}

/// Case-insensitive substring match on name or brand; `needle` is lowercase
fn matches_text<V: Vehicle>(vehicle: &V, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };

    vehicle.name().to_lowercase().contains(needle)
        || vehicle.brand().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{CategoryFilter, PriceBracket, PriceRange};
    use crate::core::vehicle::{Category, ELECTRIC, VehicleRecord};
    use crate::core::entity::Entity;
    use indexmap::IndexMap;

    fn vehicle(
        id: &str,
        name: &str,
        brand: &str,
        price: u64,
        category: Category,
        fuel: &str,
    ) -> VehicleRecord {
        VehicleRecord {
            id: id.to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            price,
            original_price: None,
            image: None,
            rating: 4.0,
            reviews: 10,
            mileage: 40.0,
            fuel_type: fuel.to_string(),
            engine_capacity: None,
            category,
            is_new: false,
            discount: None,
            description: String::new(),
            specifications: IndexMap::new(),
            created_at: None,
        }
    }

    fn fixture() -> Vec<VehicleRecord> {
        vec![
            vehicle("1", "Pulsar NS200", "Bajaj", 125000, Category::Bike, "Petrol"),
            vehicle("2", "Ather 450X", "Ather", 150000, Category::Scooter, ELECTRIC),
            vehicle("3", "Cheap Ride", "Acme", 50000, Category::Bike, "Petrol"),
            vehicle("4", "Budget Ride", "Acme", 49999, Category::Scooter, "Petrol"),
            vehicle("5", "Revolt RV400", "Revolt", 145000, Category::Bike, ELECTRIC),
        ]
    }

    fn ids(vehicles: &[VehicleRecord]) -> Vec<&str> {
        vehicles.iter().map(|v| v.id()).collect()
    }

    #[test]
    fn test_empty_spec_keeps_everything() {
        let all = fixture();
        assert_eq!(filter(&all, &QuerySpec::new()), all);
    }

    #[test]
    fn test_text_matches_name_or_brand_case_insensitive() {
        let all = fixture();

        let by_name = filter(&all, &QuerySpec::new().with_text("pulsar"));
        assert_eq!(ids(&by_name), vec!["1"]);

        let by_brand = filter(&all, &QuerySpec::new().with_text("ACME"));
        assert_eq!(ids(&by_brand), vec!["3", "4"]);
    }

    #[test]
    fn test_whitespace_text_is_no_op() {
        let all = fixture();
        assert_eq!(filter(&all, &QuerySpec::new().with_text("  ")).len(), all.len());
    }

    #[test]
    fn test_ev_cuts_across_categories() {
        let all = fixture();
        let result = filter(&all, &QuerySpec::new().with_category(CategoryFilter::Electric));
        assert_eq!(ids(&result), vec!["2", "5"]);
    }

    #[test]
    fn test_stored_category() {
        let all = fixture();
        let result = filter(
            &all,
            &QuerySpec::new().with_category(CategoryFilter::Stored(Category::Scooter)),
        );
        assert_eq!(ids(&result), vec!["2", "4"]);
    }

    #[test]
    fn test_under_50k_excludes_exactly_50000() {
        let all = fixture();
        let result = filter(&all, &QuerySpec::new().with_price_bracket(PriceBracket::Under50k));
        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let all = fixture();
        let result = filter(
            &all,
            &QuerySpec::new().with_price_range(PriceRange::new(125000, 145000)),
        );
        assert_eq!(ids(&result), vec!["1", "5"]);
    }

    #[test]
    fn test_criteria_compose_with_and() {
        let all = fixture();
        let spec = QuerySpec::new()
            .with_text("r")
            .with_category(CategoryFilter::Electric)
            .with_price_bracket(PriceBracket::From1LTo2L);

        let result = filter(&all, &spec);
        assert_eq!(ids(&result), vec!["2", "5"]);
        assert!(result.iter().all(|v| matches(v, &spec)));
    }

    #[test]
    fn test_no_match_is_empty() {
        let all = fixture();
        assert!(filter(&all, &QuerySpec::new().with_text("harley")).is_empty());
        assert!(filter::<VehicleRecord>(&[], &QuerySpec::new()).is_empty());
    }
}
