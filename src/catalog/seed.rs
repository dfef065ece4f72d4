//! Embedded seed dataset and its invariants

use std::collections::HashSet;

use crate::core::error::CatalogError;
use crate::core::vehicle::VehicleRecord;

/// The dataset every session starts from
pub const SEED_YAML: &str = include_str!("../../data/catalog.yaml");

/// Parse a YAML list of vehicle records
///
/// Unknown stored categories (including `ev`) are rejected here, since
/// [`Category`](crate::core::vehicle::Category) is a closed set.
pub fn parse_records(yaml: &str) -> Result<Vec<VehicleRecord>, CatalogError> {
    serde_yaml::from_str(yaml).map_err(|e| CatalogError::Seed {
        message: e.to_string(),
    })
}

/// Check the catalog invariants: unique ids, `original_price >= price`
pub fn check_invariants(records: &[VehicleRecord]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: record.id.clone(),
            });
        }

        if let Some(original_price) = record.original_price
            && original_price < record.price
        {
            return Err(CatalogError::InvalidOriginalPrice {
                id: record.id.clone(),
                price: record.price,
                original_price,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = r#"
- id: "a"
  name: Alpha
  brand: Acme
  price: 1000
  rating: 4.0
  reviews: 1
  mileage: 40
  fuelType: Petrol
  category: bike
- id: "b"
  name: Beta
  brand: Acme
  price: 2000
  originalPrice: 2500
  rating: 4.0
  reviews: 1
  mileage: 40
  fuelType: Electric
  category: scooter
"#;

    #[test]
    fn test_embedded_dataset_is_valid() {
        let records = parse_records(SEED_YAML).unwrap();
        assert_eq!(records.len(), 15);
        check_invariants(&records).unwrap();
    }

    #[test]
    fn test_parse_defaults_optional_fields() {
        let records = parse_records(TWO_RECORDS).unwrap();
        assert_eq!(records[0].original_price, None);
        assert!(!records[0].is_new);
        assert!(records[0].specifications.is_empty());
        assert_eq!(records[1].original_price, Some(2500));
    }

    #[test]
    fn test_ev_is_not_a_stored_category() {
        let yaml = TWO_RECORDS.replace("category: scooter", "category: ev");
        assert!(matches!(parse_records(&yaml), Err(CatalogError::Seed { .. })));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = TWO_RECORDS.replace("id: \"b\"", "id: \"a\"");
        let records = parse_records(&yaml).unwrap();
        assert!(matches!(
            check_invariants(&records),
            Err(CatalogError::DuplicateId { id }) if id == "a"
        ));
    }

    #[test]
    fn test_original_price_below_price_rejected() {
        let yaml = TWO_RECORDS.replace("originalPrice: 2500", "originalPrice: 1500");
        let records = parse_records(&yaml).unwrap();
        assert!(matches!(
            check_invariants(&records),
            Err(CatalogError::InvalidOriginalPrice { original_price: 1500, .. })
        ));
    }
}
