//! Tests for configuration loading

use std::io::Write;
use std::time::Duration;

use motomart::config::{DEFAULT_TIME_SLOTS, StorefrontConfig};
use motomart::core::query::PriceRange;

#[test]
fn test_empty_document_uses_defaults() {
    let config = StorefrontConfig::from_yaml_str("").unwrap();
    assert_eq!(config, StorefrontConfig::default());
    assert_eq!(config.bookings.time_slots, DEFAULT_TIME_SLOTS);
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let yaml = r#"
search:
  debounce_ms: 150
listings:
  price_max: 750000
"#;
    let config = StorefrontConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(config.debounce(), Duration::from_millis(150));
    assert_eq!(config.listings.price_range(), PriceRange::new(0, 750_000));
    assert_eq!(config.listings.storage_key, "userListings");
    assert_eq!(config.browse.price_step, 10_000);
    assert_eq!(config.bookings.similar_limit, 3);
}

#[test]
fn test_seller_credentials() {
    let yaml = r#"
seller:
  email: seller@example.com
  password: from-config
"#;
    let config = StorefrontConfig::from_yaml_str(yaml).unwrap();
    let seller = config.seller.unwrap();
    assert_eq!(seller.email, "seller@example.com");
    assert_eq!(seller.password, "from-config");
}

#[test]
fn test_invalid_values_are_rejected() {
    let reversed = "browse:\n  price_min: 500\n  price_max: 100\n";
    let err = StorefrontConfig::from_yaml_str(reversed).unwrap_err();
    assert!(err.to_string().contains("browse.price_min"));

    let no_slots = "bookings:\n  time_slots: []\n";
    assert!(StorefrontConfig::from_yaml_str(no_slots).is_err());

    let same_keys = "bookings:\n  storage_key: userListings\n";
    assert!(StorefrontConfig::from_yaml_str(same_keys).is_err());

    let not_yaml = "search: [unclosed";
    assert!(StorefrontConfig::from_yaml_str(not_yaml).is_err());
}

#[test]
fn test_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "storage:\n  dir: /tmp/motomart").unwrap();

    let config = StorefrontConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(
        config.storage.dir.as_deref(),
        Some(std::path::Path::new("/tmp/motomart"))
    );

    assert!(StorefrontConfig::from_yaml_file("/definitely/not/here.yaml").is_err());
}
