//! Macro-generated test suite for `LocalStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use motomart::storage::InMemoryLocalStore;
//!
//! local_store_tests!(InMemoryLocalStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_missing_key_loads_none`
//! - `test_save_then_load`
//! - `test_save_replaces`
//! - `test_remove`
//! - `test_keys_are_independent`
//! - `test_invalid_keys_rejected`
//! - `test_corrupt_value_reports_key`

/// Generate a full `LocalStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test to keep them isolated.
#[macro_export]
macro_rules! local_store_tests {
    ($factory:expr) => {
        mod local_store_contract_tests {
            use super::*;
            use motomart::core::error::StorageError;
            use motomart::storage::{LocalStore, LocalStoreExt};

            #[test]
            fn test_missing_key_loads_none() {
                let store = $factory;
                assert_eq!(store.load_raw("absent").unwrap(), None);
                assert_eq!(store.load::<Vec<String>>("absent").unwrap(), None);
            }

            #[test]
            fn test_save_then_load() {
                let store = $factory;
                let value = vec!["pulsar".to_string(), "duke".to_string()];
                store.save("userListings", &value).unwrap();
                assert_eq!(store.load::<Vec<String>>("userListings").unwrap(), Some(value));
            }

            #[test]
            fn test_save_replaces() {
                let store = $factory;
                store.save("counter", &1u32).unwrap();
                store.save("counter", &2u32).unwrap();
                assert_eq!(store.load::<u32>("counter").unwrap(), Some(2));
            }

            #[test]
            fn test_remove() {
                let store = $factory;
                store.save("gone", &true).unwrap();
                assert!(store.remove("gone").unwrap());
                assert!(!store.remove("gone").unwrap());
                assert_eq!(store.load::<bool>("gone").unwrap(), None);
            }

            #[test]
            fn test_keys_are_independent() {
                let store = $factory;
                store.save("userListings", &1u8).unwrap();
                store.save("testRideBookings", &2u8).unwrap();
                store.remove("userListings").unwrap();
                assert_eq!(store.load::<u8>("testRideBookings").unwrap(), Some(2));
            }

            #[test]
            fn test_invalid_keys_rejected() {
                let store = $factory;
                for key in ["", "../up", "a/b", ".hidden"] {
                    assert!(
                        matches!(store.save_raw(key, "1"), Err(StorageError::InvalidKey { .. })),
                        "key {key:?} should be rejected"
                    );
                }
            }

            #[test]
            fn test_corrupt_value_reports_key() {
                let store = $factory;
                store.save_raw("broken", "[1, 2").unwrap();
                match store.load::<Vec<u8>>("broken") {
                    Err(StorageError::Serialization { key, .. }) => assert_eq!(key, "broken"),
                    other => panic!("expected Serialization error, got {other:?}"),
                }
            }
        }
    };
}
