//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Every error carries a stable code
//! - User errors are told apart from infrastructure errors
//! - Error responses are properly formatted
//! - Error matching allows callers to handle specific cases

use chrono::NaiveDate;
use motomart::core::error::ErrorResponse;
use motomart::prelude::*;

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_catalog_codes() {
        let cases: Vec<(MartError, &str)> = vec![
            (CatalogError::NotFound { id: "1".into() }.into(), "VEHICLE_NOT_FOUND"),
            (CatalogError::DuplicateId { id: "1".into() }.into(), "DUPLICATE_VEHICLE_ID"),
            (
                CatalogError::InvalidOriginalPrice {
                    id: "1".into(),
                    price: 2,
                    original_price: 1,
                }
                .into(),
                "INVALID_ORIGINAL_PRICE",
            ),
            (CatalogError::Seed { message: "bad".into() }.into(), "CATALOG_SEED_ERROR"),
        ];
        for (err, code) in cases {
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn test_booking_codes() {
        let err: MartError = BookingError::SlotUnavailable {
            vehicle_id: "9".into(),
            date: NaiveDate::from_ymd_opt(2031, 1, 1).unwrap(),
            time: "10:00 AM".into(),
        }
        .into();
        assert_eq!(err.error_code(), "SLOT_UNAVAILABLE");
        assert_eq!(
            err.to_string(),
            "the 10:00 AM slot on 2031-01-01 is already booked for vehicle '9', please choose another time"
        );

        let err: MartError = BookingError::NotFound { id: Uuid::nil() }.into();
        assert_eq!(err.error_code(), "BOOKING_NOT_FOUND");
    }

    #[test]
    fn test_infrastructure_codes() {
        let err: MartError = ConfigError::InvalidValue {
            field: "search.debounce_ms",
            message: "too large".into(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let err: MartError = StorageError::InvalidKey { key: "../x".into() }.into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}

// =============================================================================
// Classification Tests
// =============================================================================

mod classification_tests {
    use super::*;

    #[test]
    fn test_form_errors_are_user_errors() {
        let listing: MartError = ListingError::MissingFields { fields: vec!["name"] }.into();
        let auth: MartError = AuthError::SellerAccessDenied.into();
        assert!(listing.is_user_error());
        assert!(auth.is_user_error());
    }

    #[test]
    fn test_seed_errors_are_not_user_errors() {
        let err: MartError = CatalogError::DuplicateId { id: "1".into() }.into();
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_storage_io_keeps_source() {
        use std::error::Error;

        let err = StorageError::Io {
            key: "userListings".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("userListings"));
    }
}

// =============================================================================
// Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_response_body() {
        let err: MartError = ListingError::NotFound { id: "abc".into() }.into();
        let response: ErrorResponse = err.to_response();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], "LISTING_NOT_FOUND");
        assert_eq!(json["message"], "listing with id 'abc' not found");
    }

    #[test]
    fn test_matching_specific_cases() {
        let err: MartError = BookingError::UnknownSlot { time: "10:30 AM".into() }.into();
        let hint = match &err {
            MartError::Booking(BookingError::UnknownSlot { time }) => {
                format!("{time} is not offered")
            }
            _ => "other".to_string(),
        };
        assert_eq!(hint, "10:30 AM is not offered");
    }

    #[test]
    fn test_anyhow_interop() {
        fn load() -> anyhow::Result<()> {
            Err(AuthError::NotSignedIn.into())
        }
        let err = load().unwrap_err();
        assert!(err.downcast_ref::<AuthError>().is_some());
    }
}
