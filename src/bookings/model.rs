//! Test-ride booking records and requests

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::BookingError;
use crate::core::field::{FieldFormat, normalize_phone};
use crate::core::vehicle::VehicleRecord;

/// Values of the test-ride form
///
/// Every field is required. Presence is checked first, then formats.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub name: String,

    pub phone: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    pub vehicle_id: String,

    pub date: Option<NaiveDate>,

    /// One of the configured time slots, e.g. `10:00 AM`
    pub time: String,
}

impl BookingRequest {
    /// Check presence and format of every field
    pub fn check(&self) -> Result<(), BookingError> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("vehicleId", &self.vehicle_id),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time.trim().is_empty() {
            missing.push("time");
        }
        if !missing.is_empty() {
            return Err(BookingError::MissingFields { fields: missing });
        }

        // Formats are checked on the values a booking would store
        self.trimmed().validate().map_err(|errors| {
            let field = errors
                .field_errors()
                .keys()
                .next()
                .map(|field| field.to_string())
                .unwrap_or_default();
            BookingError::InvalidField {
                field,
                message: errors.to_string(),
            }
        })?;

        if !FieldFormat::Phone.validate(&self.phone) {
            return Err(BookingError::InvalidField {
                field: "phone".to_string(),
                message: FieldFormat::Phone.describe().to_string(),
            });
        }

        Ok(())
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            vehicle_id: self.vehicle_id.trim().to_string(),
            date: self.date,
            time: self.time.trim().to_string(),
        }
    }
}

/// A confirmed test ride
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    /// Phone number without separators
    pub phone: String,
    pub email: String,
    pub vehicle_id: String,
    pub date: NaiveDate,
    pub time: String,
    /// The vehicle as it was when booked
    pub vehicle: VehicleRecord,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub(crate) fn new(request: &BookingRequest, date: NaiveDate, vehicle: VehicleRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            phone: normalize_phone(request.phone.trim()),
            email: request.email.trim().to_string(),
            vehicle_id: vehicle.id.clone(),
            date,
            time: request.time.trim().to_string(),
            vehicle,
            created_at: Utc::now(),
        }
    }

    /// Whether this booking holds the given slot
    pub fn occupies(&self, vehicle_id: &str, date: NaiveDate, time: &str) -> bool {
        self.vehicle_id == vehicle_id && self.date == date && self.time == time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            name: "Asha".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "asha@example.com".to_string(),
            vehicle_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 5, 1),
            time: "10:00 AM".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        request().check().unwrap();
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = BookingRequest::default().check().unwrap_err();
        match err {
            BookingError::MissingFields { fields } => assert_eq!(
                fields,
                vec!["name", "phone", "email", "vehicleId", "date", "time"]
            ),
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_email() {
        let bad = BookingRequest {
            email: "asha-at-example".to_string(),
            ..request()
        };
        assert!(matches!(
            bad.check(),
            Err(BookingError::InvalidField { field, .. }) if field == "email"
        ));
    }

    #[test]
    fn test_surrounding_whitespace_is_accepted() {
        let padded = BookingRequest {
            name: "  Asha ".to_string(),
            email: "asha@example.com ".to_string(),
            ..request()
        };
        padded.check().unwrap();

        let vehicle = crate::catalog::Catalog::seeded()
            .unwrap()
            .require("1")
            .unwrap()
            .clone();
        let booking = Booking::new(&padded, padded.date.unwrap(), vehicle);
        assert_eq!(booking.email, "asha@example.com");
        assert_eq!(booking.name, "Asha");
    }

    #[test]
    fn test_invalid_phone() {
        let bad = BookingRequest {
            phone: "12345".to_string(),
            ..request()
        };
        assert!(matches!(
            bad.check(),
            Err(BookingError::InvalidField { field, .. }) if field == "phone"
        ));
    }
}
