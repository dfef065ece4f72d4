//! Test-ride bookings
//!
//! Each vehicle can be booked once per configured time slot per day.
//! Bookings are kept in local storage and never reach a server.

mod model;

pub use model::{Booking, BookingRequest};

use chrono::{NaiveDate, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::BookingsConfig;
use crate::core::error::{BookingError, MartResult, StorageError};
use crate::core::events::{EventBus, RecordEvent, StoreEvent};
use crate::core::vehicle::VehicleRecord;
use crate::storage::{LocalStore, LocalStoreExt};

/// The user's test-ride bookings, persisted after every change
pub struct BookingBook {
    catalog: Arc<Catalog>,
    store: Arc<dyn LocalStore>,
    key: String,
    time_slots: Vec<String>,
    similar_price_window: u64,
    similar_limit: usize,
    bookings: RwLock<Vec<Booking>>,
    events: Option<EventBus>,
}

impl BookingBook {
    /// Load the bookings saved under the configured key
    pub fn open(
        catalog: Arc<Catalog>,
        store: Arc<dyn LocalStore>,
        config: &BookingsConfig,
    ) -> Result<Self, StorageError> {
        let bookings: Vec<Booking> = store.load(&config.storage_key)?.unwrap_or_default();
        tracing::debug!(
            key = %config.storage_key,
            bookings = bookings.len(),
            "opened booking book"
        );

        Ok(Self {
            catalog,
            store,
            key: config.storage_key.clone(),
            time_slots: config.time_slots.clone(),
            similar_price_window: config.similar_price_window,
            similar_limit: config.similar_limit,
            bookings: RwLock::new(bookings),
            events: None,
        })
    }

    /// Publish record events on `bus` for every change
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    /// Configured slots still free for a vehicle on a date, in slot order
    pub fn available_slots(&self, vehicle_id: &str, date: NaiveDate) -> Vec<String> {
        let bookings = self.read();
        self.time_slots
            .iter()
            .filter(|slot| {
                !bookings
                    .iter()
                    .any(|booking| booking.occupies(vehicle_id, date, slot))
            })
            .cloned()
            .collect()
    }

    /// Book a test ride, rejecting dates before today
    pub fn book(&self, request: &BookingRequest) -> MartResult<Booking> {
        self.book_as_of(request, Utc::now().date_naive())
    }

    /// Book a test ride as if `today` were the current date
    pub fn book_as_of(&self, request: &BookingRequest, today: NaiveDate) -> MartResult<Booking> {
        request.check()?;

        let vehicle_id = request.vehicle_id.trim();
        let time = request.time.trim();
        let date = request.date.ok_or(BookingError::MissingFields {
            fields: vec!["date"],
        })?;

        let vehicle = self
            .catalog
            .get(vehicle_id)
            .cloned()
            .ok_or_else(|| BookingError::UnknownVehicle {
                vehicle_id: vehicle_id.to_string(),
            })?;

        if !self.time_slots.iter().any(|slot| slot == time) {
            return Err(BookingError::UnknownSlot {
                time: time.to_string(),
            }
            .into());
        }

        if date < today {
            return Err(BookingError::InvalidField {
                field: "date".to_string(),
                message: format!("{date} is in the past"),
            }
            .into());
        }

        let booking = Booking::new(request, date, vehicle);

        let mut bookings = self.bookings.write().map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;
        // Checked under the write lock so two requests cannot take one slot
        if bookings
            .iter()
            .any(|existing| existing.occupies(vehicle_id, date, time))
        {
            tracing::debug!(vehicle_id, %date, time, "slot already booked");
            return Err(BookingError::SlotUnavailable {
                vehicle_id: vehicle_id.to_string(),
                date,
                time: time.to_string(),
            }
            .into());
        }

        let mut next = bookings.clone();
        next.push(booking.clone());
        self.store.save(&self.key, &next)?;
        *bookings = next;
        drop(bookings);

        tracing::info!(
            booking_id = %booking.id,
            vehicle_id = %booking.vehicle_id,
            date = %booking.date,
            time = %booking.time,
            "test ride booked"
        );
        self.publish(RecordEvent::Created {
            record_type: "booking".to_string(),
            record_id: booking.id.to_string(),
            data: RecordEvent::payload("booking", &booking.id.to_string(), &booking),
        });
        Ok(booking)
    }

    pub fn cancel(&self, id: Uuid) -> MartResult<Booking> {
        let mut bookings = self.bookings.write().map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;

        let position = bookings
            .iter()
            .position(|booking| booking.id == id)
            .ok_or(BookingError::NotFound { id })?;

        let mut next = bookings.clone();
        let cancelled = next.remove(position);
        self.store.save(&self.key, &next)?;
        *bookings = next;
        drop(bookings);

        tracing::info!(booking_id = %id, "test ride cancelled");
        self.publish(RecordEvent::Deleted {
            record_type: "booking".to_string(),
            record_id: id.to_string(),
        });
        Ok(cancelled)
    }

    pub fn get(&self, id: Uuid) -> Option<Booking> {
        self.read().iter().find(|booking| booking.id == id).cloned()
    }

    /// All bookings, by date then slot order
    pub fn list(&self) -> Vec<Booking> {
        let mut bookings = self.read().clone();
        bookings.sort_by_key(|booking| (booking.date, self.slot_position(&booking.time)));
        bookings
    }

    /// Bookings of one vehicle, by date then slot order
    pub fn for_vehicle(&self, vehicle_id: &str) -> Vec<Booking> {
        self.list()
            .into_iter()
            .filter(|booking| booking.vehicle_id == vehicle_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Current catalog entry of a booked vehicle, or the snapshot taken at booking time
    pub fn vehicle_for(&self, booking: &Booking) -> VehicleRecord {
        self.catalog
            .get(&booking.vehicle_id)
            .cloned()
            .unwrap_or_else(|| booking.vehicle.clone())
    }

    /// Alternatives to offer next to a booking; empty for unknown vehicles
    pub fn suggest_similar(&self, vehicle_id: &str) -> Vec<VehicleRecord> {
        self.catalog
            .similar_to(vehicle_id, self.similar_price_window, self.similar_limit)
            .unwrap_or_default()
    }

    fn slot_position(&self, time: &str) -> usize {
        self.time_slots
            .iter()
            .position(|slot| slot == time)
            .unwrap_or(self.time_slots.len())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Booking>> {
        self.bookings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: RecordEvent) {
        if let Some(bus) = &self.events {
            bus.publish(StoreEvent::Record(event));
        }
    }
}
