//! Internal event system for storefront notifications
//!
//! The EventBus uses `tokio::sync::broadcast` to decouple state changes
//! (wishlist toggles, searches, listing and booking mutations, sign-in and
//! sign-out) from whatever wants to react to them.
//!
//! # Architecture
//!
//! ```text
//! Storefront ───┐
//! LiveSearch ───┤
//! ListingBook ──┼──▶ EventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! BookingBook ──┤
//! SellerGate ───┘  (session changes it watches)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let event_bus = EventBus::new(256);
//! let mut rx = event_bus.subscribe();
//!
//! event_bus.publish(StoreEvent::Wishlist {
//!     vehicle_id: "1".to_string(),
//!     wishlisted: true,
//! });
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("Received: {:?}", envelope.event);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::core::query::QuerySpec;

/// Mutations of locally stored records (listings, bookings)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RecordEvent {
    /// A record was created
    Created {
        record_type: String,
        record_id: String,
        data: serde_json::Value,
    },
    /// A record was updated
    Updated {
        record_type: String,
        record_id: String,
        data: serde_json::Value,
    },
    /// A record was deleted
    Deleted {
        record_type: String,
        record_id: String,
    },
}

impl RecordEvent {
    /// Snapshot of a record for `Created`/`Updated` payloads
    ///
    /// A record that fails to serialize is reported and sent as `null`.
    pub fn payload<T: Serialize>(
        record_type: &str,
        record_id: &str,
        record: &T,
    ) -> serde_json::Value {
        serde_json::to_value(record).unwrap_or_else(|e| {
            tracing::warn!(
                record_type,
                record_id,
                error = %e,
                "failed to serialize event payload"
            );
            serde_json::Value::Null
        })
    }
}

/// Top-level storefront event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A listing or booking changed
    Record(RecordEvent),

    /// A vehicle was added to or removed from the wishlist
    Wishlist { vehicle_id: String, wishlisted: bool },

    /// Search results were recomputed
    Search { query: QuerySpec, matched: usize },

    /// The signed-in user changed (`None` after sign-out)
    Session { user_id: Option<String> },
}

impl StoreEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            StoreEvent::Record(_) => "record",
            StoreEvent::Wishlist { .. } => "wishlist",
            StoreEvent::Search { .. } => "search",
            StoreEvent::Session { .. } => "session",
        }
    }

    /// Get the record type this event relates to
    pub fn record_type(&self) -> Option<&str> {
        match self {
            StoreEvent::Record(
                RecordEvent::Created { record_type, .. }
                | RecordEvent::Updated { record_type, .. }
                | RecordEvent::Deleted { record_type, .. },
            ) => Some(record_type),
            _ => None,
        }
    }

    /// Get the id of the record or vehicle this event relates to
    pub fn subject_id(&self) -> Option<&str> {
        match self {
            StoreEvent::Record(
                RecordEvent::Created { record_id, .. }
                | RecordEvent::Updated { record_id, .. }
                | RecordEvent::Deleted { record_id, .. },
            ) => Some(record_id),
            StoreEvent::Wishlist { vehicle_id, .. } => Some(vehicle_id),
            StoreEvent::Session { user_id } => user_id.as_deref(),
            StoreEvent::Search { .. } => None,
        }
    }

    /// Get the action name
    pub fn action(&self) -> &str {
        match self {
            StoreEvent::Record(RecordEvent::Created { .. }) => "created",
            StoreEvent::Record(RecordEvent::Updated { .. }) => "updated",
            StoreEvent::Record(RecordEvent::Deleted { .. }) => "deleted",
            StoreEvent::Wishlist { wishlisted: true, .. } => "added",
            StoreEvent::Wishlist { wishlisted: false, .. } => "removed",
            StoreEvent::Search { .. } => "searched",
            StoreEvent::Session { user_id: Some(_) } => "signed_in",
            StoreEvent::Session { user_id: None } => "signed_out",
        }
    }
}

/// Envelope wrapping a store event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: StoreEvent,
}

impl EventEnvelope {
    pub fn new(event: StoreEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; every clone publishes to the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Receivers that fall more than `capacity` events behind get a
    /// `Lagged` error on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Without subscribers the event is dropped.
    /// Returns the number of receivers that will see the event.
    pub fn publish(&self, event: StoreEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        tracing::trace!(
            kind = envelope.event.event_kind(),
            action = envelope.event.action(),
            "publishing store event"
        );
        // send() only errors when nobody is listening
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_falls_back_to_null() {
        let listing = json!({"id": "42", "price": 90000});
        assert_eq!(RecordEvent::payload("listing", "42", &listing), listing);

        // Maps with non-string keys cannot become JSON objects
        let mut unserializable = std::collections::HashMap::new();
        unserializable.insert((1u8, 2u8), "pair");
        assert_eq!(
            RecordEvent::payload("listing", "42", &unserializable),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_record_event_created() {
        let event = RecordEvent::Created {
            record_type: "listing".to_string(),
            record_id: "42".to_string(),
            data: json!({"name": "Pulsar"}),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "created");
        assert_eq!(json["record_type"], "listing");
    }

    #[test]
    fn test_store_event_accessors() {
        let event = StoreEvent::Record(RecordEvent::Deleted {
            record_type: "booking".to_string(),
            record_id: "b-1".to_string(),
        });
        assert_eq!(event.event_kind(), "record");
        assert_eq!(event.record_type(), Some("booking"));
        assert_eq!(event.subject_id(), Some("b-1"));
        assert_eq!(event.action(), "deleted");

        let event = StoreEvent::Wishlist {
            vehicle_id: "3".to_string(),
            wishlisted: false,
        };
        assert_eq!(event.record_type(), None);
        assert_eq!(event.subject_id(), Some("3"));
        assert_eq!(event.action(), "removed");

        let event = StoreEvent::Session { user_id: None };
        assert_eq!(event.action(), "signed_out");
    }

    #[test]
    fn test_search_event_serializes_query() {
        let event = StoreEvent::Search {
            query: QuerySpec::from_params("pulsar", "ev", "under-50k"),
            matched: 0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "search");
        assert_eq!(json["query"]["category"], "ev");
        assert_eq!(json["query"]["priceBracket"], "under-50k");
    }

    #[test]
    fn test_event_envelope_has_metadata() {
        let envelope = EventEnvelope::new(StoreEvent::Session {
            user_id: Some("mock-user-id".to_string()),
        });
        assert!(!envelope.id.is_nil());
        assert!(envelope.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let receivers = bus.publish(StoreEvent::Wishlist {
            vehicle_id: "1".to_string(),
            wishlisted: true,
        });
        assert_eq!(receivers, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event.subject_id(), Some("1"));
        assert_eq!(received.event.action(), "added");
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        assert_eq!(bus.publish(StoreEvent::Session { user_id: None }), 2);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.id, e2.id);
    }

    #[test]
    fn test_event_bus_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(StoreEvent::Session { user_id: None }), 0);
    }
}
