//! "Sell your bike" listings
//!
//! Listings live in local storage under a single key and are never merged
//! into the catalog. They go through the same filter and sort engines as
//! catalog vehicles.

mod model;

pub use model::{Listing, ListingDraft};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use crate::config::ListingsConfig;
use crate::core::error::{ListingError, MartResult, StorageError};
use crate::core::events::{EventBus, RecordEvent, StoreEvent};
use crate::core::query::{PriceRange, QuerySpec, SortKey};
use crate::core::store::QueryableStore;
use crate::storage::{LocalStore, LocalStoreExt};

/// Summary figures shown above the listing grid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    pub count: usize,
    pub average_price: f64,
    /// Rounded to the nearest year
    pub average_year: u16,
    /// Number of distinct categories in use
    pub categories: usize,
}

/// The user's listings, persisted after every change
pub struct ListingBook {
    store: Arc<dyn LocalStore>,
    key: String,
    price_range: PriceRange,
    listings: RwLock<Vec<Listing>>,
    events: Option<EventBus>,
}

impl ListingBook {
    /// Load the listings saved under the configured key
    pub fn open(store: Arc<dyn LocalStore>, config: &ListingsConfig) -> Result<Self, StorageError> {
        let listings: Vec<Listing> = store.load(&config.storage_key)?.unwrap_or_default();
        tracing::debug!(
            key = %config.storage_key,
            listings = listings.len(),
            "opened listing book"
        );

        Ok(Self {
            store,
            key: config.storage_key.clone(),
            price_range: config.price_range(),
            listings: RwLock::new(listings),
            events: None,
        })
    }

    /// Publish record events on `bus` for every change
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn create(&self, draft: &ListingDraft) -> MartResult<Listing> {
        let listing = draft
            .parse()?
            .into_listing(Uuid::new_v4().to_string(), Utc::now());

        self.commit(|listings| {
            listings.push(listing.clone());
            Ok(())
        })?;

        tracing::info!(listing_id = %listing.id, name = %listing.name, "listing created");
        self.publish(RecordEvent::Created {
            record_type: "listing".to_string(),
            record_id: listing.id.clone(),
            data: RecordEvent::payload("listing", &listing.id, &listing),
        });
        Ok(listing)
    }

    /// Replace a listing's values, keeping its id and creation time
    pub fn update(&self, id: &str, draft: &ListingDraft) -> MartResult<Listing> {
        let values = draft.parse()?;
        let mut updated = None;

        self.commit(|listings| {
            let slot = listings
                .iter_mut()
                .find(|listing| listing.id == id)
                .ok_or_else(|| ListingError::NotFound { id: id.to_string() })?;
            *slot = values.into_listing(slot.id.clone(), slot.created_at);
            updated = Some(slot.clone());
            Ok(())
        })?;

        let listing = updated.ok_or_else(|| ListingError::NotFound { id: id.to_string() })?;
        tracing::info!(listing_id = %listing.id, "listing updated");
        self.publish(RecordEvent::Updated {
            record_type: "listing".to_string(),
            record_id: listing.id.clone(),
            data: RecordEvent::payload("listing", &listing.id, &listing),
        });
        Ok(listing)
    }

    pub fn delete(&self, id: &str) -> MartResult<Listing> {
        let mut removed = None;

        self.commit(|listings| {
            let position = listings
                .iter()
                .position(|listing| listing.id == id)
                .ok_or_else(|| ListingError::NotFound { id: id.to_string() })?;
            removed = Some(listings.remove(position));
            Ok(())
        })?;

        let listing = removed.ok_or_else(|| ListingError::NotFound { id: id.to_string() })?;
        tracing::info!(listing_id = %listing.id, "listing deleted");
        self.publish(RecordEvent::Deleted {
            record_type: "listing".to_string(),
            record_id: listing.id.clone(),
        });
        Ok(listing)
    }

    pub fn get(&self, id: &str) -> Option<Listing> {
        self.read().iter().find(|listing| listing.id == id).cloned()
    }

    /// All listings, oldest first
    pub fn list(&self) -> Vec<Listing> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Default slider range applied when a search carries none
    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    /// Filter and sort listings
    ///
    /// Without an explicit price range the configured slider range applies.
    pub fn search(&self, spec: &QuerySpec, sort: Option<SortKey>) -> Vec<Listing> {
        let mut spec = spec.clone();
        if spec.price_range.is_none() {
            spec.price_range = Some(self.price_range);
        }
        self.query(&spec, sort)
    }

    pub fn stats(&self) -> ListingStats {
        let listings = self.read();
        if listings.is_empty() {
            return ListingStats::default();
        }

        let count = listings.len();
        let total_price: u64 = listings.iter().map(|l| l.price).sum();
        let total_year: u64 = listings.iter().map(|l| u64::from(l.year)).sum();
        let categories: HashSet<_> = listings.iter().map(|l| l.category).collect();

        ListingStats {
            count,
            average_price: total_price as f64 / count as f64,
            average_year: (total_year as f64 / count as f64).round() as u16,
            categories: categories.len(),
        }
    }

    /// Apply a change to a copy, persist it, then make it visible
    fn commit<F>(&self, change: F) -> MartResult<()>
    where
        F: FnOnce(&mut Vec<Listing>) -> Result<(), ListingError>,
    {
        let mut listings = self.listings.write().map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;

        let mut next = listings.clone();
        change(&mut next)?;
        self.store.save(&self.key, &next)?;
        *listings = next;
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Listing>> {
        self.listings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: RecordEvent) {
        if let Some(bus) = &self.events {
            bus.publish(StoreEvent::Record(event));
        }
    }
}

impl QueryableStore<Listing> for ListingBook {
    fn list_all(&self) -> Vec<Listing> {
        self.list()
    }
}
