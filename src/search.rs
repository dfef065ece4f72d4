//! Debounced live search
//!
//! Typing into the search form calls [`LiveSearch::input`] on every change.
//! Results are only recomputed once the input has been quiet for the
//! configured delay; a newer input cancels the pending recomputation. Enter
//! (or the search button) calls [`LiveSearch::submit`] and recomputes
//! immediately.
//!
//! Results are published on a `tokio::sync::watch` channel, so observers
//! always see the latest outcome and never a backlog.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::catalog::Catalog;
use crate::core::debounce::Debouncer;
use crate::core::events::{EventBus, StoreEvent};
use crate::core::query::QuerySpec;
use crate::core::vehicle::VehicleRecord;

/// The results of one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub query: QuerySpec,
    pub vehicles: Vec<VehicleRecord>,
    /// Human summary of the query, empty for an empty query
    pub summary: String,
}

impl SearchOutcome {
    fn compute(catalog: &Catalog, query: QuerySpec) -> Self {
        Self {
            vehicles: catalog.search(&query),
            summary: query.describe(),
            query,
        }
    }
}

/// Publishes an outcome to watchers and the event bus
#[derive(Debug, Clone)]
struct Publisher {
    catalog: Arc<Catalog>,
    results: Arc<watch::Sender<SearchOutcome>>,
    events: Option<EventBus>,
}

impl Publisher {
    fn run(&self, query: QuerySpec) {
        let outcome = SearchOutcome::compute(&self.catalog, query);
        tracing::debug!(
            matched = outcome.vehicles.len(),
            summary = %outcome.summary,
            "live search results"
        );
        if let Some(bus) = &self.events {
            bus.publish(StoreEvent::Search {
                query: outcome.query.clone(),
                matched: outcome.vehicles.len(),
            });
        }
        self.results.send_replace(outcome);
    }
}

/// Search box state with debounced recomputation
///
/// Needs a tokio runtime for [`input`](Self::input).
#[derive(Debug)]
pub struct LiveSearch {
    publisher: Publisher,
    debouncer: Debouncer,
}

impl LiveSearch {
    /// Start with the full catalog as the current outcome
    pub fn new(catalog: Arc<Catalog>, delay: Duration) -> Self {
        let initial = SearchOutcome::compute(&catalog, QuerySpec::new());
        let (results, _) = watch::channel(initial);
        Self {
            publisher: Publisher {
                catalog,
                results: Arc::new(results),
                events: None,
            },
            debouncer: Debouncer::new(delay),
        }
    }

    /// Also publish every outcome as a [`StoreEvent::Search`]
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.publisher.events = Some(bus);
        self
    }

    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Observe outcomes; the receiver starts at the current one
    pub fn subscribe(&self) -> watch::Receiver<SearchOutcome> {
        self.publisher.results.subscribe()
    }

    pub fn current(&self) -> SearchOutcome {
        self.publisher.results.borrow().clone()
    }

    /// Record a change of the search form
    ///
    /// Returns whether a recomputation was scheduled. An input with no
    /// criterion set only cancels what was pending.
    pub fn input(&self, query: QuerySpec) -> bool {
        if query.is_empty() {
            self.debouncer.cancel();
            return false;
        }

        let publisher = self.publisher.clone();
        self.debouncer.schedule(move || publisher.run(query));
        true
    }

    /// Recompute right away, dropping any pending input
    pub fn submit(&self, query: QuerySpec) -> SearchOutcome {
        self.debouncer.cancel();
        self.publisher.run(query);
        self.current()
    }

    /// Reset the form: pending work is dropped and the full catalog shown
    pub fn clear(&self) -> SearchOutcome {
        self.submit(QuerySpec::new())
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_search() -> LiveSearch {
        LiveSearch::new(
            Arc::new(Catalog::seeded().unwrap()),
            Duration::from_millis(300),
        )
    }

    #[test]
    fn test_initial_outcome_is_full_catalog() {
        let search = live_search();
        let current = search.current();
        assert_eq!(current.vehicles.len(), 15);
        assert_eq!(current.summary, "");
    }

    #[test]
    fn test_submit_is_immediate() {
        let search = live_search();
        let outcome = search.submit(QuerySpec::new().with_text("pulsar"));
        assert_eq!(outcome.vehicles.len(), 1);
        assert_eq!(outcome.summary, " for \"pulsar\"");
        assert_eq!(search.clear().vehicles.len(), 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_schedules_nothing() {
        let search = live_search();
        assert!(!search.input(QuerySpec::new().with_text("   ")));
        assert!(!search.is_pending());
    }
}
