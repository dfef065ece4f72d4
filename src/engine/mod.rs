//! Filter, sort and grouping pipeline
//!
//! ```text
//! catalog ──▶ filter(spec) ──▶ sort(key) ──▶ group() ──▶ sectioned view
//! ```
//!
//! Every stage is a pure function over its input: nothing here mutates the
//! catalog, performs I/O or fails. Each stage is generic over
//! [`Vehicle`](crate::core::Vehicle), so catalog records and user listings
//! share the same pipeline.

pub mod filter;
pub mod group;
pub mod sort;

pub use filter::{filter, matches};
pub use group::{Groups, group};
pub use sort::{DEFAULT_CREATED_AT_MILLIS, sort, sort_by_param};
