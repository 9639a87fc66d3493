//! Datastores that answer candidate searches and source lookups.
//!
//! The search operation only talks to the [`Datastore`] trait. Two
//! implementations ship with the crate: an in-memory store used by tests and
//! embedders, and a read-only store backed by a JSON catalog file.

pub mod catalog;
pub mod memory;
pub mod traits;

pub use catalog::{Catalog, CatalogDatastore};
pub use memory::MemoryDatastore;
pub use traits::Datastore;
