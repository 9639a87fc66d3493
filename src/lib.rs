//! kcdb-search - footprint catalog search
//!
//! Parses space-delimited queries (`soic pc=8 attr=smd`) into structured
//! parameters, retrieves candidates from a [`Datastore`], and orders them by
//! the rank of the source each footprint came from.

pub mod cli;
pub mod config;
pub mod context;
pub mod datastore;
pub mod error;
pub mod query;
pub mod ranking;
pub mod search;
pub mod types;

pub use config::Config;
pub use context::SearchContext;
pub use datastore::{CatalogDatastore, Datastore, MemoryDatastore};
pub use error::{LookupError, Result, SearchError};
pub use query::{parse_query, FilterKey, SearchParams};
pub use ranking::{invert_rank, rank, MISSING_SOURCE_RANK};
pub use search::{search, Searcher};
pub use types::{Footprint, Source};

pub use cli::SearchCommand;
