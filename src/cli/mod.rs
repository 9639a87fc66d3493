//! CLI commands.

pub mod search;

pub use search::{SearchCommand, SearchOptions, SearchOutput};
