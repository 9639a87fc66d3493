//! The search operation: parse, retrieve, rank.

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::datastore::Datastore;
use crate::error::Result;
use crate::query::parse_query;
use crate::ranking::rank;
use crate::types::Footprint;

/// Run a query against `store` and return the ranked footprints.
///
/// Query errors are returned before the datastore is touched. Datastore
/// errors, other than a missing source, abort the request with no results.
pub fn search<D: Datastore + ?Sized>(
    ctx: &SearchContext,
    store: &D,
    query: &str,
) -> Result<Vec<Footprint>> {
    let params = parse_query(query)?;
    tracing::debug!(
        keywords = ?params.keywords,
        pin_count = ?params.pin_count,
        attr = ?params.attr,
        store = store.name(),
        "searching"
    );

    let mut footprints = store.search(ctx, &params)?;
    rank(ctx, store, &mut footprints)?;

    tracing::debug!(results = footprints.len(), "search complete");
    Ok(footprints)
}

/// A datastore bundled with per-request settings.
pub struct Searcher<D: Datastore> {
    store: D,
    config: SearchConfig,
}

impl<D: Datastore> Searcher<D> {
    /// Create a new searcher.
    pub fn new(store: D, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build a context with the configured deadline.
    pub fn context(&self) -> SearchContext {
        self.config.context()
    }

    /// Search with the caller's context, keeping at most `max_results`.
    pub fn search(&self, ctx: &SearchContext, query: &str) -> Result<Vec<Footprint>> {
        let mut results = search(ctx, &self.store, query)?;
        if let Some(limit) = self.config.max_results {
            results.truncate(limit);
        }
        Ok(results)
    }
}
