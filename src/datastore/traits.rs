//! Datastore trait for catalog search.

use std::sync::Arc;

use crate::context::SearchContext;
use crate::error::{LookupError, Result};
use crate::query::SearchParams;
use crate::types::{Footprint, Source};

/// Trait for stores holding footprints and their sources.
///
/// Implementations must honor the context: a cancelled or expired context
/// makes both operations fail with a cancellation error.
pub trait Datastore: Send + Sync {
    /// Return the footprints matching `params`.
    ///
    /// The returned order is the store's own; the ranker reorders it.
    fn search(&self, ctx: &SearchContext, params: &SearchParams) -> Result<Vec<Footprint>>;

    /// Resolve a source by id.
    ///
    /// A missing source is reported as [`LookupError::NotFound`], distinct
    /// from every other failure.
    fn get_source(
        &self,
        ctx: &SearchContext,
        source_id: &str,
    ) -> std::result::Result<Source, LookupError>;

    /// Get the store name for logging.
    fn name(&self) -> &'static str;
}

/// Blanket implementation for boxed trait objects.
impl Datastore for Box<dyn Datastore> {
    fn search(&self, ctx: &SearchContext, params: &SearchParams) -> Result<Vec<Footprint>> {
        (**self).search(ctx, params)
    }

    fn get_source(
        &self,
        ctx: &SearchContext,
        source_id: &str,
    ) -> std::result::Result<Source, LookupError> {
        (**self).get_source(ctx, source_id)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Blanket implementation for Arc-wrapped stores.
///
/// Lets tests keep a handle on a store after giving it to a `Searcher`.
impl<T: Datastore + ?Sized> Datastore for Arc<T> {
    fn search(&self, ctx: &SearchContext, params: &SearchParams) -> Result<Vec<Footprint>> {
        (**self).search(ctx, params)
    }

    fn get_source(
        &self,
        ctx: &SearchContext,
        source_id: &str,
    ) -> std::result::Result<Source, LookupError> {
        (**self).get_source(ctx, source_id)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
