//! Source-rank ordering of search candidates.
//!
//! Each footprint is ranked by the authority of the source it came from.
//! The source rank is inverted so that an ascending sort puts the most
//! authoritative sources first:
//!
//! | source rank | footprint rank |
//! |-------------|----------------|
//! | 10          | -10            |
//! | 5           | -5             |
//! | not found   | 200            |

use crate::context::SearchContext;
use crate::datastore::Datastore;
use crate::error::{LookupError, Result};
use crate::types::{Footprint, Source};

/// Rank assumed for a source that cannot be found.
pub const MISSING_SOURCE_RANK: i64 = -200;

/// Footprint rank for a resolved source, or for a missing one.
///
/// Negation wraps, so a source rank of `i64::MIN` stays `i64::MIN`.
pub fn invert_rank(source: Option<&Source>) -> i64 {
    source
        .map_or(MISSING_SOURCE_RANK, |s| s.rank)
        .wrapping_neg()
}

/// Rank footprints in place and sort them ascending by rank.
///
/// Sources are resolved one at a time in input order. A missing source gets
/// the sentinel rank; any other lookup failure stops ranking immediately and
/// is returned. Ties keep their input order.
pub fn rank<D: Datastore + ?Sized>(
    ctx: &SearchContext,
    store: &D,
    footprints: &mut [Footprint],
) -> Result<()> {
    for footprint in footprints.iter_mut() {
        ctx.check()?;

        footprint.rank = match store.get_source(ctx, &footprint.source_id) {
            Ok(source) => invert_rank(Some(&source)),
            Err(LookupError::NotFound { source_id }) => {
                // TODO: drop the sentinel once ingest rejects footprints with dangling source ids
                tracing::warn!(
                    footprint = %footprint.id,
                    source = %source_id,
                    store = store.name(),
                    "source not found, using sentinel rank"
                );
                invert_rank(None)
            }
            Err(LookupError::Failed(err)) => return Err(err),
        };
    }

    footprints.sort_by_key(|fp| fp.rank);
    Ok(())
}
