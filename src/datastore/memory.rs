//! In-memory datastore.
//!
//! Thread-safe store used by tests and by embedders that already hold the
//! catalog in memory.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::context::SearchContext;
use crate::datastore::Datastore;
use crate::error::{LookupError, Result, SearchError};
use crate::query::SearchParams;
use crate::types::{Footprint, Source};

/// In-memory datastore.
///
/// Footprints are searched in insertion order. Individual source lookups can
/// be made to fail with [`MemoryDatastore::fail_source`].
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    footprints: RwLock<Vec<Footprint>>,
    sources: RwLock<HashMap<String, Source>>,
    /// Source ids whose lookup fails, with the failure message.
    failures: RwLock<HashMap<String, String>>,
}

impl MemoryDatastore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records.
    pub fn with_records(footprints: Vec<Footprint>, sources: Vec<Source>) -> Self {
        let store = Self::new();
        for footprint in footprints {
            store.insert_footprint(footprint);
        }
        for source in sources {
            store.insert_source(source);
        }
        store
    }

    /// Add a footprint. Ids are not checked for uniqueness.
    pub fn insert_footprint(&self, footprint: Footprint) {
        self.footprints.write().unwrap().push(footprint);
    }

    /// Add or replace a source.
    pub fn insert_source(&self, source: Source) {
        self.sources
            .write()
            .unwrap()
            .insert(source.id.clone(), source);
    }

    /// Make lookups of `source_id` fail with a datastore error.
    pub fn fail_source(&self, source_id: impl Into<String>, message: impl Into<String>) {
        self.failures
            .write()
            .unwrap()
            .insert(source_id.into(), message.into());
    }

    /// Get the number of footprints in the store.
    pub fn len(&self) -> usize {
        self.footprints.read().unwrap().len()
    }

    /// Check if the store holds no footprints.
    pub fn is_empty(&self) -> bool {
        self.footprints.read().unwrap().is_empty()
    }

    /// Remove all records and injected failures.
    pub fn clear(&self) {
        self.footprints.write().unwrap().clear();
        self.sources.write().unwrap().clear();
        self.failures.write().unwrap().clear();
    }
}

impl Datastore for MemoryDatastore {
    fn search(&self, ctx: &SearchContext, params: &SearchParams) -> Result<Vec<Footprint>> {
        ctx.check()?;
        let footprints = self.footprints.read().unwrap();
        Ok(footprints
            .iter()
            .filter(|fp| params.matches(fp))
            .cloned()
            .collect())
    }

    fn get_source(
        &self,
        ctx: &SearchContext,
        source_id: &str,
    ) -> std::result::Result<Source, LookupError> {
        ctx.check()?;

        if let Some(message) = self.failures.read().unwrap().get(source_id) {
            return Err(SearchError::datastore(message.clone()).into());
        }

        self.sources
            .read()
            .unwrap()
            .get(source_id)
            .cloned()
            .ok_or_else(|| LookupError::not_found(source_id))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::traits::tests::{seed_footprints, seed_sources, test_datastore_contract};

    fn seeded() -> MemoryDatastore {
        MemoryDatastore::with_records(seed_footprints(), seed_sources())
    }

    #[test]
    fn test_memory_datastore_contract() {
        test_datastore_contract(&seeded());
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryDatastore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_len_and_clear() {
        let store = seeded();
        assert_eq!(store.len(), 3);
        store.clear();
        assert!(store.is_empty());
        assert!(matches!(
            store.get_source(&SearchContext::new(), "s-official"),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn test_insert_source_replaces() {
        let store = seeded();
        store.insert_source(Source::new("s-official", 99));
        let source = store.get_source(&SearchContext::new(), "s-official").unwrap();
        assert_eq!(source.rank, 99);
    }

    #[test]
    fn test_fail_source_is_not_not_found() {
        let store = seeded();
        store.fail_source("s-official", "replica unavailable");
        match store.get_source(&SearchContext::new(), "s-official") {
            Err(LookupError::Failed(SearchError::Datastore { message })) => {
                assert_eq!(message, "replica unavailable");
            }
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[test]
    fn test_search_returns_clones() {
        let store = seeded();
        let params = SearchParams::with_keywords(vec!["dip".to_string()]);
        let mut found = store.search(&SearchContext::new(), &params).unwrap();
        found[0].rank = 500;

        let again = store.search(&SearchContext::new(), &params).unwrap();
        assert_eq!(again[0].rank, 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryDatastore::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store_clone.insert_source(Source::new(format!("s{}", i), i));
                store_clone.insert_footprint(Footprint::new(
                    format!("fp{}", i),
                    "QFN",
                    format!("s{}", i),
                ));
                store_clone
                    .get_source(&SearchContext::new(), &format!("s{}", i))
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 10);
    }
}
