//! Read-only datastore backed by a JSON catalog file.
//!
//! The catalog file holds every source and footprint:
//!
//! ```json
//! {
//!   "sources": [{ "id": "kicad", "rank": 10 }],
//!   "footprints": [{ "id": "fp1", "name": "SOIC-8", "source_id": "kicad" }]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::SearchContext;
use crate::datastore::Datastore;
use crate::error::{LookupError, Result, SearchError};
use crate::query::SearchParams;
use crate::types::{Footprint, Source};

/// On-disk catalog layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Catalog {
    pub sources: Vec<Source>,
    pub footprints: Vec<Footprint>,
}

/// Datastore loaded once from a catalog file.
#[derive(Debug, Clone)]
pub struct CatalogDatastore {
    path: PathBuf,
    footprints: Vec<Footprint>,
    sources: HashMap<String, Source>,
}

impl CatalogDatastore {
    /// Load the catalog at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SearchError::storage(path, e))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .map_err(|e| SearchError::serde(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            sources = catalog.sources.len(),
            footprints = catalog.footprints.len(),
            "loaded catalog"
        );

        Ok(Self::from_catalog(path, catalog))
    }

    /// Build a store from an already-decoded catalog.
    pub fn from_catalog(path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        let sources = catalog
            .sources
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        Self {
            path: path.into(),
            footprints: catalog.footprints,
            sources,
        }
    }

    /// Path the catalog was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn footprint_count(&self) -> usize {
        self.footprints.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl Datastore for CatalogDatastore {
    fn search(&self, ctx: &SearchContext, params: &SearchParams) -> Result<Vec<Footprint>> {
        ctx.check()?;
        Ok(self
            .footprints
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
        self.sources
            .get(source_id)
            .cloned()
            .ok_or_else(|| LookupError::not_found(source_id))
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}
