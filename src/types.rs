//! Catalog record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single search-result candidate.
///
/// `rank` is a sort key computed by the ranker from the referenced source.
/// It is never read back from storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Footprint {
    /// Unique footprint id.
    pub id: String,
    /// Display name, matched against keywords.
    pub name: String,
    /// Id of the source this footprint was ingested from.
    pub source_id: String,
    /// Free-form attributes (package family, mounting style, ...).
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Number of pins, when known.
    #[serde(default)]
    pub pin_count: Option<i64>,
    /// Inverted source rank; lower sorts first.
    #[serde(skip_deserializing)]
    pub rank: i64,
}

impl Footprint {
    /// Create a footprint with no attributes or pin count.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_id: source_id.into(),
            ..Default::default()
        }
    }

    /// Set the attributes.
    pub fn attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the pin count.
    pub fn pin_count(mut self, pin_count: i64) -> Self {
        self.pin_count = Some(pin_count);
        self
    }
}

/// A library that footprints are ingested from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    /// Unique source id, referenced by `Footprint::source_id`.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Where the library is fetched from.
    #[serde(default)]
    pub url: Option<String>,
    /// Authority score; higher means more authoritative.
    pub rank: i64,
    /// Last successful ingest.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Source {
    /// Create a source with the given rank.
    pub fn new(id: impl Into<String>, rank: i64) -> Self {
        Self {
            id: id.into(),
            rank,
            ..Default::default()
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
