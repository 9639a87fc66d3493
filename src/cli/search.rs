//! Search command.
//!
//! Runs a query against the configured datastore and renders the ranked
//! footprints as text or JSON.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::datastore::Datastore;
use crate::error::{exit_codes, SearchError};
use crate::search::Searcher;
use crate::types::Footprint;

/// Options for the search command.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Maximum number of results; overrides the configured limit.
    pub limit: Option<usize>,
}

/// Output format for the search command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutput {
    /// Whether the search was successful.
    pub success: bool,
    /// The query as given.
    pub query: String,
    /// Number of results returned.
    pub count: usize,
    /// Ranked results, best first.
    pub results: Vec<SearchResultInfo>,
    /// Error message if the search failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error category if the search failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    /// Whether the failure was caused by the query itself.
    #[serde(default)]
    pub user_error: bool,
}

/// Simplified result info for output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultInfo {
    pub id: String,
    pub name: String,
    pub source_id: String,
    pub rank: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_count: Option<i64>,
    pub attributes: Vec<String>,
}

impl From<&Footprint> for SearchResultInfo {
    fn from(fp: &Footprint) -> Self {
        Self {
            id: fp.id.clone(),
            name: fp.name.clone(),
            source_id: fp.source_id.clone(),
            rank: fp.rank,
            pin_count: fp.pin_count,
            attributes: fp.attributes.clone(),
        }
    }
}

impl SearchOutput {
    /// Create a successful output.
    pub fn success(query: impl Into<String>, results: Vec<SearchResultInfo>) -> Self {
        let count = results.len();
        Self {
            success: true,
            query: query.into(),
            count,
            results,
            error: None,
            error_kind: None,
            user_error: false,
        }
    }

    /// Create a failed output from a search error.
    pub fn failure(query: impl Into<String>, error: &SearchError) -> Self {
        Self {
            success: false,
            query: query.into(),
            count: 0,
            results: Vec::new(),
            error: Some(error.to_string()),
            error_kind: Some(error.kind().to_string()),
            user_error: error.is_user_error(),
        }
    }

    /// Process exit code for this output.
    pub fn exit_code(&self) -> i32 {
        if self.success {
            exit_codes::SUCCESS
        } else if self.user_error {
            exit_codes::USER_ERROR
        } else {
            exit_codes::FAILURE
        }
    }
}

/// The search command implementation.
pub struct SearchCommand<D: Datastore> {
    searcher: Searcher<D>,
}

impl<D: Datastore> SearchCommand<D> {
    /// Create a new search command.
    pub fn new(store: D, config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(store, config),
        }
    }

    /// Run the search command with the given query.
    ///
    /// The query is passed through untouched; spacing is significant.
    pub fn run(&self, query: &str, options: &SearchOptions) -> SearchOutput {
        let ctx = self.searcher.context();

        match self.searcher.search(&ctx, query) {
            Ok(mut results) => {
                if let Some(limit) = options.limit {
                    results.truncate(limit);
                }
                let infos = results.iter().map(SearchResultInfo::from).collect();
                SearchOutput::success(query, infos)
            }
            Err(e) => {
                if e.is_user_error() {
                    tracing::debug!(kind = e.kind(), "query rejected: {}", e);
                } else {
                    tracing::warn!(
                        kind = e.kind(),
                        store = self.searcher.store().name(),
                        "search failed: {}",
                        e
                    );
                }
                SearchOutput::failure(query, &e)
            }
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &SearchOutput, options: &SearchOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &SearchOutput) -> String {
        if !output.success {
            return format!(
                "Search failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.results.is_empty() {
            return format!("No footprints found for query: \"{}\"\n", output.query);
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "Found {} footprint(s) for query: \"{}\"\n",
            output.count, output.query
        ));

        for (i, result) in output.results.iter().enumerate() {
            lines.push(format!(
                "{}. {} [{}] (rank: {})",
                i + 1,
                result.name,
                result.source_id,
                result.rank
            ));
            if let Some(pins) = result.pin_count {
                lines.push(format!("   Pins: {}", pins));
            }
            if !result.attributes.is_empty() {
                lines.push(format!("   Attributes: {}", result.attributes.join(", ")));
            }
            lines.push(format!("   ID: {}", result.id));
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
