//! Query string parsing.
//!
//! A query is a space-separated list of tokens. Tokens of the form
//! `key=value` are filters; everything else is a keyword:
//!
//! ```text
//! soic pc=8 attr=smd
//! ```
//!
//! Splitting is on single spaces with no quoting or escaping, so two spaces
//! in a row produce an empty keyword.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::types::Footprint;

/// Message returned when a query carries filters but no keywords.
pub const NO_KEYWORDS_MESSAGE: &str = "Keywords must be specified";

/// Filter keys understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// Exact pin count (integer).
    PinCount,
    /// Attribute name (string).
    Attr,
}

impl FilterKey {
    /// Accepted spellings for the pin count filter.
    pub const PIN_COUNT_ALIASES: &'static [&'static str] =
        &["pin_count", "pc", "pinc", "pin_c", "p_count", "pin_cnt"];

    /// Accepted spellings for the attribute filter.
    pub const ATTR_ALIASES: &'static [&'static str] = &["attr", "at", "attribute"];

    /// Resolve a specifier to its filter key.
    pub fn from_specifier(key: &str) -> Option<Self> {
        if Self::PIN_COUNT_ALIASES.contains(&key) {
            Some(Self::PinCount)
        } else if Self::ATTR_ALIASES.contains(&key) {
            Some(Self::Attr)
        } else {
            None
        }
    }
}

/// Structured search parameters handed to the datastore.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchParams {
    /// Keywords in query order, possibly including empty strings.
    pub keywords: Vec<String>,
    /// Exact pin count filter.
    pub pin_count: Option<i64>,
    /// Attribute filter.
    pub attr: Option<String>,
}

impl SearchParams {
    /// Create params with the given keywords and no filters.
    pub fn with_keywords(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            ..Default::default()
        }
    }

    /// Set the pin count filter.
    pub fn pin_count(mut self, pin_count: i64) -> Self {
        self.pin_count = Some(pin_count);
        self
    }

    /// Set the attribute filter.
    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    /// Check whether a footprint satisfies these parameters.
    ///
    /// Every keyword must occur (case-insensitively) in the name or in one of
    /// the attributes; an empty keyword matches anything. Filters that are
    /// set must match exactly, attributes compared case-insensitively.
    pub fn matches(&self, footprint: &Footprint) -> bool {
        if let Some(pin_count) = self.pin_count {
            if footprint.pin_count != Some(pin_count) {
                return false;
            }
        }

        if let Some(ref attr) = self.attr {
            if !footprint
                .attributes
                .iter()
                .any(|a| a.eq_ignore_ascii_case(attr))
            {
                return false;
            }
        }

        let name = footprint.name.to_lowercase();
        let attributes: Vec<String> = footprint
            .attributes
            .iter()
            .map(|a| a.to_lowercase())
            .collect();

        self.keywords.iter().all(|keyword| {
            let keyword = keyword.to_lowercase();
            name.contains(&keyword) || attributes.iter().any(|a| a.contains(&keyword))
        })
    }
}

/// Parse a raw query string into search parameters.
///
/// Fails on the first filter that cannot be understood, scanning left to
/// right, and with [`SearchError::BadQuery`] when no keywords remain.
pub fn parse_query(query: &str) -> Result<SearchParams> {
    let mut params = SearchParams::default();

    for token in query.split(' ') {
        let Some((key, value)) = token.split_once('=') else {
            params.keywords.push(token.to_string());
            continue;
        };

        match FilterKey::from_specifier(key) {
            Some(FilterKey::PinCount) => {
                let pin_count = value
                    .parse::<i64>()
                    .map_err(|e| SearchError::malformed(key, value, e.to_string()))?;
                params.pin_count = Some(pin_count);
            }
            Some(FilterKey::Attr) => {
                params.attr = Some(value.to_string());
            }
            None => return Err(SearchError::unrecognized(key)),
        }
    }

    if params.keywords.is_empty() {
        return Err(SearchError::bad_query(NO_KEYWORDS_MESSAGE));
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_filters() {
        let params = parse_query("foo bar pc=3 attr=x").unwrap();
        assert_eq!(params.keywords, vec!["foo", "bar"]);
        assert_eq!(params.pin_count, Some(3));
        assert_eq!(params.attr.as_deref(), Some("x"));
    }

    #[test]
    fn test_every_pin_count_alias() {
        for alias in FilterKey::PIN_COUNT_ALIASES {
            let params = parse_query(&format!("qfn {}=32", alias)).unwrap();
            assert_eq!(params.pin_count, Some(32), "alias {}", alias);
        }
    }

    #[test]
    fn test_every_attr_alias() {
        for alias in FilterKey::ATTR_ALIASES {
            let params = parse_query(&format!("qfn {}=smd", alias)).unwrap();
            assert_eq!(params.attr.as_deref(), Some("smd"), "alias {}", alias);
        }
    }

    #[test]
    fn test_filters_only_is_bad_query() {
        let err = parse_query("pc=5").unwrap_err();
        assert!(matches!(err, SearchError::BadQuery { .. }));
        assert_eq!(err.to_string(), NO_KEYWORDS_MESSAGE);
    }

    #[test]
    fn test_non_numeric_pin_count() {
        let err = parse_query("pin_count=abc foo").unwrap_err();
        match err {
            SearchError::MalformedFilterValue { key, value, .. } => {
                assert_eq!(key, "pin_count");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_and_signed_pin_counts_parse() {
        assert_eq!(parse_query("x pc=-4").unwrap().pin_count, Some(-4));
        assert_eq!(parse_query("x pc=+4").unwrap().pin_count, Some(4));
    }

    #[test]
    fn test_empty_pin_count_is_malformed() {
        let err = parse_query("x pc=").unwrap_err();
        assert!(matches!(err, SearchError::MalformedFilterValue { .. }));
    }

    #[test]
    fn test_unrecognized_specifier_names_first_key() {
        let err = parse_query("color=red size=big").unwrap_err();
        match err {
            SearchError::UnrecognizedSpecifier { key } => assert_eq!(key, "color"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_errors_reported_left_to_right() {
        let err = parse_query("foo pc=abc color=red").unwrap_err();
        assert!(matches!(err, SearchError::MalformedFilterValue { .. }));

        let err = parse_query("foo color=red pc=abc").unwrap_err();
        assert!(matches!(err, SearchError::UnrecognizedSpecifier { .. }));
    }

    #[test]
    fn test_last_attr_wins() {
        let params = parse_query("x attr=a attr=b").unwrap();
        assert_eq!(params.attr.as_deref(), Some("b"));
    }

    #[test]
    fn test_last_pin_count_wins() {
        let params = parse_query("x pc=8 pin_cnt=16").unwrap();
        assert_eq!(params.pin_count, Some(16));
    }

    #[test]
    fn test_value_splits_on_first_equals() {
        let params = parse_query("x attr=a=b").unwrap();
        assert_eq!(params.attr.as_deref(), Some("a=b"));
    }

    #[test]
    fn test_empty_attr_value_kept() {
        let params = parse_query("x attr=").unwrap();
        assert_eq!(params.attr.as_deref(), Some(""));
    }

    #[test]
    fn test_consecutive_spaces_yield_empty_keywords() {
        let params = parse_query("foo  bar").unwrap();
        assert_eq!(params.keywords, vec!["foo", "", "bar"]);
    }

    #[test]
    fn test_empty_query_has_one_empty_keyword() {
        let params = parse_query("").unwrap();
        assert_eq!(params.keywords, vec![""]);
    }

    #[test]
    fn test_keyword_case_preserved() {
        let params = parse_query("SOIC Narrow").unwrap();
        assert_eq!(params.keywords, vec!["SOIC", "Narrow"]);
    }

    #[test]
    fn test_specifier_is_case_sensitive() {
        let err = parse_query("x PC=3").unwrap_err();
        assert!(matches!(err, SearchError::UnrecognizedSpecifier { .. }));
    }

    #[test]
    fn test_from_specifier() {
        assert_eq!(FilterKey::from_specifier("pinc"), Some(FilterKey::PinCount));
        assert_eq!(FilterKey::from_specifier("at"), Some(FilterKey::Attr));
        assert_eq!(FilterKey::from_specifier("pins"), None);
        assert_eq!(FilterKey::from_specifier(""), None);
    }

    #[test]
    fn test_matches_keywords_in_name_or_attributes() {
        let fp = Footprint::new("fp1", "SOIC-8_3.9x4.9mm", "s1")
            .attributes(vec!["SMD".to_string()])
            .pin_count(8);

        assert!(SearchParams::with_keywords(vec!["soic".into()]).matches(&fp));
        assert!(SearchParams::with_keywords(vec!["smd".into()]).matches(&fp));
        assert!(SearchParams::with_keywords(vec!["".into()]).matches(&fp));
        assert!(!SearchParams::with_keywords(vec!["soic".into(), "qfn".into()]).matches(&fp));
    }

    #[test]
    fn test_matches_filters() {
        let fp = Footprint::new("fp1", "SOIC-8", "s1")
            .attributes(vec!["SMD".to_string()])
            .pin_count(8);

        let base = SearchParams::with_keywords(vec!["soic".into()]);
        assert!(base.clone().pin_count(8).matches(&fp));
        assert!(!base.clone().pin_count(14).matches(&fp));
        assert!(base.clone().attr("smd").matches(&fp));
        assert!(!base.clone().attr("tht").matches(&fp));
    }

    #[test]
    fn test_pin_count_filter_excludes_unknown_pin_count() {
        let fp = Footprint::new("fp1", "SOIC-8", "s1");
        let params = SearchParams::with_keywords(vec!["soic".into()]).pin_count(8);
        assert!(!params.matches(&fp));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_word() -> impl Strategy<Value = String> {
            "[a-z0-9_-]{1,10}"
        }

        fn arb_unknown_key() -> impl Strategy<Value = String> {
            "[a-z]{1,8}".prop_filter("must not be a known specifier", |k| {
                FilterKey::from_specifier(k).is_none()
            })
        }

        proptest! {
            // Property: plain words round-trip as keywords in order
            #[test]
            fn prop_plain_words_become_keywords(words in prop::collection::vec(arb_word(), 1..8)) {
                let params = parse_query(&words.join(" ")).unwrap();
                prop_assert_eq!(params.keywords, words);
                prop_assert_eq!(params.pin_count, None);
                prop_assert_eq!(params.attr, None);
            }

            // Property: a query of only unknown specifiers names the first key
            #[test]
            fn prop_unknown_specifiers_name_first(
                keys in prop::collection::vec(arb_unknown_key(), 1..5),
                value in arb_word(),
            ) {
                let query = keys
                    .iter()
                    .map(|k| format!("{}={}", k, value))
                    .collect::<Vec<_>>()
                    .join(" ");
                match parse_query(&query) {
                    Err(SearchError::UnrecognizedSpecifier { key }) => {
                        prop_assert_eq!(&key, &keys[0]);
                    }
                    other => {
                        prop_assert!(false, "unexpected result: {:?}", other);
                    }
                }
            }

            // Property: valid filters alone never form a runnable query
            #[test]
            fn prop_filters_only_is_bad_query(
                pins in prop::collection::vec(0i64..512, 0..3),
                attrs in prop::collection::vec(arb_word(), 0..3),
            ) {
                prop_assume!(!pins.is_empty() || !attrs.is_empty());
                let mut tokens: Vec<String> = pins.iter().map(|p| format!("pc={}", p)).collect();
                tokens.extend(attrs.iter().map(|a| format!("attr={}", a)));
                let result = parse_query(&tokens.join(" "));
                let is_bad_query = matches!(result, Err(SearchError::BadQuery { .. }));
                prop_assert!(is_bad_query, "unexpected result: {:?}", result);
            }
        }
    }
}
