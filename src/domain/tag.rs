// src/domain/tag.rs
use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// Represents a single tag as a value object.
///
/// A tag is always trimmed and lowercased; ordering is lexicographic on the normalized value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    value: String,
}

impl Tag {
    /// Creates a new Tag with validation
    pub fn new<S: AsRef<str>>(value: S) -> DomainResult<Self> {
        let value = value.as_ref().trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::InvalidTag("Tag cannot be empty".to_string()));
        }

        if value.contains(',') {
            return Err(DomainError::InvalidTag(format!(
                "Tag cannot contain commas: '{}'",
                value
            )));
        }

        Ok(Self { value })
    }

    /// Get the tag value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Normalize raw tag strings into an ordered list of distinct tags.
    ///
    /// Blank entries are skipped, the first occurrence of a duplicate wins.
    pub fn normalize<I, S>(values: I) -> DomainResult<Vec<Tag>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = values
            .into_iter()
            .filter(|s| !s.as_ref().trim().is_empty())
            .map(Tag::new)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(tags.into_iter().unique().collect())
    }

    /// Parse a comma-separated tag string into an ordered list of distinct tags
    pub fn parse_tags<S: AsRef<str>>(tag_str: S) -> DomainResult<Vec<Tag>> {
        Tag::normalize(tag_str.as_ref().split(','))
    }

    /// Parse an optional string; `None` or an empty string yields `None`.
    pub fn parse_tag_option(tag_str: Option<impl AsRef<str>>) -> DomainResult<Option<Vec<Tag>>> {
        match tag_str {
            None => Ok(None),
            Some(s) if s.as_ref().trim().is_empty() => Ok(None),
            Some(s) => Tag::parse_tags(s).map(Some),
        }
    }

    /// Format tags for storage in the form ",tag1,tag2,", keeping their order
    pub fn format_tags(tags: &[Tag]) -> String {
        if tags.is_empty() {
            ",,".to_string()
        } else {
            format!(",{},", tags.iter().map(Tag::value).join(","))
        }
    }

    /// Format tags for editing, e.g. "web, design, tools"
    pub fn join_tags(tags: &[Tag]) -> String {
        tags.iter().map(Tag::value).join(", ")
    }

    /// Check if any of the needles is present in the haystack
    pub fn contains_any<'a>(haystack: &[Tag], needles: impl IntoIterator<Item = &'a Tag>) -> bool {
        needles.into_iter().any(|needle| haystack.contains(needle))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<Tag> {
        values.iter().map(|v| Tag::new(v).unwrap()).collect()
    }

    #[test]
    fn given_valid_tag_value_when_create_tag_then_returns_normalized_tag() {
        let tag = Tag::new("test").unwrap();
        assert_eq!(tag.value(), "test");

        // Should normalize case
        let tag = Tag::new("TEST").unwrap();
        assert_eq!(tag.value(), "test");

        // Should trim whitespace
        let tag = Tag::new(" test ").unwrap();
        assert_eq!(tag.value(), "test");

        // Inner spaces are kept
        let tag = Tag::new("Web Design").unwrap();
        assert_eq!(tag.value(), "web design");
    }

    #[test]
    fn given_invalid_tag_value_when_create_tag_then_returns_error() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new("   ").is_err());
        assert!(Tag::new("test,tag").is_err());
    }

    #[test]
    fn given_tag_string_when_parse_tags_then_returns_ordered_distinct_tags() {
        let parsed = Tag::parse_tags("web, Design,tools").unwrap();
        assert_eq!(parsed, tags(&["web", "design", "tools"]));

        // Should handle extra commas, whitespace and case-insensitive duplicates
        let parsed = Tag::parse_tags(",Rust,, rust ,cli,").unwrap();
        assert_eq!(parsed, tags(&["rust", "cli"]));
    }

    #[test]
    fn given_raw_values_when_normalize_then_skips_blanks_and_duplicates() {
        let parsed = Tag::normalize(vec!["CSS", "", "design", "css ", "  "]).unwrap();
        assert_eq!(parsed, tags(&["css", "design"]));
    }

    #[test]
    fn given_empty_or_missing_input_when_parse_tag_option_then_returns_none() {
        assert!(Tag::parse_tag_option(None::<&str>).unwrap().is_none());
        assert!(Tag::parse_tag_option(Some("")).unwrap().is_none());
        assert!(Tag::parse_tag_option(Some("  ")).unwrap().is_none());

        let parsed = Tag::parse_tag_option(Some("a,b")).unwrap().unwrap();
        assert_eq!(parsed, tags(&["a", "b"]));
    }

    #[test]
    fn given_tags_when_format_then_keeps_insertion_order() {
        assert_eq!(Tag::format_tags(&tags(&["zeta", "alpha"])), ",zeta,alpha,");
        assert_eq!(Tag::format_tags(&[]), ",,");
        assert_eq!(Tag::join_tags(&tags(&["web", "design"])), "web, design");
        assert_eq!(Tag::join_tags(&[]), "");
    }

    #[test]
    fn given_stored_format_when_parse_then_round_trips_order() {
        let original = tags(&["zeta", "alpha", "mid"]);
        let parsed = Tag::parse_tags(Tag::format_tags(&original)).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn given_tag_lists_when_contains_any_then_checks_intersection() {
        let haystack = tags(&["css", "design"]);

        assert!(Tag::contains_any(&haystack, &tags(&["css", "react"])));
        assert!(!Tag::contains_any(&haystack, &tags(&["react", "vue"])));
        assert!(!Tag::contains_any(&haystack, &[]));
    }
}
