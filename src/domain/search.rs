// src/domain/search.rs
//! Derived views over an in-memory link collection.
//!
//! All functions are pure: the same input always yields the same output, nothing is cached.
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::link::Link;
use crate::domain::query::LinkFilter;
use crate::domain::tag::Tag;

/// Distinct tags across all links, sorted ascending
pub fn collect_tags(links: &[Link]) -> Vec<Tag> {
    links
        .iter()
        .flat_map(|link| link.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of links carrying each tag, sorted by tag
pub fn count_tags(links: &[Link]) -> Vec<(Tag, usize)> {
    let mut counts: BTreeMap<Tag, usize> = BTreeMap::new();
    for tag in links.iter().flat_map(|link| link.tags.iter()) {
        *counts.entry(tag.clone()).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Links matching the search string and at least one selected tag, in collection order
pub fn filter_links<'a>(
    links: &[Link],
    search: &str,
    selected_tags: impl IntoIterator<Item = &'a Tag>,
) -> Vec<Link> {
    LinkFilter::new(search, selected_tags).apply(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::link_with;

    fn tags(values: &[&str]) -> Vec<Tag> {
        values.iter().map(|v| Tag::new(v).unwrap()).collect()
    }

    fn titles(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.title.as_str()).collect()
    }

    fn scenario() -> Vec<Link> {
        vec![
            link_with("A", "https://a.example", &["css", "design"]),
            link_with("B", "https://b.example", &["react"]),
            link_with("C", "https://c.example", &[]),
        ]
    }

    #[test]
    fn given_empty_collection_when_collect_tags_then_returns_empty() {
        assert!(collect_tags(&[]).is_empty());
        assert!(count_tags(&[]).is_empty());
    }

    #[test]
    fn given_links_when_collect_tags_then_returns_sorted_distinct_tags() {
        let links = vec![
            link_with("one", "https://1.example", &["zeta", "css"]),
            link_with("two", "https://2.example", &["css", "alpha"]),
        ];

        assert_eq!(collect_tags(&links), tags(&["alpha", "css", "zeta"]));
        // idempotent
        assert_eq!(collect_tags(&links), collect_tags(&links));
    }

    #[test]
    fn given_links_when_count_tags_then_counts_links_per_tag() {
        let links = vec![
            link_with("one", "https://1.example", &["css", "web"]),
            link_with("two", "https://2.example", &["css"]),
        ];

        let counts = count_tags(&links);
        assert_eq!(
            counts,
            vec![(Tag::new("css").unwrap(), 2), (Tag::new("web").unwrap(), 1)]
        );
    }

    #[test]
    fn given_selected_tag_when_filter_then_returns_tagged_links_only() {
        let links = scenario();
        let selected = tags(&["css"]);

        assert_eq!(titles(&filter_links(&links, "", &selected)), vec!["A"]);
    }

    #[test]
    fn given_no_selection_when_filter_then_returns_everything_in_order() {
        let links = scenario();

        assert_eq!(titles(&filter_links(&links, "", &[])), vec!["A", "B", "C"]);
    }

    #[test]
    fn given_multiple_selected_tags_when_filter_then_uses_or_semantics() {
        let links = scenario();
        let selected = tags(&["css", "react"]);

        assert_eq!(titles(&filter_links(&links, "", &selected)), vec!["A", "B"]);
    }

    #[test]
    fn given_mixed_case_query_when_filter_then_matches_case_insensitively() {
        let links = vec![link_with("React Docs", "https://react.dev", &["dev"])];

        assert_eq!(filter_links(&links, "REACT", &[]).len(), 1);
        assert_eq!(filter_links(&links, "dev", &[]).len(), 1);
        assert!(filter_links(&links, "vue", &[]).is_empty());
    }

    #[test]
    fn given_filtered_result_when_filter_again_then_is_stable() {
        let links = scenario();
        let selected = tags(&["css", "react"]);

        let once = filter_links(&links, "example", &selected);
        let twice = filter_links(&once, "example", &selected);

        assert_eq!(once, twice);
    }
}
