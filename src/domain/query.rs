// src/domain/query.rs
use std::marker::PhantomData;

use crate::domain::link::Link;
use crate::domain::tag::Tag;

/*
   Specification pattern: each specification is one filtering rule over links,
   rules compose with AND into the visible-link predicate.
*/

/// The Specification trait defines a predicate that determines if an entity matches criteria
pub trait Specification<T> {
    /// Check if an entity satisfies this specification
    fn is_satisfied_by(&self, entity: &T) -> bool;
}

/// Combines specifications with logical AND
pub struct AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    spec_a: A,
    spec_b: B,
    _marker: PhantomData<T>,
}

impl<T, A, B> AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    pub fn new(spec_a: A, spec_b: B) -> Self {
        Self {
            spec_a,
            spec_b,
            _marker: PhantomData,
        }
    }
}

impl<T, A, B> Specification<T> for AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.spec_a.is_satisfied_by(entity) && self.spec_b.is_satisfied_by(entity)
    }
}

/// Free-text match over title, description, url and tags.
///
/// An empty query matches everything without inspecting the link.
pub struct TextMatchSpecification {
    needle: String,
}

impl TextMatchSpecification {
    pub fn new(query: impl AsRef<str>) -> Self {
        Self {
            needle: query.as_ref().to_lowercase(),
        }
    }
}

impl Specification<Link> for TextMatchSpecification {
    fn is_satisfied_by(&self, link: &Link) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        link.contains_text(&self.needle)
    }
}

/// Tag match with OR semantics; an empty selection matches everything
pub struct AnyTagSpecification {
    tags: Vec<Tag>,
}

impl AnyTagSpecification {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }
}

impl Specification<Link> for AnyTagSpecification {
    fn is_satisfied_by(&self, link: &Link) -> bool {
        self.tags.is_empty() || link.matches_any_tag(&self.tags)
    }
}

/// Extension trait to make combining specifications more readable
pub trait SpecificationExt<T>: Specification<T> {
    /// Combine with another specification using AND
    fn and<S: Specification<T>>(self, other: S) -> AndSpecification<T, Self, S>
    where
        Self: Sized,
    {
        AndSpecification::new(self, other)
    }
}

impl<T, S> SpecificationExt<T> for S where S: Specification<T> {}

/// The visible-link predicate: text match AND tag match
pub struct LinkFilter {
    specification: AndSpecification<Link, TextMatchSpecification, AnyTagSpecification>,
}

impl LinkFilter {
    pub fn new<'a>(search: &str, selected_tags: impl IntoIterator<Item = &'a Tag>) -> Self {
        let tags = selected_tags.into_iter().cloned().collect();
        Self {
            specification: TextMatchSpecification::new(search).and(AnyTagSpecification::new(tags)),
        }
    }

    pub fn matches(&self, link: &Link) -> bool {
        self.specification.is_satisfied_by(link)
    }

    /// Keep matching links, preserving their relative order
    pub fn apply(&self, links: &[Link]) -> Vec<Link> {
        links.iter().filter(|l| self.matches(l)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::link_with;

    #[test]
    fn test_and_specification() {
        let spec = TextMatchSpecification::new("rust").and(TextMatchSpecification::new("book"));

        let matching = link_with("The Rust Book", "https://doc.rust-lang.org/book", &[]);
        let partial = link_with("Rust Blog", "https://blog.rust-lang.org", &[]);

        assert!(spec.is_satisfied_by(&matching));
        assert!(!spec.is_satisfied_by(&partial));
    }

    #[test]
    fn given_empty_query_when_text_match_then_always_satisfied() {
        let spec = TextMatchSpecification::new("");
        let mut link = link_with("Anything", "https://example.com", &[]);
        link.description = None;

        assert!(spec.is_satisfied_by(&link));
    }

    #[test]
    fn given_empty_selection_when_any_tag_then_always_satisfied() {
        let spec = AnyTagSpecification::new(vec![]);
        assert!(spec.is_satisfied_by(&link_with("Untagged", "https://example.com", &[])));
    }

    #[test]
    fn given_search_and_tags_when_link_filter_then_both_must_hold() {
        let selected = vec![Tag::new("css").unwrap()];
        let filter = LinkFilter::new("grid", &selected);

        let both = link_with("CSS Grid guide", "https://css-tricks.com", &["css"]);
        let text_only = link_with("Grid systems", "https://example.com", &["design"]);
        let tag_only = link_with("Flexbox", "https://example.com", &["css"]);

        assert!(filter.matches(&both));
        assert!(!filter.matches(&text_only));
        assert!(!filter.matches(&tag_only));
    }
}
