// src/domain/link.rs
use std::fmt;

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tag::Tag;

const MISSING_FIELDS: &str = "Please provide both title and URL";

/// Identifier assigned by the persistence layer; immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(String);

impl LinkId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    /// Fresh random identifier for newly created links
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form used for display
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A saved bookmark owned by exactly one user
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Materialize a link from persisted values.
    pub fn from_storage(
        id: LinkId,
        title: String,
        url: String,
        description: Option<String>,
        tags: Vec<Tag>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            url,
            description: description.filter(|d| !d.trim().is_empty()),
            tags,
            created_at,
        }
    }

    /// Build the stored link for a validated creation request
    pub fn from_new(id: LinkId, new_link: NewLink, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new_link.title,
            url: new_link.url,
            description: new_link.description,
            tags: new_link.tags,
            created_at,
        }
    }

    /// Apply a partial update. `id` and `created_at` are never touched.
    pub fn apply(&mut self, update: &LinkUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(url) = &update.url {
            self.url = url.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
    }

    /// Check if the link carries any of the given tags
    pub fn matches_any_tag<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>) -> bool {
        Tag::contains_any(&self.tags, tags)
    }

    /// Case-insensitive substring match over title, description, url and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.url.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.value().contains(needle))
    }

    /// Hostname of the link's URL, if it parses
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(ToString::to_string))
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.id.short(),
            self.title,
            self.url,
            Tag::join_tags(&self.tags)
        )
    }
}

/// Raw form input for a new link, before validation
#[derive(Builder, Debug, Clone, Default, PartialEq)]
#[builder(setter(into), default)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

impl LinkDraft {
    /// Validate required fields and normalize the draft into a creation request
    pub fn validate(self) -> DomainResult<NewLink> {
        NewLink::new(self.title, self.url, Some(self.description), self.tags)
    }
}

/// A link without id and timestamp, ready to be handed to the persistence provider
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    title: String,
    url: String,
    description: Option<String>,
    tags: Vec<Tag>,
}

impl NewLink {
    pub fn new<S: AsRef<str>>(
        title: S,
        url: S,
        description: Option<S>,
        tags: Vec<Tag>,
    ) -> DomainResult<Self> {
        let title = title.as_ref().trim();
        let url = url.as_ref().trim();

        if title.is_empty() || url.is_empty() {
            return Err(DomainError::InvalidLink(MISSING_FIELDS.to_string()));
        }

        Ok(Self {
            title: title.to_string(),
            url: url.to_string(),
            description: normalize_description(description),
            tags: Tag::normalize(tags.iter().map(Tag::value))?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// Partial update; `None` fields are left untouched.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<Option<String>>,
    pub tags: Option<Vec<Tag>>,
}

impl LinkUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        self.description = Some(description.map(Into::into));
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none() && self.tags.is_none()
    }

    /// Trim provided fields, reject blank title/url and dedupe tags
    pub fn normalized(self) -> DomainResult<Self> {
        let title = self.title.map(|t| t.trim().to_string());
        let url = self.url.map(|u| u.trim().to_string());

        if title.as_deref().is_some_and(str::is_empty) || url.as_deref().is_some_and(str::is_empty)
        {
            return Err(DomainError::InvalidLink(MISSING_FIELDS.to_string()));
        }

        let tags = match self.tags {
            Some(tags) => Some(Tag::normalize(tags.iter().map(Tag::value))?),
            None => None,
        };

        Ok(Self {
            title,
            url,
            description: self.description.map(normalize_description),
            tags,
        })
    }
}

fn normalize_description<S: AsRef<str>>(description: Option<S>) -> Option<String> {
    description
        .map(|d| d.as_ref().trim().to_string())
        .filter(|d| !d.is_empty())
}

impl From<LinkDraftBuilderError> for DomainError {
    fn from(e: LinkDraftBuilderError) -> Self {
        DomainError::InvalidLink(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<Tag> {
        values.iter().map(|v| Tag::new(v).unwrap()).collect()
    }

    fn sample_link() -> Link {
        Link::from_storage(
            LinkId::new("5c1d9a0e-0000-4000-8000-000000000001"),
            "React Docs".to_string(),
            "https://react.dev/learn".to_string(),
            Some("The library for web and native user interfaces".to_string()),
            tags(&["dev", "frontend"]),
            Utc::now(),
        )
    }

    #[test]
    fn given_draft_with_whitespace_when_validate_then_trims_and_normalizes() {
        let draft = LinkDraftBuilder::default()
            .title("  Rust Book ")
            .url(" https://doc.rust-lang.org/book/ ")
            .description("   ")
            .tags(tags(&["rust", "docs", "rust"]))
            .build()
            .unwrap();

        let new_link = draft.validate().unwrap();

        assert_eq!(new_link.title(), "Rust Book");
        assert_eq!(new_link.url(), "https://doc.rust-lang.org/book/");
        assert_eq!(new_link.description(), None);
        assert_eq!(new_link.tags(), tags(&["rust", "docs"]).as_slice());
    }

    #[test]
    fn given_draft_without_title_or_url_when_validate_then_returns_invalid_link() {
        let no_title = LinkDraftBuilder::default()
            .url("https://example.com")
            .build()
            .unwrap();
        let no_url = LinkDraftBuilder::default().title("Example").build().unwrap();

        for draft in [no_title, no_url] {
            match draft.validate() {
                Err(DomainError::InvalidLink(msg)) => assert_eq!(msg, MISSING_FIELDS),
                other => panic!("expected InvalidLink, got {:?}", other),
            }
        }
    }

    #[test]
    fn given_update_when_apply_then_id_and_created_at_are_kept() {
        let mut link = sample_link();
        let id = link.id.clone();
        let created_at = link.created_at;

        let update = LinkUpdate::new()
            .with_title("React")
            .with_description(None::<String>)
            .with_tags(tags(&["js"]));
        link.apply(&update);

        assert_eq!(link.id, id);
        assert_eq!(link.created_at, created_at);
        assert_eq!(link.title, "React");
        assert_eq!(link.url, "https://react.dev/learn");
        assert_eq!(link.description, None);
        assert_eq!(link.tags, tags(&["js"]));
    }

    #[test]
    fn given_blank_title_when_normalize_update_then_returns_error() {
        let result = LinkUpdate::new().with_title("   ").normalized();
        assert!(matches!(result, Err(DomainError::InvalidLink(_))));
    }

    #[test]
    fn given_blank_description_when_normalize_update_then_clears_description() {
        let update = LinkUpdate::new()
            .with_title(" New ")
            .with_description(Some("  "))
            .normalized()
            .unwrap();

        assert_eq!(update.title.as_deref(), Some("New"));
        assert_eq!(update.description, Some(None));
        assert!(update.url.is_none());
        assert!(!update.is_empty());
        assert!(LinkUpdate::new().is_empty());
    }

    #[test]
    fn given_link_when_contains_text_then_checks_all_fields() {
        let link = sample_link();

        assert!(link.contains_text("react"));
        assert!(link.contains_text("native user"));
        assert!(link.contains_text("react.dev"));
        assert!(link.contains_text("front"));
        assert!(!link.contains_text("vue"));
    }

    #[test]
    fn given_link_without_description_when_contains_text_then_skips_description() {
        let mut link = sample_link();
        link.description = None;

        assert!(!link.contains_text("native user"));
        assert!(link.contains_text("docs"));
    }

    #[test]
    fn given_urls_when_host_then_returns_hostname_or_none() {
        let link = sample_link();
        assert_eq!(link.host().as_deref(), Some("react.dev"));

        let mut broken = sample_link();
        broken.url = "not a url".to_string();
        assert_eq!(broken.host(), None);
    }

    #[test]
    fn given_link_id_when_short_then_returns_prefix() {
        assert_eq!(LinkId::new("5c1d9a0e-aaaa").short(), "5c1d9a0e");
        assert_eq!(LinkId::new("abc").short(), "abc");
        assert_ne!(LinkId::generate(), LinkId::generate());
    }

    #[test]
    fn given_blank_stored_description_when_from_storage_then_is_none() {
        let link = Link::from_storage(
            LinkId::new("1"),
            "t".to_string(),
            "https://t.example".to_string(),
            Some(String::new()),
            vec![],
            Utc::now(),
        );
        assert_eq!(link.description, None);
    }
}
