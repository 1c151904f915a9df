// src/application/dashboard.rs
//! The single owner of mutable view state.
//!
//! `Dashboard` holds the link collection and the filter selection, dispatches intents to the
//! collaborators and re-derives tag universe and visible links on every call.
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::notification::{Notification, Notifier};
use crate::application::services::link_service::LinkService;
use crate::domain::auth::AuthProvider;
use crate::domain::link::{Link, LinkDraft, LinkId, LinkUpdate};
use crate::domain::search::{collect_tags, count_tags, filter_links};
use crate::domain::selection::FilterSelection;
use crate::domain::tag::Tag;
use crate::domain::user::{Credentials, User};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Newest first, in the order the persistence provider returned them
    pub links: Vec<Link>,
    pub filter: FilterSelection,
    pub loading: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            filter: FilterSelection::default(),
            loading: true,
        }
    }
}

/// What to show when no link is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty
    NoLinks,
    /// Links exist but search or tag selection hides all of them
    NoMatches,
}

impl EmptyState {
    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoLinks => "No links yet",
            EmptyState::NoMatches => "No matching links",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            EmptyState::NoLinks => {
                "Start building your link collection by adding your first bookmark"
            }
            EmptyState::NoMatches => "Try adjusting your search or filters",
        }
    }
}

pub struct Dashboard {
    auth: Arc<dyn AuthProvider>,
    link_service: Arc<dyn LinkService>,
    notifier: Arc<dyn Notifier>,
    state: DashboardState,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("auth", &self.auth)
            .field("link_service", &self.link_service)
            .field("notifier", &"Arc<dyn Notifier>")
            .field("state", &self.state)
            .finish()
    }
}

impl Dashboard {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        link_service: Arc<dyn LinkService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            link_service,
            notifier,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn current_user(&self) -> Option<User> {
        self.auth.current_user()
    }

    fn report(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    // --- collection intents ---

    /// Fetch the collection of the current user. Without a session the collection is empty.
    #[instrument(skip(self), level = "debug")]
    pub async fn load(&mut self) -> ApplicationResult<()> {
        let Some(user) = self.auth.current_user() else {
            debug!("No session: clearing link collection");
            self.state.links.clear();
            self.state.loading = false;
            return Ok(());
        };

        let result = self.link_service.list_links(&user).await;
        self.state.loading = false;

        match result {
            Ok(links) => {
                self.state.links = links;
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching links: {}", e);
                self.report(Notification::error("Error", "Failed to load links"));
                Err(e)
            }
        }
    }

    /// Validate and persist a new link, then prepend it to the collection.
    ///
    /// Returns `Ok(None)` without side effects when nobody is signed in.
    #[instrument(skip(self, draft), level = "debug")]
    pub async fn add_link(&mut self, draft: LinkDraft) -> ApplicationResult<Option<Link>> {
        let new_link = match draft.validate() {
            Ok(new_link) => new_link,
            Err(e) => {
                let err = ApplicationError::from_domain(e);
                self.report_invalid_input(&err);
                return Err(err);
            }
        };

        let Some(user) = self.auth.current_user() else {
            debug!("No session: skipping add");
            return Ok(None);
        };

        match self.link_service.add_link(&user, new_link).await {
            Ok(link) => {
                self.state.links.insert(0, link.clone());
                self.report(Notification::success("Success", "Link added successfully"));
                Ok(Some(link))
            }
            Err(e) => {
                warn!("Error adding link: {}", e);
                self.report(Notification::error("Error", "Failed to add link"));
                Err(e)
            }
        }
    }

    /// Apply the update locally, persist it, and roll back on failure.
    #[instrument(skip(self, changes), level = "debug", fields(id = %id))]
    pub async fn update_link(
        &mut self,
        id: &LinkId,
        changes: LinkUpdate,
    ) -> ApplicationResult<Option<Link>> {
        let changes = match changes.normalized() {
            Ok(changes) => changes,
            Err(e) => {
                let err = ApplicationError::from_domain(e);
                self.report_invalid_input(&err);
                return Err(err);
            }
        };

        let Some(user) = self.auth.current_user() else {
            debug!("No session: skipping update");
            return Ok(None);
        };

        let snapshot = self.position(id).map(|idx| {
            let previous = self.state.links[idx].clone();
            self.state.links[idx].apply(&changes);
            previous
        });

        match self.link_service.update_link(&user, id, changes).await {
            Ok(link) => {
                match self.position(id) {
                    Some(idx) => self.state.links[idx] = link.clone(),
                    None => debug!("Updated link {} is not part of the local collection", id),
                }
                self.report(Notification::success("Success", "Link updated successfully"));
                Ok(Some(link))
            }
            Err(e) => {
                warn!("Error updating link: {}", e);
                if let (Some(previous), Some(idx)) = (snapshot, self.position(id)) {
                    self.state.links[idx] = previous;
                }
                self.report(Notification::error("Error", "Failed to update link"));
                Err(e)
            }
        }
    }

    /// Remove the link locally, persist the deletion, and restore it on failure.
    ///
    /// Returns `Ok(false)` without side effects when nobody is signed in.
    #[instrument(skip(self), level = "debug", fields(id = %id))]
    pub async fn delete_link(&mut self, id: &LinkId) -> ApplicationResult<bool> {
        let Some(user) = self.auth.current_user() else {
            debug!("No session: skipping delete");
            return Ok(false);
        };

        let removed = self
            .position(id)
            .map(|idx| (idx, self.state.links.remove(idx)));

        match self.link_service.delete_link(&user, id).await {
            Ok(()) => {
                self.report(Notification::success("Success", "Link deleted successfully"));
                Ok(true)
            }
            Err(e) => {
                warn!("Error deleting link: {}", e);
                if let Some((idx, link)) = removed {
                    let idx = idx.min(self.state.links.len());
                    self.state.links.insert(idx, link);
                }
                self.report(Notification::error("Error", "Failed to delete link"));
                Err(e)
            }
        }
    }

    fn position(&self, id: &LinkId) -> Option<usize> {
        self.state.links.iter().position(|l| &l.id == id)
    }

    fn report_invalid_input(&self, err: &ApplicationError) {
        let description = match err {
            ApplicationError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };
        self.report(Notification::error("Missing information", description));
    }

    // --- filter intents ---

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.filter.search = search.into();
    }

    pub fn select_tag(&mut self, tag: Tag) -> bool {
        self.state.filter.tags.select(tag)
    }

    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        self.state.filter.tags.remove(tag)
    }

    pub fn toggle_tag(&mut self, tag: Tag) -> bool {
        self.state.filter.tags.toggle(tag)
    }

    pub fn clear_tags(&mut self) {
        self.state.filter.tags.clear();
    }

    pub fn reset_filters(&mut self) {
        self.state.filter.reset();
    }

    // --- derived views ---

    /// Sorted tag universe of the whole collection
    pub fn all_tags(&self) -> Vec<Tag> {
        collect_tags(&self.state.links)
    }

    pub fn tag_counts(&self) -> Vec<(Tag, usize)> {
        count_tags(&self.state.links)
    }

    /// Links passing the current search and tag selection, collection order preserved
    pub fn visible_links(&self) -> Vec<Link> {
        filter_links(
            &self.state.links,
            &self.state.filter.search,
            &self.state.filter.tags,
        )
    }

    /// e.g. `2 links matching "rust" tagged with cli, tools`
    pub fn summary(&self) -> String {
        let count = self.visible_links().len();
        let mut summary = format!("{} {}", count, if count == 1 { "link" } else { "links" });

        let filter = &self.state.filter;
        if !filter.search.is_empty() {
            summary.push_str(&format!(" matching \"{}\"", filter.search));
        }
        if !filter.tags.is_empty() {
            summary.push_str(&format!(" tagged with {}", filter.tags.iter().join(", ")));
        }
        summary
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible_links().is_empty() {
            None
        } else if self.state.filter.is_active() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoLinks)
        }
    }

    /// Resolve a full id or an unambiguous id prefix against the loaded collection
    pub fn find_link(&self, id_or_prefix: &str) -> ApplicationResult<&Link> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(ApplicationError::Validation("Link id is required".to_string()));
        }

        if let Some(link) = self.state.links.iter().find(|l| l.id.as_str() == needle) {
            return Ok(link);
        }

        let candidates: Vec<&Link> = self
            .state
            .links
            .iter()
            .filter(|l| l.id.as_str().starts_with(needle))
            .collect();

        match candidates.as_slice() {
            [link] => Ok(link),
            [] => Err(ApplicationError::LinkNotFound(needle.to_string())),
            many => Err(ApplicationError::Validation(format!(
                "Id prefix '{}' is ambiguous ({} links match)",
                needle,
                many.len()
            ))),
        }
    }

    // --- session intents ---

    #[instrument(skip_all, level = "debug")]
    pub async fn sign_in(&mut self, credentials: &Credentials) -> ApplicationResult<User> {
        match self.auth.sign_in(credentials).await {
            Ok(user) => {
                debug!("Signed in as {}", user.email);
                self.load().await?;
                Ok(user)
            }
            Err(e) => {
                let err = ApplicationError::from_domain(e);
                self.report(Notification::error("Error signing in", err.to_string()));
                Err(err)
            }
        }
    }

    #[instrument(skip_all, level = "debug")]
    pub async fn sign_up(&mut self, credentials: &Credentials) -> ApplicationResult<User> {
        match self.auth.sign_up(credentials).await {
            Ok(user) => {
                self.report(Notification::success(
                    "Account created",
                    format!("Welcome, {}", user.email),
                ));
                self.load().await?;
                Ok(user)
            }
            Err(e) => {
                let err = ApplicationError::from_domain(e);
                self.report(Notification::error("Error signing up", err.to_string()));
                Err(err)
            }
        }
    }

    /// End the session and drop all user data from the view
    #[instrument(skip_all, level = "debug")]
    pub async fn sign_out(&mut self) -> ApplicationResult<()> {
        match self.auth.sign_out().await {
            Ok(()) => {
                self.state.links.clear();
                self.state.filter.reset();
                Ok(())
            }
            Err(e) => {
                let err = ApplicationError::from_domain(e);
                self.report(Notification::error("Error signing out", err.to_string()));
                Err(err)
            }
        }
    }
}
