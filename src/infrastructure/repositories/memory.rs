// src/infrastructure/repositories/memory.rs
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::link::{Link, LinkId, LinkUpdate, NewLink};
use crate::domain::repositories::link_repository::LinkRepository;
use crate::domain::user::UserId;

/// Process-local link store, keyed by owner; each collection is kept newest first.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<HashMap<UserId, Vec<Link>>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error<E: std::fmt::Display>(e: E) -> DomainError {
        DomainError::RepositoryError(format!("Failed to acquire lock: {}", e))
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    #[instrument(skip(self), level = "trace")]
    async fn list(&self, owner: &UserId) -> DomainResult<Vec<Link>> {
        let links = self.links.read().map_err(Self::lock_error)?;
        Ok(links.get(owner).cloned().unwrap_or_default())
    }

    #[instrument(skip(self, new_link), level = "trace")]
    async fn create(&self, owner: &UserId, new_link: NewLink) -> DomainResult<Link> {
        let link = Link::from_new(LinkId::generate(), new_link, Utc::now());
        let mut links = self.links.write().map_err(Self::lock_error)?;
        links.entry(owner.clone()).or_default().insert(0, link.clone());
        debug!("Stored link {} in memory", link.id);
        Ok(link)
    }

    #[instrument(skip(self, changes), level = "trace")]
    async fn update(
        &self,
        owner: &UserId,
        id: &LinkId,
        changes: &LinkUpdate,
    ) -> DomainResult<Link> {
        let mut links = self.links.write().map_err(Self::lock_error)?;
        let link = links
            .get_mut(owner)
            .and_then(|owned| owned.iter_mut().find(|l| &l.id == id))
            .ok_or_else(|| DomainError::LinkNotFound(id.to_string()))?;
        link.apply(changes);
        Ok(link.clone())
    }

    #[instrument(skip(self), level = "trace")]
    async fn delete(&self, owner: &UserId, id: &LinkId) -> DomainResult<()> {
        let mut links = self.links.write().map_err(Self::lock_error)?;
        let owned = links
            .get_mut(owner)
            .ok_or_else(|| DomainError::LinkNotFound(id.to_string()))?;
        let before = owned.len();
        owned.retain(|l| &l.id != id);
        if owned.len() == before {
            return Err(DomainError::LinkNotFound(id.to_string()));
        }
        Ok(())
    }
}
