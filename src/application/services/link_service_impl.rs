// src/application/services/link_service_impl.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::link_service::LinkService;
use crate::domain::link::{Link, LinkId, LinkUpdate, NewLink};
use crate::domain::repositories::link_repository::LinkRepository;
use crate::domain::user::User;

#[derive(Debug)]
pub struct LinkServiceImpl<R: LinkRepository> {
    repository: Arc<R>,
}

impl<R: LinkRepository> LinkServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        debug!("Creating new LinkServiceImpl");
        Self { repository }
    }
}

#[async_trait]
impl<R: LinkRepository> LinkService for LinkServiceImpl<R> {
    #[instrument(skip(self, user), level = "debug", fields(user = %user.id))]
    async fn list_links(&self, user: &User) -> ApplicationResult<Vec<Link>> {
        let links = self
            .repository
            .list(&user.id)
            .await
            .map_err(ApplicationError::from_domain)?;
        debug!("Loaded {} links", links.len());
        Ok(links)
    }

    #[instrument(skip(self, user, new_link), level = "debug",
               fields(user = %user.id, url = %new_link.url()))]
    async fn add_link(&self, user: &User, new_link: NewLink) -> ApplicationResult<Link> {
        let link = self
            .repository
            .create(&user.id, new_link)
            .await
            .map_err(ApplicationError::from_domain)?;
        debug!("Created link {}", link.id);
        Ok(link)
    }

    #[instrument(skip(self, user, changes), level = "debug", fields(user = %user.id, id = %id))]
    async fn update_link(
        &self,
        user: &User,
        id: &LinkId,
        changes: LinkUpdate,
    ) -> ApplicationResult<Link> {
        if changes.is_empty() {
            return Err(ApplicationError::Validation(
                "Nothing to update: no field was given".to_string(),
            ));
        }
        let changes = changes.normalized().map_err(ApplicationError::from_domain)?;

        self.repository
            .update(&user.id, id, &changes)
            .await
            .map_err(ApplicationError::from_domain)
    }

    #[instrument(skip(self, user), level = "debug", fields(user = %user.id, id = %id))]
    async fn delete_link(&self, user: &User, id: &LinkId) -> ApplicationResult<()> {
        self.repository
            .delete(&user.id, id)
            .await
            .map_err(ApplicationError::from_domain)
    }
}
