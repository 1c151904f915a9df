// src/application/services/link_service.rs
use std::fmt::Debug;

use async_trait::async_trait;

use crate::application::error::ApplicationResult;
use crate::domain::link::{Link, LinkId, LinkUpdate, NewLink};
use crate::domain::user::User;

/// Service interface for link CRUD on behalf of a signed-in user
#[async_trait]
pub trait LinkService: Send + Sync + Debug {
    /// All links of the user, newest first
    async fn list_links(&self, user: &User) -> ApplicationResult<Vec<Link>>;

    /// Persist a validated new link
    async fn add_link(&self, user: &User, new_link: NewLink) -> ApplicationResult<Link>;

    /// Normalize and persist a partial update
    async fn update_link(
        &self,
        user: &User,
        id: &LinkId,
        changes: LinkUpdate,
    ) -> ApplicationResult<Link>;

    /// Delete a link permanently
    async fn delete_link(&self, user: &User, id: &LinkId) -> ApplicationResult<()>;
}
