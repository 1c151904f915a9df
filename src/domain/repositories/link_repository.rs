// src/domain/repositories/link_repository.rs
use async_trait::async_trait;

use crate::domain::error::DomainResult;
use crate::domain::link::{Link, LinkId, LinkUpdate, NewLink};
use crate::domain::user::UserId;

/*
   Persistence provider for links.
   Every call is scoped to one user: a user never sees or touches another user's links.
   Implementations assign `id` and `created_at` on create and return `list` newest first.
*/
#[async_trait]
pub trait LinkRepository: std::fmt::Debug + Send + Sync {
    /// All links of the user, newest first by `created_at`
    async fn list(&self, user_id: &UserId) -> DomainResult<Vec<Link>>;

    /// Store a new link, assigning id and creation timestamp
    async fn create(&self, user_id: &UserId, new_link: NewLink) -> DomainResult<Link>;

    /// Apply a partial update and return the stored result
    async fn update(&self, user_id: &UserId, id: &LinkId, changes: &LinkUpdate)
        -> DomainResult<Link>;

    /// Remove the link permanently
    async fn delete(&self, user_id: &UserId, id: &LinkId) -> DomainResult<()>;
}
