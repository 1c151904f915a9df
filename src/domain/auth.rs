// src/domain/auth.rs
use async_trait::async_trait;

use crate::domain::error::DomainResult;
use crate::domain::user::{Credentials, User};

/// Authentication collaborator; the link core only reads `current_user` for gating
#[async_trait]
pub trait AuthProvider: std::fmt::Debug + Send + Sync {
    /// The signed-in user, if any
    fn current_user(&self) -> Option<User>;

    async fn sign_in(&self, credentials: &Credentials) -> DomainResult<User>;

    async fn sign_up(&self, credentials: &Credentials) -> DomainResult<User>;

    async fn sign_out(&self) -> DomainResult<()>;
}
