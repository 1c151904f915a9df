// src/infrastructure/auth/memory.rs
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::password::{hash_password, verify_password};
use super::{ALREADY_REGISTERED, INVALID_LOGIN};
use crate::domain::auth::AuthProvider;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::user::{Credentials, User, UserId};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_hash: String,
}

/// Session and account store living only as long as the process
#[derive(Debug, Default)]
pub struct InMemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    session: RwLock<Option<User>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider with an active session for `user` and no registered accounts
    pub fn signed_in(user: User) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            session: RwLock::new(Some(user)),
        }
    }

    fn set_session(&self, user: Option<User>) -> DomainResult<()> {
        let mut session = self
            .session
            .write()
            .map_err(|e| DomainError::Other(format!("Failed to acquire lock: {}", e)))?;
        *session = user;
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    fn current_user(&self) -> Option<User> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    #[instrument(skip_all, level = "debug")]
    async fn sign_in(&self, credentials: &Credentials) -> DomainResult<User> {
        credentials.validate()?;
        let account = {
            let accounts = self
                .accounts
                .read()
                .map_err(|e| DomainError::Other(format!("Failed to acquire lock: {}", e)))?;
            accounts.get(&credentials.email).cloned()
        };

        match account {
            Some(account)
                if verify_password(&credentials.password, &account.password_hash) =>
            {
                self.set_session(Some(account.user.clone()))?;
                Ok(account.user)
            }
            _ => Err(DomainError::Authentication(INVALID_LOGIN.to_string())),
        }
    }

    #[instrument(skip_all, level = "debug")]
    async fn sign_up(&self, credentials: &Credentials) -> DomainResult<User> {
        credentials.validate()?;
        let user = {
            let mut accounts = self
                .accounts
                .write()
                .map_err(|e| DomainError::Other(format!("Failed to acquire lock: {}", e)))?;
            if accounts.contains_key(&credentials.email) {
                return Err(DomainError::Authentication(ALREADY_REGISTERED.to_string()));
            }

            let user = User::new(UserId::generate(), credentials.email.clone());
            let password_hash = hash_password(&credentials.password)?;
            accounts.insert(
                credentials.email.clone(),
                Account {
                    user: user.clone(),
                    password_hash,
                },
            );
            user
        };

        debug!("Registered {}", user.email);
        self.set_session(Some(user.clone()))?;
        Ok(user)
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.set_session(None)
    }
}
