// src/infrastructure/auth/local.rs
//! Accounts stored in the local database, session persisted as a JSON file so that
//! consecutive CLI invocations share one sign-in.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::password::{hash_password, verify_password};
use super::{ALREADY_REGISTERED, INVALID_LOGIN};
use crate::domain::auth::AuthProvider;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::user::{Credentials, User, UserId};
use crate::infrastructure::repositories::sqlite::connection::{run_blocking, ConnectionPool};
use crate::infrastructure::repositories::sqlite::error::SqliteRepositoryError;
use crate::infrastructure::repositories::sqlite::model::{DbUser, NewDbUser};
use crate::infrastructure::repositories::sqlite::schema::users::dsl;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    user: User,
    signed_in_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct LocalAuthProvider {
    pool: ConnectionPool,
    session_file: PathBuf,
    session: RwLock<Option<User>>,
}

impl LocalAuthProvider {
    /// Create the provider and restore a session left behind by a previous run
    pub fn new(pool: ConnectionPool, session_file: impl Into<PathBuf>) -> Self {
        let session_file = session_file.into();
        let session = read_session(&session_file);
        Self {
            pool,
            session_file,
            session: RwLock::new(session),
        }
    }

    pub fn session_file(&self) -> &Path {
        &self.session_file
    }

    fn start_session(&self, user: &User) -> DomainResult<()> {
        let stored = StoredSession {
            user: user.clone(),
            signed_in_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| DomainError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.session_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.session_file, json)?;
        debug!("Session written to {}", self.session_file.display());

        self.set_session(Some(user.clone()))
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

fn read_session(path: &Path) -> Option<User> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<StoredSession>(&content) {
        Ok(stored) => Some(stored.user),
        Err(e) => {
            warn!("Ignoring unreadable session file {}: {}", path.display(), e);
            None
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    fn current_user(&self) -> Option<User> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    #[instrument(skip_all, level = "debug")]
    async fn sign_in(&self, credentials: &Credentials) -> DomainResult<User> {
        credentials.validate()?;
        let email = credentials.email.clone();

        let account = run_blocking(&self.pool, move |conn| {
            Ok(dsl::users
                .filter(dsl::email.eq(email))
                .select(DbUser::as_select())
                .first::<DbUser>(conn)
                .optional()?)
        })
        .await?;

        let user = match account {
            Some(account)
                if verify_password(&credentials.password, &account.password_hash) =>
            {
                User::new(UserId::new(account.id), account.email)
            }
            _ => return Err(DomainError::Authentication(INVALID_LOGIN.to_string())),
        };

        self.start_session(&user)?;
        Ok(user)
    }

    #[instrument(skip_all, level = "debug")]
    async fn sign_up(&self, credentials: &Credentials) -> DomainResult<User> {
        credentials.validate()?;

        let row = NewDbUser {
            id: UserId::generate().as_str().to_string(),
            email: credentials.email.clone(),
            password_hash: hash_password(&credentials.password)?,
            created_at: Utc::now().naive_utc(),
        };
        let user = User::new(UserId::new(row.id.clone()), row.email.clone());

        let inserted = run_blocking(&self.pool, move |conn| {
            diesel::insert_into(dsl::users).values(&row).execute(conn)?;
            Ok(())
        })
        .await;

        match inserted {
            Ok(()) => {}
            Err(SqliteRepositoryError::DatabaseError(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _,
            ))) => {
                return Err(DomainError::Authentication(ALREADY_REGISTERED.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        debug!("Registered {}", user.email);
        self.start_session(&user)?;
        Ok(user)
    }

    #[instrument(skip_all, level = "debug")]
    async fn sign_out(&self) -> DomainResult<()> {
        if self.session_file.exists() {
            fs::remove_file(&self.session_file)?;
        }
        self.set_session(None)
    }
}
