// src/util/testing.rs

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use chrono::Utc;
use diesel::RunQueryDsl;
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::notification::{Notification, Notifier};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::link::{Link, LinkId, LinkUpdate, NewLink};
use crate::domain::repositories::link_repository::LinkRepository;
use crate::domain::tag::Tag;
use crate::domain::user::UserId;
use crate::infrastructure::repositories::memory::InMemoryLinkRepository;
use crate::infrastructure::repositories::sqlite::connection::{init_pool, ConnectionPool};
use crate::infrastructure::repositories::sqlite::model::NewDbUser;
use crate::infrastructure::repositories::sqlite::schema::users;

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    pub log_filter: String,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment (logging) exactly once.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv {
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()),
        }
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["diesel", "r2d2", "mio", "tokio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the `LINKLOCKER_*` environment on drop
#[derive(Debug, Clone)]
pub struct EnvGuard {
    db_url: Option<String>,
    session_file: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            db_url: env::var("LINKLOCKER_DB_URL").ok(),
            session_file: env::var("LINKLOCKER_SESSION_FILE").ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var("LINKLOCKER_DB_URL");
        env::remove_var("LINKLOCKER_SESSION_FILE");
        if let Some(val) = &self.db_url {
            env::set_var("LINKLOCKER_DB_URL", val);
        }
        if let Some(val) = &self.session_file {
            env::set_var("LINKLOCKER_SESSION_FILE", val);
        }
    }
}

/// Migrated database in a temporary directory; removed when dropped
pub struct TestDb {
    pub pool: ConnectionPool,
    pub dir: TempDir,
}

pub fn setup_test_db() -> TestDb {
    let _ = init_test_env();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("linklocker.db");
    let pool = init_pool(db_path.to_string_lossy().as_ref()).expect("Failed to create pool");
    TestDb { pool, dir }
}

/// Insert an account row so that links can reference it
pub fn insert_test_user(pool: &ConnectionPool, email: &str) -> UserId {
    let id = UserId::generate();
    let row = NewDbUser {
        id: id.as_str().to_string(),
        email: email.to_string(),
        password_hash: "unused".to_string(),
        created_at: Utc::now().naive_utc(),
    };
    let mut conn = pool.get().expect("Failed to get connection");
    diesel::insert_into(users::table)
        .values(&row)
        .execute(&mut conn)
        .expect("Failed to insert test user");
    id
}

/// Link with the given fields, a fresh id and no description
pub fn link_with(title: &str, url: &str, tags: &[&str]) -> Link {
    Link::from_storage(
        LinkId::generate(),
        title.to_string(),
        url.to_string(),
        None,
        Tag::normalize(tags.iter().copied()).expect("valid test tags"),
        Utc::now(),
    )
}

/// Notifier that keeps every notification for later assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().expect("notifier lock").clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.all().pop()
    }

    pub fn clear(&self) {
        self.notifications.lock().expect("notifier lock").clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("notifier lock")
            .push(notification);
    }
}

/// In-memory repository whose reads and writes can be switched to fail
#[derive(Debug)]
pub struct FailingLinkRepository {
    inner: InMemoryLinkRepository,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl Default for FailingLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl FailingLinkRepository {
    /// Every operation fails
    pub fn new() -> Self {
        Self {
            inner: InMemoryLinkRepository::new(),
            fail_reads: AtomicBool::new(true),
            fail_writes: AtomicBool::new(true),
        }
    }

    /// Nothing fails until switched
    pub fn healthy() -> Self {
        Self {
            inner: InMemoryLinkRepository::new(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> DomainResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(DomainError::RepositoryError(
                "simulated storage failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn list(&self, owner: &UserId) -> DomainResult<Vec<Link>> {
        Self::check(&self.fail_reads)?;
        self.inner.list(owner).await
    }

    async fn create(&self, owner: &UserId, new_link: NewLink) -> DomainResult<Link> {
        Self::check(&self.fail_writes)?;
        self.inner.create(owner, new_link).await
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &LinkId,
        changes: &LinkUpdate,
    ) -> DomainResult<Link> {
        Self::check(&self.fail_writes)?;
        self.inner.update(owner, id, changes).await
    }

    async fn delete(&self, owner: &UserId, id: &LinkId) -> DomainResult<()> {
        Self::check(&self.fail_writes)?;
        self.inner.delete(owner, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::sqlite::migration::table_exists;

    #[test]
    fn test_setup_test_db() {
        let db = setup_test_db();
        let mut conn = db.pool.get().unwrap();
        assert!(table_exists(&mut conn, "links").unwrap());
        assert!(db.dir.path().join("linklocker.db").exists());
    }

    #[tokio::test]
    async fn test_failing_repository_can_be_healed() {
        let repo = FailingLinkRepository::new();
        let owner = UserId::new("alice");
        assert!(repo.list(&owner).await.is_err());

        repo.set_fail_reads(false);
        assert!(repo.list(&owner).await.unwrap().is_empty());
    }
}
