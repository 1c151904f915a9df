// src/infrastructure/repositories/sqlite/repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, instrument};

use super::connection::{run_blocking, ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::error::DomainResult;
use crate::domain::link::{Link, LinkId, LinkUpdate, NewLink};
use crate::domain::repositories::link_repository::LinkRepository;
use crate::domain::tag::Tag;
use crate::domain::user::UserId;
use crate::infrastructure::repositories::sqlite::model::{DbLink, DbLinkChanges, NewDbLink};
use crate::infrastructure::repositories::sqlite::schema::links::dsl;

#[derive(Clone, Debug)]
pub struct SqliteLinkRepository {
    pool: ConnectionPool,
}

impl SqliteLinkRepository {
    /// Create a new SQLite repository with the provided connection pool
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Create a new SQLite repository with the provided database URL, running all migrations
    #[instrument(skip_all, level = "debug")]
    pub fn from_url(database_url: &str) -> SqliteResult<Self> {
        let pool = super::connection::init_pool(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Get a connection from the pool
    #[instrument(skip_all, level = "debug")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    /// Convert a database model to a domain entity
    #[instrument(skip_all, level = "trace")]
    fn to_domain_model(db_link: DbLink) -> SqliteResult<Link> {
        let tags = Tag::parse_tags(&db_link.tags).map_err(|e| {
            SqliteRepositoryError::ConversionError(format!(
                "Invalid tags '{}' for link {}: {}",
                db_link.tags, db_link.id, e
            ))
        })?;

        Ok(Link::from_storage(
            LinkId::new(db_link.id),
            db_link.title,
            db_link.url,
            db_link.description,
            tags,
            DateTime::<Utc>::from_naive_utc_and_offset(db_link.created_at, Utc),
        ))
    }

    fn to_db_changes(changes: &LinkUpdate) -> DbLinkChanges {
        DbLinkChanges {
            title: changes.title.clone(),
            url: changes.url.clone(),
            description: changes.description.clone(),
            tags: changes.tags.as_deref().map(Tag::format_tags),
        }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    #[instrument(skip(self), level = "debug")]
    async fn list(&self, owner: &UserId) -> DomainResult<Vec<Link>> {
        let owner = owner.as_str().to_string();
        let rows = run_blocking(&self.pool, move |conn| {
            Ok(dsl::links
                .filter(dsl::user_id.eq(owner))
                .order(dsl::created_at.desc())
                .select(DbLink::as_select())
                .load::<DbLink>(conn)?)
        })
        .await?;

        debug!("Fetched {} rows", rows.len());
        let links = rows
            .into_iter()
            .map(Self::to_domain_model)
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(links)
    }

    #[instrument(skip(self, new_link), level = "debug")]
    async fn create(&self, owner: &UserId, new_link: NewLink) -> DomainResult<Link> {
        let link = Link::from_new(LinkId::generate(), new_link, Utc::now());
        let row = NewDbLink {
            id: link.id.as_str().to_string(),
            user_id: owner.as_str().to_string(),
            title: link.title.clone(),
            url: link.url.clone(),
            description: link.description.clone(),
            tags: Tag::format_tags(&link.tags),
            created_at: link.created_at.naive_utc(),
        };
        debug!("Inserting link: {:?}", row);

        run_blocking(&self.pool, move |conn| {
            diesel::insert_into(dsl::links).values(&row).execute(conn)?;
            Ok(())
        })
        .await?;

        Ok(link)
    }

    #[instrument(skip(self, changes), level = "debug")]
    async fn update(
        &self,
        owner: &UserId,
        id: &LinkId,
        changes: &LinkUpdate,
    ) -> DomainResult<Link> {
        let owner = owner.as_str().to_string();
        let id = id.as_str().to_string();
        let changes = Self::to_db_changes(changes);

        let row = run_blocking(&self.pool, move |conn| {
            conn.transaction::<DbLink, SqliteRepositoryError, _>(|conn| {
                if !changes.is_empty() {
                    let updated = diesel::update(
                        dsl::links
                            .filter(dsl::id.eq(&id))
                            .filter(dsl::user_id.eq(&owner)),
                    )
                    .set(&changes)
                    .execute(conn)?;

                    if updated == 0 {
                        return Err(SqliteRepositoryError::LinkNotFound(id.clone()));
                    }
                }

                dsl::links
                    .filter(dsl::id.eq(&id))
                    .filter(dsl::user_id.eq(&owner))
                    .select(DbLink::as_select())
                    .first::<DbLink>(conn)
                    .optional()?
                    .ok_or_else(|| SqliteRepositoryError::LinkNotFound(id.clone()))
            })
        })
        .await?;

        Ok(Self::to_domain_model(row)?)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, owner: &UserId, id: &LinkId) -> DomainResult<()> {
        let owner = owner.as_str().to_string();
        let id = id.as_str().to_string();

        run_blocking(&self.pool, move |conn| {
            let deleted = diesel::delete(
                dsl::links
                    .filter(dsl::id.eq(&id))
                    .filter(dsl::user_id.eq(&owner)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(SqliteRepositoryError::LinkNotFound(id));
            }
            Ok(())
        })
        .await?;

        Ok(())
    }
}
