// src/infrastructure/repositories/sqlite/migration.rs
use crate::infrastructure::repositories::sqlite::error::SqliteRepositoryError;
use diesel::sqlite::Sqlite;
use diesel::{RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, instrument};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Recreate the schema from scratch: revert everything, then run all migrations.
///
/// Used to get a clean database in tests.
pub fn init_db(
    connection: &mut impl MigrationHarness<Sqlite>,
) -> Result<(), SqliteRepositoryError> {
    debug!("{:?}", "--> initdb <--");

    connection.revert_all_migrations(MIGRATIONS).map_err(|e| {
        SqliteRepositoryError::MigrationError(format!("Failed to revert migrations: {}", e))
    })?;

    let pending = connection.pending_migrations(MIGRATIONS).map_err(|e| {
        SqliteRepositoryError::MigrationError(format!("Failed to get pending migrations: {}", e))
    })?;

    pending.iter().for_each(|m| {
        debug!("Pending Migration: {}", m.name());
    });

    connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        SqliteRepositoryError::MigrationError(format!("Failed to run pending migrations: {}", e))
    })?;

    Ok(())
}

/// Checks whether a table exists in the connected database
#[instrument(skip(conn), level = "debug")]
pub fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, SqliteRepositoryError> {
    use diesel::sql_query;
    use diesel::sql_types::{Integer, Text};
    use diesel::QueryableByName;

    #[derive(QueryableByName, Debug)]
    struct TableCheckResult {
        #[diesel(sql_type = Integer)]
        pub table_exists: i32,
    }

    let result: TableCheckResult = sql_query(
        "SELECT COUNT(*) as table_exists FROM sqlite_master WHERE type='table' AND name=?",
    )
    .bind::<Text, _>(table)
    .get_result(conn)
    .map_err(SqliteRepositoryError::DatabaseError)?;

    Ok(result.table_exists > 0)
}
