//! Database schema migration management and versioning.
//!
//! Each migration has a version, a name and an `up` function run inside a
//! transaction. Applied versions are recorded in the `migrations` table so
//! that opening a database only applies what is still pending.
//!
//! ```rust,no_run
//! use aimtrack::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("aimtrack.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table for applied migrations.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of schema migrations in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: document table keyed by (collection, id)
        self.add_migration(1, "create_documents", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS documents (
                    collection TEXT NOT NULL,
                    id TEXT NOT NULL,
                    revision INTEGER NOT NULL DEFAULT 1,
                    body TEXT NOT NULL,
                    PRIMARY KEY (collection, id)
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: write timestamps for auditing and export
        self.add_migration(2, "add_documents_updated_at", |tx| {
            tx.execute("ALTER TABLE documents ADD COLUMN updated_at TIMESTAMP", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_documents_updated_at ON documents(updated_at)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every pending migration inside a single transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest applied version, 0 for a fresh database.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row(
            "SELECT COUNT(*) FROM migrations WHERE version = ?1",
            params![version],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, ordered by version.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies all pending migrations to `conn`.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// `true` when `conn` is behind the latest registered migration.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    let latest = manager.migrations.last().map(|m| m.version).unwrap_or(0);
    Ok(current < latest)
}
