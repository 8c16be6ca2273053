use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "aimtrack.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the application data directory and applies pending migrations.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(&db_file_path)
    }

    /// Opens (or creates) a database file at `path` and applies pending migrations.
    pub fn open(path: &Path) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the default database file without touching its schema.
    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Ok(Connection::open(db_file_path)?)
    }
}
