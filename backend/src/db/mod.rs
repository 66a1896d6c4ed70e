pub mod model;
pub mod model_models;
pub mod model_schema;

use std::fs;
use std::path::Path;

use diesel::prelude::*;
use diesel::r2d2::{Pool, ConnectionManager, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use dotenvy::dotenv;
use parking_lot::Mutex;
use anyhow::{Context, Result, Error as AnyhowError};

use crate::{get_create_model_db_path, logger};

pub const MODEL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
pub struct DatabaseHandle {
    pool: SqlitePool,
    pub write_lock: Mutex<()>,
}

#[derive(Debug)]
pub struct DbManager {
    pub model: model::ModelDbHandle,
}

impl DatabaseHandle {
    pub fn new(database_url: &str) -> Result<Self> {
        let manager = ConnectionManager::new(database_url);
        let pool = Pool::builder()
            .max_size(5)
            .build(manager)
            .with_context(|| format!("Failed to create pool for: {}", database_url))?;

        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
        })
    }

    /// Opens the database file at `db_path`, creating it and its parent
    /// directory when missing, and brings the schema up to date.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create db directory: {:?}", parent))?;
            }
        }

        let database_url = db_path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid database path: {:?}", db_path))?;

        let handle = Self::new(database_url)?;

        let mut db_conn = handle.get_conn()
            .context("Failed to get connection for migrations")?;
        run_migrations(&mut db_conn)?;

        logger::info(&format!("Opened model db: {}", db_path.display()));

        Ok(handle)
    }

    pub fn get_conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(AnyhowError::from)
    }

    /// Performs a write operation on the database, guarded by a Mutex write_lock.
    pub fn do_write<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let _lock = self.write_lock.lock();
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for write")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }

    /// Performs a read operation on the database.
    pub fn do_read<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for read")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(MODEL_MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to execute pending database migrations: {}", e))?;
    Ok(())
}

impl DbManager {
    /// Opens the model database at its configured location.
    ///
    /// The store directory is resolved from the MODELSTORE_DIR environment
    /// variable (a .env file is honored) or the platform user-data directory.
    pub fn new() -> Result<Self> {
        dotenv().ok();

        let db_path = get_create_model_db_path()
            .map_err(|e| anyhow::anyhow!("Failed to resolve model db path: {}", e))?;

        Ok(Self {
            model: DatabaseHandle::open(&db_path)?,
        })
    }
}
