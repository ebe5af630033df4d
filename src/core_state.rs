//! Shared application state for request handlers.
//!
//! Holds only the location of the appointment database. Each request
//! opens its own connection, so concurrent handlers never share a
//! connection and SQLite's locking plus the schema's uniqueness index
//! arbitrate between them.

use std::path::{Path, PathBuf};

use crate::config;
use crate::db;

pub struct CoreState {
    db_path: PathBuf,
}

impl CoreState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// State pointing at the configured database location.
    pub fn from_config() -> Self {
        Self::new(config::database_path())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Creates the parent directory and brings the schema up to date.
    pub fn initialize(&self) -> Result<(), CoreError> {
        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::DataDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        db::open_database(&self.db_path)?;
        tracing::info!(path = %self.db_path.display(), "Appointment database ready");
        Ok(())
    }

    /// Open a fresh connection to the appointment database.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Cannot create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
}
