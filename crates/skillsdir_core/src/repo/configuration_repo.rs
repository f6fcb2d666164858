//! Configuration repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Read, create-if-absent and wipe the singleton configuration record.
//!
//! # Invariants
//! - The only row key ever written is `CONFIGURATION_ID`; the table's
//!   `CHECK` constraint rejects anything else.
//! - Creation never replaces an existing record, so the session key is
//!   never regenerated while a record exists.

use super::schema::ensure_connection_ready;
use super::{RepoError, RepoResult};
use crate::model::configuration::{Configuration, CONFIGURATION_ID};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

/// Repository interface for the configuration singleton.
pub trait ConfigurationRepository {
    /// Gets the configuration record, if present.
    fn get_configuration(&self) -> RepoResult<Option<Configuration>>;
    /// Inserts `configuration` unless a record already exists.
    ///
    /// Returns `false` when another record was already present.
    fn insert_configuration_if_absent(&self, configuration: &Configuration) -> RepoResult<bool>;
    /// Removes every record in the configuration table.
    ///
    /// Returns the number of removed rows.
    fn clear_configuration(&self) -> RepoResult<usize>;
}

/// SQLite-backed configuration repository.
pub struct SqliteConfigurationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConfigurationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "configuration")?;
        Ok(Self { conn })
    }
}

impl ConfigurationRepository for SqliteConfigurationRepository<'_> {
    fn get_configuration(&self) -> RepoResult<Option<Configuration>> {
        let mut stmt = self.conn.prepare(
            "SELECT session_encryption_key, created_at
             FROM configuration
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([CONFIGURATION_ID])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let created_at_secs: i64 = row.get("created_at")?;
        let created_at = DateTime::<Utc>::from_timestamp(created_at_secs, 0).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{created_at_secs}` in configuration.created_at"
            ))
        })?;

        Ok(Some(Configuration {
            session_encryption_key: row.get("session_encryption_key")?,
            created_at,
        }))
    }

    fn insert_configuration_if_absent(&self, configuration: &Configuration) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "INSERT INTO configuration (id, session_encryption_key, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO NOTHING;",
            params![
                CONFIGURATION_ID,
                configuration.session_encryption_key.as_str(),
                configuration.created_at.timestamp(),
            ],
        )?;
        Ok(changed > 0)
    }

    fn clear_configuration(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM configuration;", [])?;
        Ok(removed)
    }
}
