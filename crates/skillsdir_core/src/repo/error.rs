//! Repository error taxonomy.
//!
//! # Responsibility
//! - Give every store operation one error type covering input validation,
//!   SQLite failures, lost write races and corrupt persisted data.
//!
//! # Invariants
//! - Absence of a record is never an error here; repositories report it as
//!   `Option`/`bool`.
//! - `VersionConflict` means nothing was written.

use crate::db::DbError;
use crate::model::profile::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for every store operation.
#[derive(Debug)]
pub enum RepoError {
    /// Caller input rejected before touching storage.
    Validation(ModelValidationError),
    /// Connection, statement or schema failure.
    Db(DbError),
    /// Stored profile version moved between read and write.
    ///
    /// `actual` is `0` when the profile no longer exists.
    VersionConflict {
        email_address: String,
        expected: i64,
        actual: i64,
    },
    /// Configuration still absent after the create attempt.
    ConfigurationMissing,
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be decoded into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::VersionConflict {
                email_address,
                expected,
                actual,
            } => write!(
                f,
                "profile `{email_address}` changed concurrently: expected version {expected}, found {actual}"
            ),
            Self::ConfigurationMissing => write!(f, "configuration not found"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::VersionConflict { .. } => None,
            Self::ConfigurationMissing => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
