//! Construction-time store settings.
//!
//! # Invariants
//! - Settings are supplied by the caller; nothing here reads the process
//!   environment.
//! - `database_name` is a bare file stem, never a path.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DATABASE_FILE_EXTENSION: &str = "sqlite3";

/// Location of the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the database files.
    pub connection_string: String,
    /// Database namespace; becomes `<database_name>.sqlite3`.
    pub database_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfigError {
    EmptyConnectionString,
    EmptyDatabaseName,
    InvalidDatabaseName(String),
}

impl Display for StoreConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyConnectionString => write!(f, "connection string cannot be empty"),
            Self::EmptyDatabaseName => write!(f, "database name cannot be empty"),
            Self::InvalidDatabaseName(name) => write!(
                f,
                "database name `{name}` must not contain path separators or `..`"
            ),
        }
    }
}

impl Error for StoreConfigError {}

impl StoreConfig {
    pub fn new(connection_string: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            database_name: database_name.into(),
        }
    }

    /// Checks both settings without touching the filesystem.
    pub fn validate(&self) -> Result<(), StoreConfigError> {
        if self.connection_string.trim().is_empty() {
            return Err(StoreConfigError::EmptyConnectionString);
        }

        let name = self.database_name.trim();
        if name.is_empty() {
            return Err(StoreConfigError::EmptyDatabaseName);
        }
        if name.contains(['/', '\\']) || name.contains("..") {
            return Err(StoreConfigError::InvalidDatabaseName(
                self.database_name.clone(),
            ));
        }

        Ok(())
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(self.connection_string.trim()).join(format!(
            "{}.{DATABASE_FILE_EXTENSION}",
            self.database_name.trim()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, StoreConfigError};
    use std::path::PathBuf;

    #[test]
    fn database_path_joins_directory_and_name() {
        let config = StoreConfig::new("/var/lib/skills", "directory");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/skills").join("directory.sqlite3")
        );
    }

    #[test]
    fn validate_rejects_blank_and_path_like_values() {
        assert_eq!(
            StoreConfig::new(" ", "db").validate(),
            Err(StoreConfigError::EmptyConnectionString)
        );
        assert_eq!(
            StoreConfig::new("/tmp", "").validate(),
            Err(StoreConfigError::EmptyDatabaseName)
        );
        assert_eq!(
            StoreConfig::new("/tmp", "../escape").validate(),
            Err(StoreConfigError::InvalidDatabaseName("../escape".to_string()))
        );
    }
}
