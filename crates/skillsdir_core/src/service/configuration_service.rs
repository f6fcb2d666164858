//! Configuration bootstrap service.
//!
//! # Responsibility
//! - Lazily create the singleton configuration on first access.
//! - Wipe the configuration namespace on request.
//!
//! # Invariants
//! - A configuration that already exists is returned unchanged.
//! - Losing a creation race is not an error: the winner's record is
//!   re-read and returned.
//! - Any storage failure other than "already exists" is surfaced.

use crate::model::configuration::Configuration;
use crate::repo::configuration_repo::ConfigurationRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for the configuration singleton.
pub struct ConfigurationService<R: ConfigurationRepository> {
    repo: R,
}

impl<R: ConfigurationRepository> ConfigurationService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the configuration, creating it with a fresh session key when
    /// absent.
    ///
    /// # Errors
    /// - `ConfigurationMissing` when the record is still absent after the
    ///   create attempt (e.g. wiped by a concurrent delete).
    pub fn get_or_create_configuration(&self) -> RepoResult<Configuration> {
        if let Some(existing) = self.repo.get_configuration()? {
            return Ok(existing);
        }

        let candidate = Configuration::generate(chrono::Utc::now());
        if self.repo.insert_configuration_if_absent(&candidate)? {
            info!("event=configuration_create module=configuration status=ok");
        } else {
            info!("event=configuration_create module=configuration status=skipped reason=already_exists");
        }

        match self.repo.get_configuration()? {
            Some(configuration) => Ok(configuration),
            None => {
                warn!("event=configuration_create module=configuration status=error error_code=missing_after_create");
                Err(RepoError::ConfigurationMissing)
            }
        }
    }

    /// Removes every configuration record.
    pub fn delete_configuration(&self) -> RepoResult<()> {
        let removed = self.repo.clear_configuration()?;
        info!("event=configuration_delete module=configuration status=ok removed={removed}");
        Ok(())
    }
}
