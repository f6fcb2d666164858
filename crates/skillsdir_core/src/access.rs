//! Connection-per-operation facade over the store.
//!
//! # Responsibility
//! - Expose the nine store operations behind one `DataAccess` trait.
//! - Open a fresh connection per call and release it on every exit path.
//!
//! # Invariants
//! - No connection, lock or transaction outlives a single call.
//! - Failures are returned immediately; nothing is retried.

use crate::config::{StoreConfig, StoreConfigError};
use crate::db::open_db;
use crate::model::configuration::Configuration;
use crate::model::profile::{Profile, ProfileUpdate};
use crate::repo::configuration_repo::SqliteConfigurationRepository;
use crate::repo::profile_repo::SqliteProfileRepository;
use crate::repo::skill_tag_repo::SqliteSkillTagRepository;
use crate::repo::RepoResult;
use crate::service::configuration_service::ConfigurationService;
use crate::service::profile_service::{ProfileService, ProfileUpsert};
use crate::service::skill_tag_service::SkillTagService;
use rusqlite::Connection;

/// Operations the store offers to upstream callers.
pub trait DataAccess {
    /// Profiles visible to `email_address`: those in the same domain.
    fn list_profiles(&self, email_address: &str) -> RepoResult<Vec<Profile>>;
    fn get_profile(&self, email_address: &str) -> RepoResult<Option<Profile>>;
    /// Creates or updates a profile; the only profile mutation path.
    fn update_profile(&self, update: &ProfileUpdate) -> RepoResult<ProfileUpsert>;
    fn delete_profile(&self, email_address: &str) -> RepoResult<bool>;
    fn list_skill_tags(&self) -> RepoResult<Vec<String>>;
    fn add_skill_tags(&self, tags: &[String]) -> RepoResult<()>;
    fn delete_skill_tags(&self, tags: &[String]) -> RepoResult<()>;
    fn get_or_create_configuration(&self) -> RepoResult<Configuration>;
    /// Wipes the whole configuration namespace.
    fn delete_configuration(&self) -> RepoResult<()>;
}

/// SQLite-backed `DataAccess` that connects once per operation.
#[derive(Debug, Clone)]
pub struct SqliteDataAccess {
    config: StoreConfig,
}

impl SqliteDataAccess {
    /// Builds the facade after validating `config`. Does not connect.
    pub fn new(config: StoreConfig) -> Result<Self, StoreConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn connect(&self) -> RepoResult<Connection> {
        Ok(open_db(self.config.database_path())?)
    }
}

impl DataAccess for SqliteDataAccess {
    fn list_profiles(&self, email_address: &str) -> RepoResult<Vec<Profile>> {
        let conn = self.connect()?;
        let service = ProfileService::new(SqliteProfileRepository::try_new(&conn)?);
        service.list_profiles(email_address)
    }

    fn get_profile(&self, email_address: &str) -> RepoResult<Option<Profile>> {
        let conn = self.connect()?;
        let service = ProfileService::new(SqliteProfileRepository::try_new(&conn)?);
        service.get_profile(email_address)
    }

    fn update_profile(&self, update: &ProfileUpdate) -> RepoResult<ProfileUpsert> {
        let conn = self.connect()?;
        let service = ProfileService::new(SqliteProfileRepository::try_new(&conn)?);
        service.update_profile(update)
    }

    fn delete_profile(&self, email_address: &str) -> RepoResult<bool> {
        let conn = self.connect()?;
        let service = ProfileService::new(SqliteProfileRepository::try_new(&conn)?);
        service.delete_profile(email_address)
    }

    fn list_skill_tags(&self) -> RepoResult<Vec<String>> {
        let conn = self.connect()?;
        let service = SkillTagService::new(SqliteSkillTagRepository::try_new(&conn)?);
        service.list_skill_tags()
    }

    fn add_skill_tags(&self, tags: &[String]) -> RepoResult<()> {
        let conn = self.connect()?;
        let service = SkillTagService::new(SqliteSkillTagRepository::try_new(&conn)?);
        service.add_skill_tags(tags)
    }

    fn delete_skill_tags(&self, tags: &[String]) -> RepoResult<()> {
        let conn = self.connect()?;
        let service = SkillTagService::new(SqliteSkillTagRepository::try_new(&conn)?);
        service.delete_skill_tags(tags)
    }

    fn get_or_create_configuration(&self) -> RepoResult<Configuration> {
        let conn = self.connect()?;
        let service =
            ConfigurationService::new(SqliteConfigurationRepository::try_new(&conn)?);
        service.get_or_create_configuration()
    }

    fn delete_configuration(&self) -> RepoResult<()> {
        let conn = self.connect()?;
        let service =
            ConfigurationService::new(SqliteConfigurationRepository::try_new(&conn)?);
        service.delete_configuration()
    }
}
