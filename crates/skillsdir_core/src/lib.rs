//! Data-access layer for the skills directory.
//!
//! Persists profiles (with versioned skill history), the skill tag
//! vocabulary and the singleton application configuration.

pub mod access;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use access::{DataAccess, SqliteDataAccess};
pub use config::{StoreConfig, StoreConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::configuration::{Configuration, CONFIGURATION_ID};
pub use model::profile::{
    email_domain, ModelValidationError, Profile, ProfileUpdate, SkillLevel, SkillSnapshot,
};
pub use model::skill_tag::clean_tag;
pub use repo::configuration_repo::{ConfigurationRepository, SqliteConfigurationRepository};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use repo::skill_tag_repo::{SkillTagRepository, SqliteSkillTagRepository};
pub use repo::{RepoError, RepoResult};
pub use service::configuration_service::ConfigurationService;
pub use service::profile_service::{ProfileService, ProfileUpsert};
pub use service::skill_tag_service::SkillTagService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
