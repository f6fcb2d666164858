//! Profile use-case service.
//!
//! # Responsibility
//! - Run the read-modify-write protocol behind `update_profile`.
//! - Scope list queries to the caller's email domain.
//!
//! # Invariants
//! - Creation and update share one entry point; `created` reports which
//!   happened.
//! - The write is conditional on the version read at the start of the call,
//!   so a concurrent writer is detected instead of overwritten.

use crate::model::profile::{email_domain, Profile, ProfileUpdate};
use crate::repo::profile_repo::ProfileRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::time::Instant;

/// Outcome of one `update_profile` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpsert {
    /// Profile exactly as persisted by the call.
    pub profile: Profile,
    /// `true` when no profile existed for the email address before.
    pub created: bool,
}

/// Use-case service wrapper for profile operations.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the profiles sharing the caller's email domain.
    pub fn list_profiles(&self, email_address: &str) -> RepoResult<Vec<Profile>> {
        let domain = email_domain(email_address)?;
        self.repo.list_profiles_by_domain(&domain)
    }

    /// Gets one profile by email address.
    pub fn get_profile(&self, email_address: &str) -> RepoResult<Option<Profile>> {
        self.repo.get_profile(email_address)
    }

    /// Creates or updates the profile named by `update`, stamped now.
    pub fn update_profile(&self, update: &ProfileUpdate) -> RepoResult<ProfileUpsert> {
        self.update_profile_at(update, Utc::now())
    }

    /// Creates or updates the profile named by `update` as of `now`.
    ///
    /// # Errors
    /// - `Validation` when the email address has no derivable domain.
    /// - `VersionConflict` when another writer changed the profile after it
    ///   was read. Nothing is written in that case.
    pub fn update_profile_at(
        &self,
        update: &ProfileUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<ProfileUpsert> {
        let started_at = Instant::now();
        let (mut profile, created) = match self.repo.get_profile(&update.email_address)? {
            Some(existing) => (existing, false),
            None => (Profile::new(update.email_address.as_str())?, true),
        };
        let expected_version = profile.version;

        profile.apply_update(update, now)?;

        let written = if created {
            self.repo.insert_profile(&profile)
        } else {
            self.repo.replace_profile(&profile, expected_version)
        };

        match written {
            Ok(()) => {
                info!(
                    "event=profile_update module=profile status=ok created={} domain={} version={} history_len={} duration_ms={}",
                    created,
                    profile.domain,
                    profile.version,
                    profile.skills_history.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(ProfileUpsert { profile, created })
            }
            Err(err @ RepoError::VersionConflict { .. }) => {
                warn!(
                    "event=profile_update module=profile status=conflict domain={} expected_version={} duration_ms={}",
                    profile.domain,
                    expected_version,
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Deletes one profile. Returns `false` when it did not exist.
    pub fn delete_profile(&self, email_address: &str) -> RepoResult<bool> {
        self.repo.delete_profile(email_address)
    }
}
