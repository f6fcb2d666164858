//! Profile domain model and versioning rules.
//!
//! # Responsibility
//! - Define the profile document persisted per email address.
//! - Apply one caller update to a profile: history rollover, skill name
//!   normalization, version bump and domain recomputation.
//!
//! # Invariants
//! - `domain` is always derived from `email_address`, never caller supplied.
//! - `skills_history` is append-only and only receives superseded,
//!   non-empty skill sets together with the timestamp they were saved at.
//! - `version` grows by exactly one per applied update.
//! - `last_updated` has whole-second precision.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One skill and the self-assessed level for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    /// Skill name, stored lowercased.
    pub skill: String,
    pub level: i32,
}

impl SkillLevel {
    pub fn new(skill: impl Into<String>, level: i32) -> Self {
        Self {
            skill: skill.into(),
            level,
        }
    }
}

/// Skills as they stood until a later update replaced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSnapshot {
    /// `last_updated` of the profile when these skills were current.
    pub date: DateTime<Utc>,
    pub skills: Vec<SkillLevel>,
}

/// Persisted profile document, keyed by email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email_address: String,
    /// Lowercased part of the email address after `@`.
    pub domain: String,
    pub skills: Vec<SkillLevel>,
    pub skills_history: Vec<SkillSnapshot>,
    /// Opaque caller value, replaced wholesale on every update.
    pub availability: serde_json::Value,
    /// `0` until the first save.
    pub version: i64,
    pub last_updated: DateTime<Utc>,
}

/// Caller input for the single profile mutation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub email_address: String,
    pub skills: Vec<SkillLevel>,
    #[serde(default)]
    pub availability: serde_json::Value,
}

/// Validation failures for profile input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Email address lacks a single `@` separating non-empty parts.
    InvalidEmailAddress(String),
    /// Skill at `index` has an empty or whitespace-only name.
    BlankSkillName { index: usize },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmailAddress(value) => {
                write!(f, "invalid email address `{value}`: expected local@domain")
            }
            Self::BlankSkillName { index } => {
                write!(f, "skill at position {index} has a blank name")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Derives the lowercased domain of an email address.
///
/// # Errors
/// - Returns `InvalidEmailAddress` unless the input holds exactly one `@`
///   with non-empty text on both sides.
pub fn email_domain(email_address: &str) -> Result<String, ModelValidationError> {
    match email_address.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(domain.to_lowercase())
        }
        _ => Err(ModelValidationError::InvalidEmailAddress(
            email_address.to_string(),
        )),
    }
}

impl Profile {
    /// Creates the never-saved profile for `email_address`.
    ///
    /// The result has version `0`, no skills, no history and a `last_updated`
    /// of the Unix epoch.
    pub fn new(email_address: impl Into<String>) -> Result<Self, ModelValidationError> {
        let email_address = email_address.into();
        let domain = email_domain(&email_address)?;
        Ok(Self {
            email_address,
            domain,
            skills: Vec::new(),
            skills_history: Vec::new(),
            availability: serde_json::Value::Null,
            version: 0,
            last_updated: DateTime::<Utc>::UNIX_EPOCH,
        })
    }

    /// Returns whether this profile has never been persisted.
    pub fn is_new(&self) -> bool {
        self.version == 0
    }

    /// Applies `update` as of `now`.
    ///
    /// Current skills (if any) move to history stamped with the previous
    /// `last_updated` before anything else changes.
    ///
    /// # Errors
    /// - Returns `InvalidEmailAddress` when `update.email_address` has no
    ///   derivable domain.
    /// - Returns `BlankSkillName` when any incoming skill name is blank.
    ///
    /// The profile is left unchanged on error.
    pub fn apply_update(
        &mut self,
        update: &ProfileUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), ModelValidationError> {
        let domain = email_domain(&update.email_address)?;
        if let Some(index) = update
            .skills
            .iter()
            .position(|entry| entry.skill.trim().is_empty())
        {
            return Err(ModelValidationError::BlankSkillName { index });
        }

        if !self.skills.is_empty() {
            self.skills_history.push(SkillSnapshot {
                date: self.last_updated,
                skills: std::mem::take(&mut self.skills),
            });
        }

        self.skills = update
            .skills
            .iter()
            .map(|entry| SkillLevel::new(entry.skill.to_lowercase(), entry.level))
            .collect();
        self.availability = update.availability.clone();
        self.version += 1;
        self.last_updated = now.trunc_subsecs(0);
        self.email_address = update.email_address.clone();
        self.domain = domain;

        Ok(())
    }
}
