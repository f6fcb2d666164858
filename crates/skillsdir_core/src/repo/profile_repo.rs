//! Profile repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist profile documents keyed by email address.
//! - Provide the conditional writes the update protocol relies on.
//!
//! # Invariants
//! - `insert_profile` never overwrites an existing row.
//! - `replace_profile` only writes when the stored version matches.
//! - Skills, history and availability are stored as JSON documents; a row
//!   that fails to decode is reported as `InvalidData`.

use super::schema::ensure_connection_ready;
use super::{RepoError, RepoResult};
use crate::model::profile::{Profile, SkillLevel, SkillSnapshot};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;

const PROFILE_SELECT_SQL: &str = "SELECT
    email_address,
    domain,
    skills_json,
    skills_history_json,
    availability_json,
    version,
    last_updated
FROM profiles";

/// Repository interface for profile documents.
pub trait ProfileRepository {
    /// Gets one profile by primary key.
    fn get_profile(&self, email_address: &str) -> RepoResult<Option<Profile>>;
    /// Lists every profile in `domain`, ordered by email address.
    fn list_profiles_by_domain(&self, domain: &str) -> RepoResult<Vec<Profile>>;
    /// Inserts a first-version profile if its key is still absent.
    fn insert_profile(&self, profile: &Profile) -> RepoResult<()>;
    /// Replaces a profile whose stored version equals `expected_version`.
    fn replace_profile(&self, profile: &Profile, expected_version: i64) -> RepoResult<()>;
    /// Removes one profile. Returns `false` when it did not exist.
    fn delete_profile(&self, email_address: &str) -> RepoResult<bool>;
}

/// SQLite-backed profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "profiles")?;
        Ok(Self { conn })
    }

    fn stored_version(&self, email_address: &str) -> RepoResult<i64> {
        let version = self
            .conn
            .query_row(
                "SELECT version FROM profiles WHERE email_address = ?1;",
                [email_address],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(version.unwrap_or(0))
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn get_profile(&self, email_address: &str) -> RepoResult<Option<Profile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE email_address = ?1;"))?;
        let mut rows = stmt.query([email_address])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn list_profiles_by_domain(&self, domain: &str) -> RepoResult<Vec<Profile>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROFILE_SELECT_SQL}
             WHERE domain = ?1
             ORDER BY email_address ASC;"
        ))?;
        let mut rows = stmt.query([domain])?;
        let mut profiles = Vec::new();
        while let Some(row) = rows.next()? {
            profiles.push(parse_profile_row(row)?);
        }

        Ok(profiles)
    }

    fn insert_profile(&self, profile: &Profile) -> RepoResult<()> {
        let document = ProfileColumns::encode(profile)?;
        let changed = self.conn.execute(
            "INSERT INTO profiles (
                email_address,
                domain,
                skills_json,
                skills_history_json,
                availability_json,
                version,
                last_updated
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(email_address) DO NOTHING;",
            params![
                profile.email_address.as_str(),
                profile.domain.as_str(),
                document.skills,
                document.skills_history,
                document.availability,
                profile.version,
                profile.last_updated.timestamp(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::VersionConflict {
                email_address: profile.email_address.clone(),
                expected: 0,
                actual: self.stored_version(&profile.email_address)?,
            });
        }

        Ok(())
    }

    fn replace_profile(&self, profile: &Profile, expected_version: i64) -> RepoResult<()> {
        let document = ProfileColumns::encode(profile)?;
        let changed = self.conn.execute(
            "UPDATE profiles
             SET
                domain = ?2,
                skills_json = ?3,
                skills_history_json = ?4,
                availability_json = ?5,
                version = ?6,
                last_updated = ?7
             WHERE email_address = ?1
               AND version = ?8;",
            params![
                profile.email_address.as_str(),
                profile.domain.as_str(),
                document.skills,
                document.skills_history,
                document.availability,
                profile.version,
                profile.last_updated.timestamp(),
                expected_version,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::VersionConflict {
                email_address: profile.email_address.clone(),
                expected: expected_version,
                actual: self.stored_version(&profile.email_address)?,
            });
        }

        Ok(())
    }

    fn delete_profile(&self, email_address: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM profiles WHERE email_address = ?1;",
            [email_address],
        )?;
        Ok(changed > 0)
    }
}

/// JSON-encoded document columns of one profile row.
struct ProfileColumns {
    skills: String,
    skills_history: String,
    availability: String,
}

impl ProfileColumns {
    fn encode(profile: &Profile) -> RepoResult<Self> {
        Ok(Self {
            skills: to_json("skills", &profile.skills)?,
            skills_history: to_json("skills_history", &profile.skills_history)?,
            availability: to_json("availability", &profile.availability)?,
        })
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<Profile> {
    let email_address: String = row.get("email_address")?;
    let skills: Vec<SkillLevel> = from_json(row, "skills_json")?;
    let skills_history: Vec<SkillSnapshot> = from_json(row, "skills_history_json")?;
    let availability: serde_json::Value = from_json(row, "availability_json")?;

    let last_updated_secs: i64 = row.get("last_updated")?;
    let last_updated = DateTime::<Utc>::from_timestamp(last_updated_secs, 0).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{last_updated_secs}` in profiles.last_updated"
        ))
    })?;

    Ok(Profile {
        email_address,
        domain: row.get("domain")?,
        skills,
        skills_history,
        availability,
        version: row.get("version")?,
        last_updated,
    })
}

fn to_json<T: serde::Serialize>(field: &str, value: &T) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode profiles.{field}: {err}")))
}

fn from_json<T: DeserializeOwned>(row: &Row<'_>, column: &str) -> RepoResult<T> {
    let text: String = row.get(column)?;
    serde_json::from_str(&text)
        .map_err(|err| RepoError::InvalidData(format!("invalid json in profiles.{column}: {err}")))
}
