//! Skill tag repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Tags are stored under their normalized name; callers normalize first.
//! - Each write autocommits on its own: a batch is never wrapped in a
//!   transaction here.

use super::schema::ensure_connection_ready;
use super::RepoResult;
use rusqlite::Connection;

/// Repository interface for the skill tag vocabulary.
pub trait SkillTagRepository {
    /// Returns all stored tag names sorted ascending.
    fn list_tags(&self) -> RepoResult<Vec<String>>;
    /// Stores `name`; storing an existing name is a no-op.
    fn upsert_tag(&self, name: &str) -> RepoResult<()>;
    /// Removes `name`. Returns `false` when it did not exist.
    fn delete_tag(&self, name: &str) -> RepoResult<bool>;
}

/// SQLite-backed skill tag repository.
pub struct SqliteSkillTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSkillTagRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "skill_tags")?;
        Ok(Self { conn })
    }
}

impl SkillTagRepository for SqliteSkillTagRepository<'_> {
    fn list_tags(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM skill_tags ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(row.get("name")?);
        }
        Ok(tags)
    }

    fn upsert_tag(&self, name: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO skill_tags (name) VALUES (?1)
             ON CONFLICT(name) DO NOTHING;",
            [name],
        )?;
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM skill_tags WHERE name = ?1;", [name])?;
        Ok(changed > 0)
    }
}
