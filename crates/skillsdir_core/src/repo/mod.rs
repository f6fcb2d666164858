//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-collection data access contracts.
//! - Isolate SQLite query details from the service algorithms.
//!
//! # Invariants
//! - Repositories refuse connections whose schema is not fully migrated.
//! - Conditional writes report lost races as `VersionConflict` instead of
//!   silently overwriting.
//! - Absence is an `Option`/`bool` outcome, never an error.

pub mod configuration_repo;
mod error;
pub mod profile_repo;
mod schema;
pub mod skill_tag_repo;

pub use error::{RepoError, RepoResult};
