//! Domain model for the skills directory.
//!
//! # Responsibility
//! - Define the records persisted by the store: profiles, skill tags and the
//!   singleton configuration.
//! - Own the pure rules applied to them (domain derivation, history
//!   rollover, tag normalization).
//!
//! # Invariants
//! - Profiles are identified by email address; tags by normalized name.
//! - Model functions never touch storage.

pub mod configuration;
pub mod profile;
pub mod skill_tag;
