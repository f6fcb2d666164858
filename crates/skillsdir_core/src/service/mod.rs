//! Core use-case services.
//!
//! # Responsibility
//! - Implement the store algorithms (profile versioning, tag batches,
//!   configuration bootstrap) on top of repository traits.
//! - Keep those algorithms storage-agnostic and testable with fakes.

pub mod configuration_service;
pub mod profile_service;
pub mod skill_tag_service;
