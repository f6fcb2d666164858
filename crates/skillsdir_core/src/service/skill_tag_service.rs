//! Skill tag use-case service.
//!
//! # Invariants
//! - Every tag is passed through `clean_tag` before it is stored or removed.
//! - Batches stop at the first storage failure; earlier items stay applied.
//! - Removing an unknown tag is a success.

use crate::model::skill_tag::clean_tag;
use crate::repo::skill_tag_repo::SkillTagRepository;
use crate::repo::RepoResult;
use log::{error, info};

/// Use-case service wrapper for the skill tag vocabulary.
pub struct SkillTagService<R: SkillTagRepository> {
    repo: R,
}

impl<R: SkillTagRepository> SkillTagService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every known normalized tag.
    pub fn list_skill_tags(&self) -> RepoResult<Vec<String>> {
        self.repo.list_tags()
    }

    /// Normalizes and stores each tag in order.
    pub fn add_skill_tags<S: AsRef<str>>(&self, tags: &[S]) -> RepoResult<()> {
        for (index, tag) in tags.iter().enumerate() {
            if let Err(err) = self.repo.upsert_tag(&clean_tag(tag.as_ref())) {
                error!(
                    "event=skill_tags_add module=skill_tag status=error applied={} requested={} error={}",
                    index,
                    tags.len(),
                    err
                );
                return Err(err);
            }
        }

        info!(
            "event=skill_tags_add module=skill_tag status=ok requested={}",
            tags.len()
        );
        Ok(())
    }

    /// Normalizes and removes each tag in order.
    pub fn delete_skill_tags<S: AsRef<str>>(&self, tags: &[S]) -> RepoResult<()> {
        let mut removed = 0_usize;
        for (index, tag) in tags.iter().enumerate() {
            match self.repo.delete_tag(&clean_tag(tag.as_ref())) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(err) => {
                    error!(
                        "event=skill_tags_delete module=skill_tag status=error applied={} requested={} error={}",
                        index,
                        tags.len(),
                        err
                    );
                    return Err(err);
                }
            }
        }

        info!(
            "event=skill_tags_delete module=skill_tag status=ok requested={} removed={}",
            tags.len(),
            removed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SkillTagService;
    use crate::repo::skill_tag_repo::SkillTagRepository;
    use crate::repo::{RepoError, RepoResult};
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    /// Repository that fails on one poisoned tag name.
    struct FlakyRepo {
        tags: RefCell<BTreeSet<String>>,
        poisoned: &'static str,
    }

    impl FlakyRepo {
        fn new(poisoned: &'static str) -> Self {
            Self {
                tags: RefCell::new(BTreeSet::new()),
                poisoned,
            }
        }

        fn check(&self, name: &str) -> RepoResult<()> {
            if name == self.poisoned {
                return Err(RepoError::InvalidData(format!("poisoned tag `{name}`")));
            }
            Ok(())
        }
    }

    impl SkillTagRepository for FlakyRepo {
        fn list_tags(&self) -> RepoResult<Vec<String>> {
            Ok(self.tags.borrow().iter().cloned().collect())
        }

        fn upsert_tag(&self, name: &str) -> RepoResult<()> {
            self.check(name)?;
            self.tags.borrow_mut().insert(name.to_string());
            Ok(())
        }

        fn delete_tag(&self, name: &str) -> RepoResult<bool> {
            self.check(name)?;
            Ok(self.tags.borrow_mut().remove(name))
        }
    }

    #[test]
    fn add_stops_at_first_failure_and_keeps_earlier_tags() {
        let service = SkillTagService::new(FlakyRepo::new("bad-tag"));

        let err = service
            .add_skill_tags(&["Go Lang", "Bad Tag", "Rust"])
            .unwrap_err();

        assert!(matches!(err, RepoError::InvalidData(_)));
        assert_eq!(service.list_skill_tags().unwrap(), vec!["go-lang"]);
    }

    #[test]
    fn delete_stops_at_first_failure() {
        let service = SkillTagService::new(FlakyRepo::new("bad-tag"));
        service.add_skill_tags(&["go", "rust"]).unwrap();

        let err = service
            .delete_skill_tags(&["GO", "bad tag", "rust"])
            .unwrap_err();

        assert!(matches!(err, RepoError::InvalidData(_)));
        assert_eq!(service.list_skill_tags().unwrap(), vec!["rust"]);
    }

    #[test]
    fn delete_of_unknown_tag_succeeds() {
        let service = SkillTagService::new(FlakyRepo::new("bad-tag"));
        service.delete_skill_tags(&["never added"]).unwrap();
    }
}
