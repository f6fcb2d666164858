use serde_json::json;
use skillsdir_core::{
    DataAccess, ProfileUpdate, RepoError, SkillLevel, SqliteDataAccess, StoreConfig,
    StoreConfigError,
};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn store() -> (TempDir, SqliteDataAccess) {
    let dir = tempfile::tempdir().unwrap();
    let access = SqliteDataAccess::new(StoreConfig::new(
        dir.path().to_str().unwrap(),
        "skills",
    ))
    .unwrap();
    (dir, access)
}

fn update(email: &str, skill: &str, level: i32) -> ProfileUpdate {
    ProfileUpdate {
        email_address: email.to_string(),
        skills: vec![SkillLevel::new(skill, level)],
        availability: json!(null),
    }
}

#[test]
fn construction_validates_settings_without_connecting() {
    let err = SqliteDataAccess::new(StoreConfig::new("", "skills")).unwrap_err();
    assert_eq!(err, StoreConfigError::EmptyConnectionString);

    let (dir, access) = store();
    assert!(!dir.path().join("skills.sqlite3").exists());
    assert_eq!(access.config().database_name, "skills");
}

#[test]
fn profile_lifecycle_persists_across_connections() {
    let (dir, access) = store();

    let first = access.update_profile(&update("bob@x.com", "Go", 3)).unwrap();
    assert!(first.created);
    assert_eq!(first.profile.version, 1);
    assert!(dir.path().join("skills.sqlite3").exists());

    let second = access.update_profile(&update("bob@x.com", "rust", 4)).unwrap();
    assert!(!second.created);
    assert_eq!(second.profile.version, 2);
    assert_eq!(second.profile.skills_history.len(), 1);
    assert_eq!(
        second.profile.skills_history[0].skills,
        vec![SkillLevel::new("go", 3)]
    );
    assert_eq!(
        second.profile.skills_history[0].date,
        first.profile.last_updated
    );

    assert_eq!(access.get_profile("bob@x.com").unwrap(), Some(second.profile));
    assert_eq!(access.list_profiles("alice@X.com").unwrap().len(), 1);
    assert!(access.delete_profile("bob@x.com").unwrap());
    assert!(!access.delete_profile("bob@x.com").unwrap());
    assert!(access.list_profiles("alice@x.com").unwrap().is_empty());
}

#[test]
fn skill_tag_operations_round_trip_through_the_facade() {
    let (_dir, access) = store();

    access
        .add_skill_tags(&["Go Lang".to_string(), "Rust".to_string()])
        .unwrap();
    access
        .delete_skill_tags(&["rust".to_string(), "never added".to_string()])
        .unwrap();

    assert_eq!(access.list_skill_tags().unwrap(), vec!["go-lang"]);
}

#[test]
fn configuration_bootstrap_is_stable_until_deleted() {
    let (_dir, access) = store();

    let first = access.get_or_create_configuration().unwrap();
    let second = access.get_or_create_configuration().unwrap();
    assert_eq!(first.session_encryption_key, second.session_encryption_key);

    access.delete_configuration().unwrap();
    let regenerated = access.get_or_create_configuration().unwrap();
    assert_ne!(first.session_encryption_key, regenerated.session_encryption_key);
}

#[test]
fn concurrent_bootstrap_converges_on_one_key() {
    let (_dir, access) = store();
    let access = Arc::new(access);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let access = Arc::clone(&access);
            thread::spawn(move || access.get_or_create_configuration())
        })
        .collect();

    let keys: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap().session_encryption_key)
        .collect();

    assert!(keys.iter().all(|key| key == &keys[0]));
}

#[test]
fn unreachable_store_surfaces_db_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let access = SqliteDataAccess::new(StoreConfig::new(
        missing.to_str().unwrap(),
        "skills",
    ))
    .unwrap();

    assert!(matches!(access.list_skill_tags(), Err(RepoError::Db(_))));
    assert!(matches!(
        access.get_or_create_configuration(),
        Err(RepoError::Db(_))
    ));
}

#[test]
fn blank_skill_names_are_rejected_through_the_facade() {
    let (_dir, access) = store();
    let request = ProfileUpdate {
        email_address: "lee@x.com".to_string(),
        skills: vec![SkillLevel::new("   ", 3), SkillLevel::new("", 1)],
        availability: json!(null),
    };

    assert!(matches!(
        access.update_profile(&request),
        Err(RepoError::Validation(_))
    ));
    assert_eq!(access.get_profile("lee@x.com").unwrap(), None);
}
