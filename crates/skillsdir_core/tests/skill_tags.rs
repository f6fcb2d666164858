use skillsdir_core::db::open_db_in_memory;
use skillsdir_core::{SkillTagRepository, SkillTagService, SqliteSkillTagRepository};

#[test]
fn add_normalizes_and_deduplicates_tags() {
    let conn = open_db_in_memory().unwrap();
    let service = SkillTagService::new(SqliteSkillTagRepository::try_new(&conn).unwrap());

    service
        .add_skill_tags(&["Go Lang", "go lang", "Rust", "machine learning"])
        .unwrap();

    assert_eq!(
        service.list_skill_tags().unwrap(),
        vec!["go-lang", "machine-learning", "rust"]
    );
}

#[test]
fn tags_are_keyed_by_normalized_text() {
    let conn = open_db_in_memory().unwrap();
    let service = SkillTagService::new(SqliteSkillTagRepository::try_new(&conn).unwrap());
    service.add_skill_tags(&["Go Lang"]).unwrap();

    let key: String = conn
        .query_row("SELECT name FROM skill_tags;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(key, "go-lang");

    service.delete_skill_tags(&["GO LANG"]).unwrap();
    assert!(service.list_skill_tags().unwrap().is_empty());
}

#[test]
fn deleting_unknown_tags_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = SkillTagService::new(SqliteSkillTagRepository::try_new(&conn).unwrap());

    service.delete_skill_tags(&["never added"]).unwrap();
    service.delete_skill_tags::<&str>(&[]).unwrap();
}

#[test]
fn delete_removes_only_named_tags() {
    let conn = open_db_in_memory().unwrap();
    let service = SkillTagService::new(SqliteSkillTagRepository::try_new(&conn).unwrap());
    service.add_skill_tags(&["go", "rust", "zig"]).unwrap();

    service.delete_skill_tags(&["rust", "cobol"]).unwrap();

    assert_eq!(service.list_skill_tags().unwrap(), vec!["go", "zig"]);
}

#[test]
fn repository_reports_whether_delete_removed_a_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSkillTagRepository::try_new(&conn).unwrap();

    repo.upsert_tag("go").unwrap();
    repo.upsert_tag("go").unwrap();

    assert!(repo.delete_tag("go").unwrap());
    assert!(!repo.delete_tag("go").unwrap());
}
