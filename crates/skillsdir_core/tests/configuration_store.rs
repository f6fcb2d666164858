use skillsdir_core::db::open_db_in_memory;
use skillsdir_core::{
    Configuration, ConfigurationRepository, ConfigurationService, SqliteConfigurationRepository,
};

#[test]
fn sequential_calls_return_the_same_key() {
    let conn = open_db_in_memory().unwrap();
    let service = ConfigurationService::new(SqliteConfigurationRepository::try_new(&conn).unwrap());

    let first = service.get_or_create_configuration().unwrap();
    let second = service.get_or_create_configuration().unwrap();

    assert_eq!(first.session_encryption_key, second.session_encryption_key);
    assert_eq!(first, second);
}

#[test]
fn delete_then_create_generates_a_new_key() {
    let conn = open_db_in_memory().unwrap();
    let service = ConfigurationService::new(SqliteConfigurationRepository::try_new(&conn).unwrap());

    let before = service.get_or_create_configuration().unwrap();
    service.delete_configuration().unwrap();
    let after = service.get_or_create_configuration().unwrap();

    assert_ne!(before.session_encryption_key, after.session_encryption_key);
}

#[test]
fn delete_on_empty_namespace_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = ConfigurationService::new(SqliteConfigurationRepository::try_new(&conn).unwrap());

    service.delete_configuration().unwrap();
    service.delete_configuration().unwrap();
}

#[test]
fn insert_if_absent_never_replaces_existing_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConfigurationRepository::try_new(&conn).unwrap();
    let winner = Configuration::generate(chrono::Utc::now());
    let loser = Configuration::generate(chrono::Utc::now());

    assert!(repo.insert_configuration_if_absent(&winner).unwrap());
    assert!(!repo.insert_configuration_if_absent(&loser).unwrap());

    assert_eq!(repo.get_configuration().unwrap(), Some(winner));
}

#[test]
fn existing_record_written_elsewhere_is_adopted() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO configuration (id, session_encryption_key, created_at)
         VALUES ('configuration', 'feedface', 1700000000);",
        [],
    )
    .unwrap();
    let service = ConfigurationService::new(SqliteConfigurationRepository::try_new(&conn).unwrap());

    let configuration = service.get_or_create_configuration().unwrap();

    assert_eq!(configuration.session_encryption_key, "feedface");
    assert_eq!(configuration.created_at.timestamp(), 1_700_000_000);
}

#[test]
fn clear_reports_removed_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConfigurationRepository::try_new(&conn).unwrap();

    assert_eq!(repo.clear_configuration().unwrap(), 0);
    repo.insert_configuration_if_absent(&Configuration::generate(chrono::Utc::now()))
        .unwrap();
    assert_eq!(repo.clear_configuration().unwrap(), 1);
    assert_eq!(repo.get_configuration().unwrap(), None);
}
