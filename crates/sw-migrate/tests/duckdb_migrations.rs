//! End-to-end migrations against an in-memory DuckDB database.

use std::path::Path;
use sw_db::{Database, DuckDbBackend};
use sw_migrate::{ErrorKind, MigrateError, Migrator, MigratorOptions, NoopEvents};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, sql: &str) {
    std::fs::write(dir.join(name), sql).unwrap();
}

fn users_fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "1_users.up.sql",
        "INSERT INTO users (name, email) VALUES ('Bobby', 'bob@mail.com');",
    );
    write(
        temp.path(),
        "1_users.down.sql",
        "DELETE FROM users WHERE name='Bobby' AND email='bob@mail.com';",
    );
    temp
}

fn create_users(db: &DuckDbBackend) {
    db.execute_batch("CREATE TABLE users (name VARCHAR, email VARCHAR);")
        .unwrap();
}

fn count_users(db: &DuckDbBackend) -> i64 {
    db.query_i64("SELECT COUNT(*) FROM users").unwrap().unwrap()
}

#[test]
fn test_up_then_down() {
    let temp = users_fixture();
    let db = DuckDbBackend::in_memory().unwrap();
    create_users(&db);

    let migrator = Migrator::new(&db, temp.path())
        .unwrap()
        .with_events(&NoopEvents);
    assert_eq!(migrator.current_version().unwrap(), 0);

    let report = migrator.up().unwrap();
    assert_eq!(report.applied, vec!["1_users.up.sql"]);
    assert_eq!(migrator.current_version().unwrap(), 1);
    assert_eq!(count_users(&db), 1);

    let report = migrator.down().unwrap();
    assert_eq!(report.applied, vec!["1_users.down.sql"]);
    assert_eq!(migrator.current_version().unwrap(), 0);
    assert_eq!(count_users(&db), 0);
}

#[test]
fn test_multi_statement_file() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "1_init.up.sql",
        "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\nINSERT INTO a VALUES (1), (2);",
    );
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, temp.path())
        .unwrap()
        .with_events(&NoopEvents);

    migrator.up().unwrap();

    assert!(db.relation_exists("b").unwrap());
    assert_eq!(db.query_i64("SELECT COUNT(*) FROM a").unwrap(), Some(2));
}

#[test]
fn test_failed_migration_rolls_back_everything() {
    let temp = users_fixture();
    write(temp.path(), "2_broken.up.sql", "INSERT INTO missing VALUES (1);");
    let db = DuckDbBackend::in_memory().unwrap();
    create_users(&db);
    let migrator = Migrator::new(&db, temp.path())
        .unwrap()
        .with_events(&NoopEvents);

    let err = migrator.up().unwrap_err();

    match &err {
        MigrateError::Execution { file, .. } => assert_eq!(file, "2_broken.up.sql"),
        other => panic!("expected execution error, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Execution);
    assert_eq!(migrator.current_version().unwrap(), 0);
    assert_eq!(count_users(&db), 0);
}

#[test]
fn test_version_walks_both_ways() {
    let temp = users_fixture();
    write(
        temp.path(),
        "2_alice.up.sql",
        "INSERT INTO users VALUES ('Alice', 'alice@mail.com');",
    );
    write(
        temp.path(),
        "2_alice.down.sql",
        "DELETE FROM users WHERE name='Alice';",
    );
    let db = DuckDbBackend::in_memory().unwrap();
    create_users(&db);
    let migrator = Migrator::new(&db, temp.path())
        .unwrap()
        .with_events(&NoopEvents);

    migrator.up().unwrap();
    assert_eq!(migrator.current_version().unwrap(), 2);
    assert_eq!(count_users(&db), 2);

    migrator.version(1).unwrap();
    assert_eq!(migrator.current_version().unwrap(), 1);
    assert_eq!(count_users(&db), 1);

    let err = migrator.version(1).unwrap_err();
    assert!(matches!(err, MigrateError::EqualVersion { version: 1 }));

    migrator.version(7).unwrap();
    assert_eq!(migrator.current_version().unwrap(), 2);

    let err = migrator.version(7).unwrap_err();
    assert!(matches!(err, MigrateError::UpToDate { version: 2 }));
}

#[test]
fn test_custom_table_and_persistence() {
    let temp = users_fixture();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.duckdb");
    let options = MigratorOptions::new(temp.path()).with_table("schema_version");

    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        create_users(&db);
        let migrator = Migrator::with_options(&db, options.clone())
            .unwrap()
            .with_events(&NoopEvents);
        migrator.up().unwrap();
    }

    let db = DuckDbBackend::from_path(&path).unwrap();
    assert!(!db.relation_exists("migrations").unwrap());
    let migrator = Migrator::with_options(&db, options)
        .unwrap()
        .with_events(&NoopEvents);
    assert_eq!(migrator.current_version().unwrap(), 1);
    assert!(migrator.status().unwrap().pending.is_empty());
}
