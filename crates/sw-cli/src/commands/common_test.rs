use super::*;
use tempfile::TempDir;

fn write_config(dir: &Path, name: &str, yaml: &str) {
    std::fs::write(dir.join(name), yaml).unwrap();
}

#[test]
fn test_defaults_without_config() {
    let temp = TempDir::new().unwrap();
    let settings = resolve_settings(&GlobalArgs::default(), temp.path()).unwrap();

    assert_eq!(settings.source, temp.path().join("migrations"));
    assert_eq!(settings.table, "migrations");
    assert_eq!(settings.db_type, DbType::DuckDb);
    assert_eq!(
        settings.database,
        temp.path().join("stepwise.duckdb").display().to_string()
    );
}

#[test]
fn test_config_in_working_directory() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "stepwise.yml",
        "source: db/sql\ntable: schema_version\ndatabase:\n  type: duckdb\n  path: \":memory:\"\n",
    );

    let settings = resolve_settings(&GlobalArgs::default(), temp.path()).unwrap();

    assert_eq!(settings.source, temp.path().join("db/sql"));
    assert_eq!(settings.table, "schema_version");
    assert_eq!(settings.db_type, DbType::DuckDb);
    assert_eq!(settings.database, ":memory:");
}

#[test]
fn test_unsupported_database_type() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        "stepwise.yml",
        "database:\n  type: postgres\n  path: app\n",
    );

    let err = resolve_settings(&GlobalArgs::default(), temp.path()).unwrap_err();
    assert!(format!("{err:#}").contains("E007"));
}

#[test]
fn test_explicit_config_is_relative_to_its_directory() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("conf")).unwrap();
    write_config(
        &temp.path().join("conf"),
        "custom.yml",
        "source: sql\ndatabase:\n  path: app.duckdb\n",
    );
    let global = GlobalArgs {
        config: Some("conf/custom.yml".to_string()),
        ..GlobalArgs::default()
    };

    let settings = resolve_settings(&global, temp.path()).unwrap();

    assert_eq!(settings.source, temp.path().join("conf").join("sql"));
    assert_eq!(
        settings.database,
        temp.path().join("conf").join("app.duckdb").display().to_string()
    );
}

#[test]
fn test_flags_override_config() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "stepwise.yaml", "source: from_file\ntable: from_file\n");
    let global = GlobalArgs {
        source: Some("from_flag".to_string()),
        table: Some("flag_table".to_string()),
        database: Some(":memory:".to_string()),
        ..GlobalArgs::default()
    };

    let settings = resolve_settings(&global, temp.path()).unwrap();

    assert_eq!(settings.source, temp.path().join("from_flag"));
    assert_eq!(settings.table, "flag_table");
    assert_eq!(settings.database, ":memory:");
}

#[test]
fn test_invalid_table_flag() {
    let temp = TempDir::new().unwrap();
    let global = GlobalArgs {
        table: Some("migrations; DROP TABLE users".to_string()),
        ..GlobalArgs::default()
    };

    assert!(resolve_settings(&global, temp.path()).is_err());
}

#[test]
fn test_missing_explicit_config() {
    let temp = TempDir::new().unwrap();
    let global = GlobalArgs {
        config: Some("nope.yml".to_string()),
        ..GlobalArgs::default()
    };

    let err = resolve_settings(&global, temp.path()).unwrap_err();
    assert!(format!("{err:#}").contains("E001"));
}

#[test]
fn test_build_migrator_runs_against_memory_database() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("1_init.up.sql"), "CREATE TABLE t (id INT);").unwrap();
    let settings = Settings {
        source: temp.path().to_path_buf(),
        table: "migrations".to_string(),
        db_type: DbType::DuckDb,
        database: ":memory:".to_string(),
    };

    let db = open_database(&settings).unwrap();
    let migrator = build_migrator(&db, &settings, &ConsoleEvents).unwrap();
    let report = migrator.up().unwrap();

    assert_eq!(report.version, Some(1));
    assert_eq!(migrator.current_version().unwrap(), 1);
}
