use super::*;
use std::path::Path;
use tempfile::TempDir;

fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn names(files: &[MigrationFile]) -> Vec<&str> {
    files.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_read_dir_skips_subdirectories() {
    let temp = TempDir::new().unwrap();
    write_files(temp.path(), &[("1_users.up.sql", "SELECT 1")]);
    fs::create_dir(temp.path().join("archive")).unwrap();

    let entries = read_dir(temp.path()).unwrap();
    assert_eq!(entries, vec!["1_users.up.sql".to_string()]);
}

#[test]
fn test_read_dir_missing_directory() {
    let temp = TempDir::new().unwrap();
    let err = read_dir(&temp.path().join("nope")).unwrap_err();
    assert!(matches!(err, CoreError::SourceUnreadable { .. }));
}

#[test]
fn test_list_up_files_in_version_order() {
    let temp = TempDir::new().unwrap();
    write_files(
        temp.path(),
        &[
            ("10_indexes.up.sql", ""),
            ("2_posts.up.sql", ""),
            ("1_users.up.sql", ""),
            ("1_users.down.sql", ""),
            ("2_posts.down.sql", ""),
        ],
    );

    let up = list_by_direction(temp.path(), Direction::Up).unwrap();
    assert_eq!(
        names(&up),
        vec!["1_users.up.sql", "2_posts.up.sql", "10_indexes.up.sql"]
    );
    assert!(up.iter().all(|f| f.direction == Direction::Up));

    let down = list_by_direction(temp.path(), Direction::Down).unwrap();
    assert_eq!(names(&down), vec!["1_users.down.sql", "2_posts.down.sql"]);
}

#[test]
fn test_list_empty_for_direction() {
    let temp = TempDir::new().unwrap();
    write_files(temp.path(), &[("1_users.up.sql", "")]);

    let down = list_by_direction(temp.path(), Direction::Down).unwrap();
    assert!(down.is_empty());
}

#[test]
fn test_list_rejects_file_without_extension() {
    let temp = TempDir::new().unwrap();
    write_files(
        temp.path(),
        &[("1_users.up.sql", ""), ("README", "migrations live here")],
    );

    let err = list_by_direction(temp.path(), Direction::Up).unwrap_err();
    assert!(matches!(err, CoreError::MissingExtension { ref name } if name == "README"));
}

#[test]
fn test_read_content() {
    let temp = TempDir::new().unwrap();
    let sql = "CREATE TABLE test(name VARCHAR)";
    write_files(temp.path(), &[("1_test.up.sql", sql)]);

    let files = list_by_direction(temp.path(), Direction::Up).unwrap();
    assert_eq!(read_content(&files[0]).unwrap(), sql);
}

#[test]
fn test_read_content_missing_file() {
    let temp = TempDir::new().unwrap();
    let file = MigrationFile::parse(temp.path(), "1_gone.up.sql")
        .unwrap()
        .unwrap();

    let err = read_content(&file).unwrap_err();
    assert!(matches!(err, CoreError::IoWithPath { .. }));
}
