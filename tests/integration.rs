//! End-to-end tests over a temporary directory
//!
//! Exercises the file and folder handles, the path sanitizer and the mime
//! sniffer the way an embedding application would use them.

use std::collections::HashMap;
use std::fs;

use fs_handles::{FsError, PathSanitizer, file, folder};

fn temp() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn create_then_read_yields_empty_content() {
    let dir = temp();
    let handle = file(dir.path().join("fresh.txt"));

    assert!(!handle.exists());
    handle.create().unwrap();
    assert!(handle.exists());
    assert_eq!(handle.read().unwrap(), Vec::<u8>::new());
}

#[test]
fn create_builds_missing_parent_directories() {
    let dir = temp();
    let handle = file(dir.path().join("deep/nested/tree/app.log"));

    handle.create().unwrap();
    assert!(dir.path().join("deep/nested/tree").is_dir());
    assert!(handle.exists());
}

#[test]
fn write_replaces_previous_content() {
    let dir = temp();
    let handle = file(dir.path().join("overwrite.txt"));

    handle.write("first version").unwrap();
    handle.write("second").unwrap();

    assert_eq!(handle.read().unwrap(), b"second");
}

#[test]
fn append_concatenates_including_missing_file() {
    let dir = temp();
    let handle = file(dir.path().join("logs/app.log"));

    handle.append("First line").unwrap();
    handle.append("Second line").unwrap();

    assert_eq!(handle.read().unwrap(), b"First lineSecond line");
}

#[test]
fn copy_conflict_leaves_both_files_unchanged() {
    let dir = temp();
    let source = file(dir.path().join("source.txt"));
    let destination = file(dir.path().join("destination.txt"));

    source.write("source content").unwrap();
    destination.write("existing content").unwrap();

    let result = source.copy(destination.path(), false);
    assert!(result.unwrap_err().is_conflict());

    assert_eq!(source.read().unwrap(), b"source content");
    assert_eq!(destination.read().unwrap(), b"existing content");
}

#[test]
fn copy_with_overwrite_replaces_destination() {
    let dir = temp();
    let source = file(dir.path().join("source.txt"));
    let destination_path = dir.path().join("destination.txt");

    source.write("fresh").unwrap();
    fs::write(&destination_path, "stale").unwrap();

    let copied = source.copy(&destination_path, true).unwrap();
    assert_eq!(copied.read().unwrap(), b"fresh");
}

#[test]
fn copy_of_missing_source_is_not_found() {
    let dir = temp();
    let source = file(dir.path().join("ghost.txt"));

    let result = source.copy(dir.path().join("anywhere.txt"), false);
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn move_relocates_content_and_updates_handle() {
    let dir = temp();
    let source_path = dir.path().join("move_source.txt");
    let destination_path = dir.path().join("into/move_destination.txt");

    let mut handle = file(&source_path);
    handle.write("move this content").unwrap();
    handle.move_to(&destination_path, false).unwrap();

    assert!(!source_path.exists());
    assert!(destination_path.exists());
    assert_eq!(handle.path(), destination_path.as_path());
    assert_eq!(handle.read().unwrap(), b"move this content");
}

#[test]
fn rename_uses_basename_only() {
    let dir = temp();
    let original = dir.path().join("docs/original.txt");

    let mut handle = file(&original);
    handle.write("renamed content").unwrap();
    handle.rename("sneaky/../newname.txt", false).unwrap();

    assert_eq!(handle.path(), dir.path().join("docs/newname.txt"));
    assert!(!original.exists());
    assert_eq!(handle.read().unwrap(), b"renamed content");
}

#[test]
fn rename_conflict_without_overwrite() {
    let dir = temp();
    let mut handle = file(dir.path().join("a.txt"));
    handle.write("a").unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();

    assert!(handle.rename("b.txt", false).unwrap_err().is_conflict());
    handle.rename("b.txt", true).unwrap();
    assert_eq!(handle.read().unwrap(), b"a");
}

#[test]
fn lines_are_ordered_and_newline_stripped() {
    let dir = temp();
    let handle = file(dir.path().join("lines.txt"));

    handle.write("Line 1\nLine 2\nLine 3").unwrap();

    assert_eq!(
        handle.lines().unwrap(),
        vec!["Line 1".to_string(), "Line 2".to_string(), "Line 3".to_string()]
    );
}

#[test]
fn delete_is_idempotent() {
    let dir = temp();
    let handle = file(dir.path().join("short-lived.txt"));

    handle.write("bye").unwrap();
    handle.delete().unwrap();
    assert!(!handle.exists());
    handle.delete().unwrap();
}

#[test]
fn read_missing_then_write_then_read_back() {
    let dir = temp();
    let handle = file(dir.path().join("scenario.txt"));

    let err = handle.read().unwrap_err();
    assert!(err.is_not_found());

    handle.write("x").unwrap();
    assert!(handle.exists());
    assert_eq!(handle.read().unwrap(), b"x");
}

#[test]
fn modified_time_is_available_after_write() {
    let dir = temp();
    let handle = file(dir.path().join("stamped.txt"));

    handle.write("tick").unwrap();
    let modified = handle.modified_time().unwrap();
    assert!(modified <= std::time::SystemTime::now());
}

#[test]
fn list_is_sorted_and_skips_hidden_entries() {
    let dir = temp();
    let handle = folder(dir.path().join("listing"));

    handle.create().unwrap();
    fs::write(handle.path().join("file2.txt"), "2").unwrap();
    fs::write(handle.path().join("file1.txt"), "1").unwrap();
    fs::write(handle.path().join(".hidden"), "secret").unwrap();

    assert_eq!(
        handle.list().unwrap(),
        vec!["file1.txt".to_string(), "file2.txt".to_string()]
    );
}

#[test]
fn list_of_missing_folder_is_not_found() {
    let dir = temp();
    let handle = folder(dir.path().join("nowhere"));

    assert!(handle.list().unwrap_err().is_not_found());
}

#[test]
fn folder_rename_accepts_full_destination_path() {
    let dir = temp();
    let source = dir.path().join("before");
    let destination = dir.path().join("tucked/away/after");

    let mut handle = folder(&source);
    handle.create().unwrap();
    fs::create_dir_all(destination.parent().unwrap()).unwrap();
    handle.rename(&destination, false).unwrap();

    assert!(!source.exists());
    assert!(destination.is_dir());
    assert_eq!(handle.path(), destination.as_path());
}

#[test]
fn folder_move_conflict_without_overwrite() {
    let dir = temp();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");

    let mut handle = folder(&source);
    handle.create().unwrap();
    folder(&destination).create().unwrap();

    assert!(handle.move_to(&destination, false).unwrap_err().is_conflict());

    handle.move_to(&destination, true).unwrap();
    assert!(!source.exists());
    assert_eq!(handle.path(), destination.as_path());
}

#[test]
fn sanitized_traversal_stays_inside_root() {
    let sanitizer = PathSanitizer::new("/app").unwrap();

    match sanitizer.sanitize("../../etc/passwd") {
        Ok(path) => assert!(path.starts_with("/app")),
        Err(FsError::Traversal(_)) => {}
        Err(other) => panic!("unexpected error: {}", other),
    }
}

#[test]
fn sanitizer_feeds_handles() {
    let dir = temp();
    let sanitizer = PathSanitizer::new(dir.path()).unwrap();

    let path = sanitizer.sanitize(" uploads/./report.csv ").unwrap();
    let handle = file(path);
    handle.write("a,b,c").unwrap();

    assert!(dir.path().join("uploads/report.csv").exists());
    assert_eq!(handle.read().unwrap(), b"a,b,c");
}

#[test]
fn mime_sniffer_via_file_handle() {
    let dir = temp();
    let handle = file(dir.path().join("data"));

    handle.write("just some text").unwrap();
    let sniffer = handle.mime().unwrap();

    assert_eq!(sniffer.kind().as_deref(), Some("text/plain"));
    assert_eq!(sniffer.extension(&HashMap::new()).as_deref(), Some("txt"));
}

#[test]
fn mime_sniffer_requires_existing_file() {
    let dir = temp();
    let handle = file(dir.path().join("missing.bin"));

    assert!(handle.mime().unwrap_err().is_not_found());
}

#[cfg(unix)]
#[test]
fn owner_failure_leaves_original_owner() {
    use std::os::unix::fs::MetadataExt;

    let dir = temp();
    let handle = file(dir.path().join("owned.txt"));
    handle.write("mine").unwrap();

    let before = fs::metadata(handle.path()).unwrap().uid();
    assert!(handle.owner("no-such-user-zz", None).is_err());
    let after = fs::metadata(handle.path()).unwrap().uid();

    assert_eq!(before, after);
}

#[cfg(unix)]
#[test]
fn permissions_change_applies_exact_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = temp();
    let handle = file(dir.path().join("modes.txt"));
    handle.write("bits").unwrap();

    handle.permissions(0o640).unwrap();
    let mode = fs::metadata(handle.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
}
