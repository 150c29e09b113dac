use std::fs;

use tempfile::tempdir;

use super::*;

#[test]
fn reads_in_order() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.hbs");
    let second = dir.path().join("second.hbs");
    fs::write(&first, "{{a}}").unwrap();
    fs::write(&second, "{{b}}").unwrap();

    let texts = read_templates(&[&second, &first]).unwrap();
    assert_eq!(texts, vec!["{{b}}", "{{a}}"]);
}

#[test]
fn missing_files_are_skipped() {
    let dir = tempdir().unwrap();
    let present = dir.path().join("present.hbs");
    fs::write(&present, "{{title}}").unwrap();

    let texts = read_templates(&[dir.path().join("absent.hbs"), present]).unwrap();
    assert_eq!(texts, vec!["{{title}}"]);
}

#[test]
fn no_files_no_texts() {
    let paths: [&str; 0] = [];
    assert!(read_templates(&paths).unwrap().is_empty());
}

#[test]
fn unreadable_path_is_an_error() {
    let dir = tempdir().unwrap();
    let err = read_templates(&[dir.path()]).unwrap_err();
    assert!(err.to_string().contains("failed to read template"), "{}", err);
}
