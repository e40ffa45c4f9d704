// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Integration tests for the repovault CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a repovault command pinned to an isolated data directory.
fn repovault(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("repovault").unwrap();
    cmd.env("REPOVAULT_DATA_DIR", data_dir);
    cmd
}

/// Minimal on-disk repository with the skeleton git itself requires.
fn fake_repo(parent: &Path, name: &str, remote: Option<&str>) -> PathBuf {
    let repo = parent.join(name);
    let git = repo.join(".git");
    fs::create_dir_all(git.join("objects")).unwrap();
    fs::create_dir_all(git.join("refs")).unwrap();
    fs::write(git.join("HEAD"), "ref: refs/heads/main\n").unwrap();

    let mut config = String::from(
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n",
    );
    if let Some(url) = remote {
        config.push_str(&format!(
            "[remote \"origin\"]\n\turl = {url}\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n"
        ));
    }
    fs::write(git.join("config"), config).unwrap();
    fs::write(repo.join("readme.md"), format!("# {name}\n")).unwrap();
    repo
}

#[test]
fn test_scan_list_search_export_round_trip() {
    let data_dir = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    fake_repo(tree.path(), "alpha-one", Some("https://example.com/alpha-one.git"));
    fake_repo(tree.path(), "beta-two", None);
    fs::create_dir_all(tree.path().join("not-a-repo/src")).unwrap();

    // Scan
    repovault(data_dir.path())
        .arg("scan")
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cataloged"));

    // List shows both repositories
    repovault(data_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha-one"))
        .stdout(predicate::str::contains("beta-two"))
        .stdout(predicate::str::contains("2 repositories"));

    // Search narrows to one
    repovault(data_dir.path())
        .args(["search", "alpha-one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha-one"))
        .stdout(predicate::str::contains("beta-two").not());

    // Export the CSV contract
    let csv_path = data_dir.path().join("repositories.csv");
    repovault(data_dir.path())
        .args(["export", "--output"])
        .arg(&csv_path)
        .assert()
        .success();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Path,Size (MB),Last Modified,Remote")
    );
    assert_eq!(lines.count(), 2, "one data row per record");
    assert!(csv.contains("https://example.com/alpha-one.git"));
}

#[test]
fn test_rescan_does_not_duplicate_records() {
    let data_dir = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    fake_repo(tree.path(), "stable", None);

    for _ in 0..2 {
        repovault(data_dir.path())
            .arg("scan")
            .arg(tree.path())
            .assert()
            .success();
    }

    repovault(data_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 repositories"));
}

#[test]
fn test_list_supports_json_output() {
    let data_dir = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    fake_repo(tree.path(), "jsonic", None);

    repovault(data_dir.path())
        .arg("scan")
        .arg(tree.path())
        .assert()
        .success();

    repovault(data_dir.path())
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"jsonic\""));
}

#[test]
fn test_archive_command_writes_zip() {
    let data_dir = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    let repo = fake_repo(tree.path(), "zipped", None);

    let dest = tree.path().join("zipped.zip");
    repovault(data_dir.path())
        .arg("archive")
        .arg(&repo)
        .arg("--output")
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    let archive = zip::ZipArchive::new(fs::File::open(&dest).unwrap()).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert!(names.contains(&"readme.md"));
    assert!(names.iter().all(|name| !name.starts_with(".git")));
}

#[test]
fn test_preview_reports_missing_candidates() {
    let data_dir = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    let repo = fake_repo(tree.path(), "pictureless", None);

    repovault(data_dir.path())
        .arg("preview")
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("No suitable image"));
}

#[test]
fn test_search_on_empty_catalog_is_clean() {
    let data_dir = TempDir::new().unwrap();

    repovault(data_dir.path())
        .args(["search", "anything"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog is empty"));
}
