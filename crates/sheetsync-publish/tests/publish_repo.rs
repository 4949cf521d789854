//! Publishing into throwaway repositories created with the git CLI.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use sheetsync_publish::{PublishError, PublishOptions, PublishOutcome, discover_repo, publish};

fn run_git(repo_path: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .unwrap_or_else(|e| panic!("git {} failed: {}", args.join(" "), e));
    assert!(
        output.status.success(),
        "git {} failed:\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_owned()
}

/// Repository on `main` with one commit.
fn init_temp_repo() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().expect("create tempdir");
    let repo_path = dir.path().to_path_buf();
    run_git(&repo_path, &["init", "--initial-branch=main"]);
    run_git(&repo_path, &["config", "user.email", "test@sheetsync.dev"]);
    run_git(&repo_path, &["config", "user.name", "Sheetsync Test"]);
    run_git(&repo_path, &["config", "commit.gpgsign", "false"]);
    fs::write(repo_path.join("README.md"), "# data\n").unwrap();
    run_git(&repo_path, &["add", "."]);
    run_git(&repo_path, &["commit", "-m", "initial commit"]);
    (dir, repo_path)
}

fn no_push() -> PublishOptions {
    PublishOptions {
        push: false,
        ..PublishOptions::default()
    }
}

#[test]
fn discovers_repository_from_subdirectory() {
    let (_dir, repo_path) = init_temp_repo();
    let nested = repo_path.join("data").join("out");
    fs::create_dir_all(&nested).unwrap();

    let ctx = discover_repo(&nested).unwrap();
    assert_eq!(ctx.root.canonicalize().unwrap(), repo_path.canonicalize().unwrap());
    assert!(ctx.git_dir.ends_with(".git"));
    assert_eq!(ctx.branch.as_deref(), Some("main"));
}

#[test]
fn outside_repository_is_not_a_repo() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        discover_repo(dir.path()),
        Err(PublishError::NotGitRepo(_))
    ));
}

#[test]
fn commits_changed_files_and_reports_head() {
    let (_dir, repo_path) = init_temp_repo();
    let file = repo_path.join("sheet_backup.json");
    fs::write(&file, "{\"data\": []}\n").unwrap();

    let ctx = discover_repo(&repo_path).unwrap();
    let outcome = publish(&ctx, std::slice::from_ref(&file), &no_push()).unwrap();

    let head = run_git(&repo_path, &["rev-parse", "HEAD"]);
    assert_eq!(
        outcome,
        PublishOutcome::Committed {
            commit: head,
            pushed: false
        }
    );
    assert_eq!(run_git(&repo_path, &["log", "-1", "--format=%s"]), "Update sheet data");
    assert_eq!(run_git(&repo_path, &["status", "--porcelain"]), "");
}

#[test]
fn unchanged_files_are_not_committed() {
    let (_dir, repo_path) = init_temp_repo();
    let file = repo_path.join("timetable.json");
    fs::write(&file, "{}\n").unwrap();
    let ctx = discover_repo(&repo_path).unwrap();
    publish(&ctx, std::slice::from_ref(&file), &no_push()).unwrap();
    let before = run_git(&repo_path, &["rev-parse", "HEAD"]);

    let outcome = publish(&ctx, &[file], &no_push()).unwrap();
    assert_eq!(outcome, PublishOutcome::NoChanges);
    assert_eq!(run_git(&repo_path, &["rev-parse", "HEAD"]), before);
}

#[test]
fn unrelated_staged_changes_stay_out_of_the_commit() {
    let (_dir, repo_path) = init_temp_repo();
    fs::write(repo_path.join("notes.txt"), "draft\n").unwrap();
    run_git(&repo_path, &["add", "notes.txt"]);
    let file = repo_path.join("sheet_backup.json");
    fs::write(&file, "[]\n").unwrap();

    let ctx = discover_repo(&repo_path).unwrap();
    publish(&ctx, &[file], &no_push()).unwrap();

    let committed = run_git(&repo_path, &["show", "--name-only", "--format=", "HEAD"]);
    assert_eq!(committed, "sheet_backup.json");
    assert_eq!(run_git(&repo_path, &["status", "--porcelain"]), "A  notes.txt");
}

#[test]
fn pushes_to_remote_branch() {
    let (_dir, repo_path) = init_temp_repo();
    let remote = tempfile::TempDir::new().unwrap();
    run_git(remote.path(), &["init", "--bare"]);
    let remote_url = remote.path().to_string_lossy().into_owned();
    run_git(&repo_path, &["remote", "add", "origin", &remote_url]);

    let file = repo_path.join("sheet_backup.json");
    fs::write(&file, "[1]\n").unwrap();
    let ctx = discover_repo(&repo_path).unwrap();
    let outcome = publish(&ctx, &[file], &PublishOptions::default()).unwrap();

    let PublishOutcome::Committed { commit, pushed } = outcome else {
        panic!("expected a commit, got {outcome:?}");
    };
    assert!(pushed);
    assert_eq!(run_git(remote.path(), &["rev-parse", "main"]), commit);
}

#[test]
fn failed_push_reports_git_command() {
    let (_dir, repo_path) = init_temp_repo();
    let file = repo_path.join("sheet_backup.json");
    fs::write(&file, "[2]\n").unwrap();
    let ctx = discover_repo(&repo_path).unwrap();

    let err = publish(&ctx, &[file], &PublishOptions::default()).unwrap_err();
    match err {
        PublishError::Command { command, .. } => assert_eq!(command, "git push origin main"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_outside_repository_is_rejected() {
    let (_dir, repo_path) = init_temp_repo();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let file = elsewhere.path().join("sheet_backup.json");
    fs::write(&file, "[]\n").unwrap();

    let ctx = discover_repo(&repo_path).unwrap();
    assert!(matches!(
        publish(&ctx, &[file], &no_push()),
        Err(PublishError::OutsideRepo { .. })
    ));
}
