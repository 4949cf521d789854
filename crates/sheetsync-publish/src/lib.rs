//! # sheetsync-publish
//!
//! Commits written output files to a git repository and optionally pushes
//! them.
//!
//! Repository discovery and reading `HEAD` use `gix`. Commits and pushes go
//! through the `git` executable.

mod error;
mod repo;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub use error::PublishError;
pub use repo::{RepoContext, discover_repo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    pub remote: String,
    /// Branch to push; the checked out branch when `None`.
    pub branch: Option<String>,
    pub message: String,
    pub push: bool,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            remote: "origin".into(),
            branch: None,
            message: "Update sheet data".into(),
            push: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The files already match `HEAD`.
    NoChanges,
    Committed { commit: String, pushed: bool },
}

/// Stage `files`, commit them when they changed and push when asked to.
///
/// Only the given paths are committed; other staged changes in the
/// repository are left alone.
///
/// # Errors
///
/// [`PublishError::OutsideRepo`] when a file does not live in the working
/// tree, [`PublishError::Command`] when a git command fails and
/// [`PublishError::Io`] when `git` cannot be run at all.
pub fn publish(
    ctx: &RepoContext,
    files: &[PathBuf],
    options: &PublishOptions,
) -> Result<PublishOutcome, PublishError> {
    if files.is_empty() {
        return Ok(PublishOutcome::NoChanges);
    }
    let paths = files
        .iter()
        .map(|file| repo::relative_to_root(ctx, file))
        .collect::<Result<Vec<_>, _>>()?;

    run_git(&ctx.root, &["add", "--"], &paths)?;

    if !has_staged_changes(&ctx.root, &paths)? {
        tracing::info!("output unchanged, nothing to commit");
        return Ok(PublishOutcome::NoChanges);
    }

    run_git(&ctx.root, &["commit", "-m", &options.message, "--"], &paths)?;
    let commit = repo::head_commit(ctx)?;
    tracing::info!(commit = %commit, "committed output files");

    if !options.push {
        return Ok(PublishOutcome::Committed {
            commit,
            pushed: false,
        });
    }

    let branch = options
        .branch
        .as_deref()
        .or(ctx.branch.as_deref())
        .ok_or_else(|| PublishError::Git("HEAD is detached and no branch is configured".into()))?;
    run_git(&ctx.root, &["push", &options.remote, branch], &[])?;
    tracing::info!(remote = %options.remote, branch, "pushed");

    Ok(PublishOutcome::Committed {
        commit,
        pushed: true,
    })
}

fn git(root: &Path, args: &[&str], paths: &[PathBuf]) -> Result<Output, PublishError> {
    tracing::debug!(args = ?args, paths = ?paths, "git");
    Ok(Command::new("git")
        .args(args)
        .args(paths)
        .current_dir(root)
        .output()?)
}

fn command_error(args: &[&str], output: &Output) -> PublishError {
    PublishError::Command {
        command: format!("git {}", args.join(" ")),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

fn run_git(root: &Path, args: &[&str], paths: &[PathBuf]) -> Result<(), PublishError> {
    let output = git(root, args, paths)?;
    if output.status.success() {
        Ok(())
    } else {
        Err(command_error(args, &output))
    }
}

/// `git diff --cached --quiet` exits 1 when the index differs from `HEAD`.
fn has_staged_changes(root: &Path, paths: &[PathBuf]) -> Result<bool, PublishError> {
    let args = ["diff", "--cached", "--quiet", "--"];
    let output = git(root, &args, paths)?;
    match output.status.code() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(command_error(&args, &output)),
    }
}
