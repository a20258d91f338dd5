//! Thin wrapper around the `git` binary.
//!
//! The devices poll the shared repository, so "publish" is just
//! add + commit + push of the content files, and "refresh" is a pull. The
//! core never sees any of this; these helpers run in the working directory
//! and report outcomes for the command layer to print.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

#[derive(Debug, PartialEq, Eq)]
pub enum PullOutcome {
    AlreadyUpToDate,
    Updated,
    /// The merge hit conflicts; the working tree needs manual attention.
    Conflict,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PushOutcome {
    NothingToPush,
    Pushed,
}

/// Locate the `git` binary.
fn git_binary() -> Result<PathBuf> {
    which::which("git").context("git not found in PATH - install git or push manually")
}

/// True when the working directory is inside a git work tree.
fn in_repository(git: &Path) -> Result<bool> {
    let status = Command::new(git)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .context("failed to run git rev-parse")?;
    Ok(status.status.success())
}

/// Pull the latest content with a merge (never a rebase: the schedule files
/// are whole-file replaced, and a rebase surprise helps nobody).
pub fn pull() -> Result<PullOutcome> {
    let git = git_binary()?;
    if !in_repository(&git)? {
        bail!("not a git repository - run from the content repository root");
    }

    let output = Command::new(&git)
        .args(["pull", "--no-rebase"])
        .output()
        .context("failed to run git pull")?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        if stdout.contains("CONFLICT") || stderr.contains("CONFLICT") {
            return Ok(PullOutcome::Conflict);
        }
        bail!("git pull failed: {}", stderr.trim());
    }

    if stdout.contains("Already up to date") {
        Ok(PullOutcome::AlreadyUpToDate)
    } else {
        Ok(PullOutcome::Updated)
    }
}

/// Stage the content paths, commit, and push. Returns `NothingToPush` when
/// the working tree is clean.
pub fn push(paths: &[&str], message: &str) -> Result<PushOutcome> {
    let git = git_binary()?;
    if !in_repository(&git)? {
        bail!("not a git repository - run from the content repository root");
    }

    let status = Command::new(&git)
        .args(["status", "--short"])
        .output()
        .context("failed to run git status")?;
    if String::from_utf8_lossy(&status.stdout).trim().is_empty() {
        return Ok(PushOutcome::NothingToPush);
    }

    let add = Command::new(&git)
        .arg("add")
        .args(paths)
        .output()
        .context("failed to run git add")?;
    if !add.status.success() {
        bail!("git add failed: {}", String::from_utf8_lossy(&add.stderr).trim());
    }

    let commit = Command::new(&git)
        .args(["commit", "-m", message])
        .output()
        .context("failed to run git commit")?;
    if !commit.status.success() {
        bail!(
            "git commit failed: {}",
            String::from_utf8_lossy(&commit.stderr).trim()
        );
    }

    let push = Command::new(&git)
        .arg("push")
        .output()
        .context("failed to run git push")?;
    if !push.status.success() {
        bail!(
            "git push failed: {}",
            String::from_utf8_lossy(&push.stderr).trim()
        );
    }

    Ok(PushOutcome::Pushed)
}
