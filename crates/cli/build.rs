//! Build metadata for `tdiff --version`.
//!
//! Emits `TDIFF_COMMIT`, `TDIFF_PROFILE` and `TDIFF_TARGET`. Builds from a
//! source archive have no `.git`; set `TDIFF_COMMIT` in the environment to
//! stamp them.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=TDIFF_COMMIT");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/heads");

    let commit = env::var("TDIFF_COMMIT")
        .ok()
        .filter(|c| !c.trim().is_empty())
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".into());
    let dirty = if commit != "unknown" && worktree_dirty() { "-dirty" } else { "" };

    emit("TDIFF_COMMIT", &format!("{}{dirty}", commit.trim()));
    emit("TDIFF_PROFILE", &env::var("PROFILE").unwrap_or_else(|_| "unknown".into()));
    emit("TDIFF_TARGET", &env::var("TARGET").unwrap_or_else(|_| "unknown".into()));
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok()
}

fn git_short_hash() -> Option<String> {
    git(&["rev-parse", "--short=7", "HEAD"]).map(|s| s.trim().to_string())
}

fn worktree_dirty() -> bool {
    git(&["status", "--porcelain", "--untracked-files=no"])
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false)
}
