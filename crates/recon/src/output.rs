//! Artifact naming and all-or-nothing commit of the three result files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ReconError;
use crate::model::{ArtifactPaths, Classification, ResultSet, TargetClass};

/// `<out_dir>/<job_id>.<suffix>` for each class.
pub fn artifact_paths(out_dir: &Path, job_id: &str) -> ArtifactPaths {
    let path = |class: TargetClass| out_dir.join(format!("{job_id}.{}", class.suffix()));
    ArtifactPaths {
        common: path(TargetClass::Common),
        semi_common: path(TargetClass::SemiCommon),
        unique: path(TargetClass::Unique),
    }
}

/// Write all three artifacts into a private staging directory next to their
/// final location, then rename them into place.
///
/// Artifacts left by an earlier run under the same job id are moved aside
/// first. If any write or rename fails, artifacts already renamed by this
/// call are removed and the earlier ones are moved back, so the directory
/// holds either the old set or the new set. The staging directory, and with
/// it any displaced earlier artifacts, is removed on every return path.
pub fn commit_artifacts(
    paths: &ArtifactPaths,
    classification: &Classification,
) -> Result<(), ReconError> {
    let target_dir = staging_parent(&paths.common);
    let staging = tempfile::Builder::new()
        .prefix(".targetdiff-staging-")
        .tempdir_in(&target_dir)
        .map_err(|e| ReconError::io(&target_dir, e))?;
    log::debug!("staging artifacts in {}", staging.path().display());

    let previous_dir = staging.path().join("previous");
    std::fs::create_dir(&previous_dir).map_err(|e| ReconError::io(&previous_dir, e))?;

    let mut staged: Vec<(PathBuf, &PathBuf)> = Vec::with_capacity(TargetClass::ALL.len());
    for class in TargetClass::ALL {
        let final_path = paths.get(class);
        let file_name = final_path.file_name().ok_or_else(|| ReconError::Io {
            path: final_path.clone(),
            message: "artifact path has no file name".into(),
        })?;
        let staged_path = staging.path().join(file_name);
        write_result_set(&staged_path, classification.get(class))?;
        staged.push((staged_path, final_path));
    }

    // Only regular files are ours to displace; anything else makes the
    // rename below fail and is left untouched.
    let mut displaced: Vec<(PathBuf, &PathBuf)> = Vec::new();
    for (staged_path, final_path) in &staged {
        if !final_path.is_file() {
            continue;
        }
        let backup = match staged_path.file_name() {
            Some(name) => previous_dir.join(name),
            None => continue,
        };
        if let Err(e) = std::fs::rename(final_path, &backup) {
            restore(&displaced);
            return Err(ReconError::io(final_path, e));
        }
        displaced.push((backup, *final_path));
    }
    if !displaced.is_empty() {
        log::debug!("moved {} earlier artifact(s) aside", displaced.len());
    }

    let mut committed: Vec<&PathBuf> = Vec::with_capacity(staged.len());
    for (staged_path, final_path) in &staged {
        if let Err(e) = std::fs::rename(staged_path, final_path) {
            rollback(&committed);
            restore(&displaced);
            return Err(ReconError::io(final_path, e));
        }
        committed.push(*final_path);
    }

    staging.close().map_err(|e| ReconError::io(&target_dir, e))?;
    log::debug!("committed {} artifact(s)", committed.len());
    Ok(())
}

/// One record per line, newline-terminated, in set order.
fn write_result_set(path: &Path, set: &ResultSet) -> Result<(), ReconError> {
    let file = File::create(path).map_err(|e| ReconError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for line in set.lines() {
        writeln!(writer, "{line}").map_err(|e| ReconError::io(path, e))?;
    }
    writer.flush().map_err(|e| ReconError::io(path, e))?;
    Ok(())
}

fn rollback(committed: &[&PathBuf]) {
    for path in committed {
        log::warn!("rolling back partial output {}", path.display());
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("cannot remove {}: {e}", path.display());
        }
    }
}

fn restore(displaced: &[(PathBuf, &PathBuf)]) {
    for (backup, final_path) in displaced {
        log::warn!("restoring earlier artifact {}", final_path.display());
        if let Err(e) = std::fs::rename(backup, final_path) {
            log::warn!("cannot restore {}: {e}", final_path.display());
        }
    }
}

fn staging_parent(artifact: &Path) -> PathBuf {
    match artifact.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
