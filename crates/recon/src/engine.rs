use std::path::Path;

use crate::classify::{build_key_index, exact_intersection, semi_common, unique};
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::model::{Classification, ReconInput, ReconMeta, ReconReport};
use crate::normalize::load_record_set;
use crate::output::{artifact_paths, commit_artifacts};

/// Classify already-normalized inputs. Pure; no IO.
pub fn run(input: &ReconInput) -> Classification {
    let common = exact_intersection(&input.reference, &input.variant);
    let index = build_key_index(&input.reference);
    log::debug!(
        "exact matches: {}, reference keys: {}",
        common.len(),
        index.len()
    );

    let semi_common = semi_common(&input.reference, &input.variant, &index);
    let unique = unique(&input.variant, &semi_common);
    log::debug!(
        "semi-common: {}, unique: {}",
        semi_common.len(),
        unique.len()
    );

    Classification {
        common,
        semi_common,
        unique,
    }
}

/// Reconcile a reference and a variant target file and write
/// `<jobId>.common_targets`, `<jobId>.semi_common_targets` and
/// `<jobId>.unique_targets` into `config.output.dir`.
///
/// Either all three artifacts are written or none are.
pub fn reconcile(
    reference: &Path,
    variant: &Path,
    job_id: &str,
    config: &ReconConfig,
) -> Result<ReconReport, ReconError> {
    config.validate()?;
    if job_id.trim().is_empty() {
        return Err(ReconError::InvalidJobId(
            "job id must not be empty".into(),
        ));
    }

    // Inputs are independent; normalize both before classifying.
    let (reference_set, variant_set) = rayon::join(
        || load_record_set(reference, config),
        || load_record_set(variant, config),
    );
    let input = ReconInput {
        reference: reference_set?,
        variant: variant_set?,
    };

    let classification = run(&input);
    let summary = compute_summary(&input, &classification);

    let artifacts = artifact_paths(&config.output.dir, job_id);
    commit_artifacts(&artifacts, &classification)?;

    log::info!(
        "job '{job_id}': {} common, {} semi-common, {} unique",
        summary.common,
        summary.semi_common,
        summary.unique
    );

    Ok(ReconReport {
        meta: ReconMeta {
            job_id: job_id.to_string(),
            reference: reference.to_path_buf(),
            variant: variant.to_path_buf(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        artifacts,
    })
}
