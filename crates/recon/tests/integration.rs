use std::path::{Path, PathBuf};

use targetdiff_recon::config::ReconConfig;
use targetdiff_recon::engine::reconcile;
use targetdiff_recon::error::ReconError;
use targetdiff_recon::model::ReconReport;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config_in(dir: &Path) -> ReconConfig {
    let mut config = ReconConfig::default();
    config.output.dir = dir.to_path_buf();
    config
}

fn write(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    std::fs::write(&path, text).unwrap();
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

fn run_in(dir: &Path, reference: &[&str], variant: &[&str], job: &str) -> ReconReport {
    let r = write(dir, "ref.targets", reference);
    let v = write(dir, "var.targets", variant);
    reconcile(&r, &v, job, &config_in(dir)).unwrap()
}

// -------------------------------------------------------------------------
// Scenarios
// -------------------------------------------------------------------------

#[test]
fn shared_key_different_allele_is_semi_common() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_in(
        dir.path(),
        &["A 1 2 chr1 100 200", "B 1 2 chr1 300 400"],
        &["A 1 2 chr1 100 200", "C 9 9 chr1 300 400", "D 0 0 chr2 999 999"],
        "scenario",
    );

    assert_eq!(read_lines(&report.artifacts.common), vec!["A 1 2 chr1 100 200"]);
    assert_eq!(
        read_lines(&report.artifacts.semi_common),
        vec!["A 1 2 chr1 100 200", "B 1 2 chr1 300 400", "C 9 9 chr1 300 400"]
    );
    assert_eq!(read_lines(&report.artifacts.unique), vec!["D 0 0 chr2 999 999"]);
}

#[test]
fn empty_variant_file() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_in(
        dir.path(),
        &["B 1 2 chr1 300 400", "A 1 2 chr1 100 200"],
        &[],
        "empty",
    );

    assert!(read_lines(&report.artifacts.common).is_empty());
    assert_eq!(
        read_lines(&report.artifacts.semi_common),
        vec!["A 1 2 chr1 100 200", "B 1 2 chr1 300 400"]
    );
    assert!(read_lines(&report.artifacts.unique).is_empty());
    assert_eq!(report.summary.variant_records, 0);
}

#[test]
fn malformed_reference_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let r = write(dir.path(), "ref.targets", &["A 1 2 chr1 100 200", "A 1 2"]);
    let v = write(dir.path(), "var.targets", &["A 1 2 chr1 100 200"]);

    let err = reconcile(&r, &v, "bad", &config_in(dir.path())).unwrap_err();
    match err {
        ReconError::MalformedInput { path, line, fields, required } => {
            assert_eq!(path, r);
            assert_eq!(line, 2);
            assert_eq!(fields, 3);
            assert_eq!(required, 6);
        }
        other => panic!("expected MalformedInput, got {other:?}"),
    }

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["ref.targets", "var.targets"]);
}

#[test]
fn malformed_fixture_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let err = reconcile(
        &fixtures_dir().join("reference.targets"),
        &fixtures_dir().join("malformed.targets"),
        "fixture",
        &config_in(dir.path()),
    )
    .unwrap_err();
    assert!(err.to_string().contains("malformed.targets:2:"), "{err}");
}

#[test]
fn unreadable_variant_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let r = write(dir.path(), "ref.targets", &["A 1 2 chr1 100 200"]);
    let missing = dir.path().join("missing.targets");

    let err = reconcile(&r, &missing, "io", &config_in(dir.path())).unwrap_err();
    match err {
        ReconError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io, got {other:?}"),
    }
    assert!(!dir.path().join("io.common_targets").exists());
}

#[test]
fn tab_delimited_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let report = reconcile(
        &fixtures_dir().join("reference.targets"),
        &fixtures_dir().join("variant.targets"),
        "fixture",
        &config_in(dir.path()),
    )
    .unwrap();

    let s = &report.summary;
    assert_eq!(s.reference_lines, 4);
    assert_eq!(s.reference_records, 3);
    assert_eq!(s.reference_duplicates, 1);
    assert_eq!(s.variant_records, 3);
    assert_eq!(s.common, 1);
    assert_eq!(s.semi_common, 4);
    assert_eq!(s.variant_semi_common, 2);
    assert_eq!(s.unique, 1);

    let semi = read_lines(&report.artifacts.semi_common);
    assert!(semi[0].starts_with("DNA\t"));
    assert!(semi.windows(2).all(|w| w[0] < w[1]), "sorted and distinct");

    let unique = read_lines(&report.artifacts.unique);
    assert_eq!(unique.len(), 1);
    assert!(unique[0].contains("\tchr3\t90210\t90211\t"));
}

// -------------------------------------------------------------------------
// Isolation + determinism
// -------------------------------------------------------------------------

#[test]
fn jobs_in_same_dir_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let r = write(dir.path(), "ref.targets", &["A 1 2 chr1 100 200"]);
    let v1 = write(dir.path(), "v1.targets", &["Z 0 0 chr9 1 1"]);
    let v2 = write(dir.path(), "v2.targets", &["A 1 2 chr1 100 200"]);
    let config = config_in(dir.path());

    let a = reconcile(&r, &v1, "job_a", &config).unwrap();
    let b = reconcile(&r, &v2, "job_b", &config).unwrap();

    assert_eq!(read_lines(&a.artifacts.unique), vec!["Z 0 0 chr9 1 1"]);
    assert!(read_lines(&b.artifacts.unique).is_empty());
    assert_ne!(a.artifacts.unique, b.artifacts.unique);
}

#[test]
fn rerun_is_byte_identical() {
    let reference = ["Q 1 1 chr5 7 8", "A 1 2 chr1 100 200", "Q 1 1 chr5 7 8"];
    let variant = ["A 9 9 chr1 100 200", "M 0 0 chr7 1 2", "A 1 2 chr1 100 200"];

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = run_in(first.path(), &reference, &variant, "job");
    let b = run_in(second.path(), &reference, &variant, "job");

    for (x, y) in [
        (&a.artifacts.common, &b.artifacts.common),
        (&a.artifacts.semi_common, &b.artifacts.semi_common),
        (&a.artifacts.unique, &b.artifacts.unique),
    ] {
        assert_eq!(std::fs::read(x).unwrap(), std::fs::read(y).unwrap());
    }
}

#[test]
fn input_order_does_not_matter() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = run_in(
        first.path(),
        &["B 1 2 chr1 300 400", "A 1 2 chr1 100 200"],
        &["D 0 0 chr2 999 999", "C 9 9 chr1 300 400", "A 1 2 chr1 100 200"],
        "job",
    );
    let b = run_in(
        second.path(),
        &["A 1 2 chr1 100 200", "B 1 2 chr1 300 400"],
        &["A 1 2 chr1 100 200", "D 0 0 chr2 999 999", "C 9 9 chr1 300 400"],
        "job",
    );

    assert_eq!(
        std::fs::read(&a.artifacts.semi_common).unwrap(),
        std::fs::read(&b.artifacts.semi_common).unwrap()
    );
    assert_eq!(
        std::fs::read(&a.artifacts.unique).unwrap(),
        std::fs::read(&b.artifacts.unique).unwrap()
    );
}

#[test]
fn rerun_overwrites_previous_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    run_in(dir.path(), &["A 1 2 chr1 100 200"], &["Z 0 0 chr9 1 1"], "job");
    let report = run_in(dir.path(), &["A 1 2 chr1 100 200"], &["A 1 2 chr1 100 200"], "job");
    assert!(read_lines(&report.artifacts.unique).is_empty());
    assert_eq!(read_lines(&report.artifacts.common), vec!["A 1 2 chr1 100 200"]);
}

#[test]
fn report_serializes() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_in(dir.path(), &["A 1 2 chr1 100 200"], &["A 1 2 chr1 100 200"], "json");
    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["meta"]["job_id"], "json");
    assert_eq!(json["summary"]["common"], 1);
    assert_eq!(json["summary"]["class_counts"]["unique"], 0);
    assert!(json["artifacts"]["semi_common"]
        .as_str()
        .unwrap()
        .ends_with("json.semi_common_targets"));
}
