//! `tdiff` — reconcile a reference and a variant target file.

use std::path::Path;

use targetdiff_recon::config::FieldSeparator;
use targetdiff_recon::{ReconConfig, ReconError, ReconReport};

use crate::exit_codes::{recon_exit_code, EXIT_RECON_INVALID_CONFIG, EXIT_RECON_IO};
use crate::{Cli, CliError, SeparatorArg};

pub fn cmd_reconcile(cli: Cli) -> Result<(), CliError> {
    if cli.job_id.trim().is_empty() {
        return Err(CliError::args("job id must not be empty")
            .with_hint("the job id names the output files, e.g. `tdiff ref.targets var.targets job42`"));
    }

    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => ReconConfig::default(),
    };
    if let Some(dir) = cli.out_dir {
        config.output.dir = dir;
    }
    if let Some(sep) = cli.separator {
        config.input.separator = match sep {
            SeparatorArg::Whitespace => FieldSeparator::Whitespace,
            SeparatorArg::Tab => FieldSeparator::Tab,
        };
    }

    let report = targetdiff_recon::reconcile(&cli.reference, &cli.variant, &cli.job_id, &config)
        .map_err(|e| recon_err(e, &config))?;

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "job '{}': {} reference / {} variant targets: {} common, {} semi-common, {} unique",
        report.meta.job_id,
        s.reference_records,
        s.variant_records,
        s.common,
        s.semi_common,
        s.unique,
    );

    write_report(&report, cli.json, cli.output.as_deref())?;

    Ok(())
}

fn load_config(path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_RECON_IO, format!("cannot read config {}: {e}", path.display()))
    })?;
    let config = ReconConfig::from_toml(&config_str).map_err(|e| {
        CliError::new(EXIT_RECON_INVALID_CONFIG, format!("{}: {e}", path.display()))
    })?;
    log::debug!("loaded config {}", path.display());
    Ok(config)
}

fn recon_err(err: ReconError, config: &ReconConfig) -> CliError {
    let code = recon_exit_code(&err);
    let hint = match &err {
        ReconError::MalformedInput { .. } => Some(format!(
            "every target line needs at least {} {}-separated fields; no output was written",
            config.input.min_fields, config.input.separator
        )),
        ReconError::Io { .. } => Some("no output was written".to_string()),
        _ => None,
    };
    let cli_err = CliError::new(code, err.to_string());
    match hint {
        Some(hint) => cli_err.with_hint(hint),
        None => cli_err,
    }
}

fn write_report(report: &ReconReport, json: bool, output: Option<&Path>) -> Result<(), CliError> {
    if !json && output.is_none() {
        return Ok(());
    }

    let json_str = report
        .to_json_pretty()
        .map_err(|e| CliError::general(e.to_string()))?;

    if let Some(path) = output {
        std::fs::write(path, &json_str).map_err(|e| {
            CliError::new(EXIT_RECON_IO, format!("cannot write report {}: {e}", path.display()))
                .with_hint(format!(
                    "the artifacts for job '{}' were written to {}; only the report is missing",
                    report.meta.job_id,
                    artifact_dir(report).display()
                ))
        })?;
        eprintln!("wrote {}", path.display());
    }

    if json {
        println!("{json_str}");
    }

    Ok(())
}

fn artifact_dir(report: &ReconReport) -> &Path {
    match report.artifacts.common.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
