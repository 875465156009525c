// targetdiff CLI - reconcile reference and variant target files

mod exit_codes;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "tdiff")]
#[command(about = "Split variant targets into common, semi-common and unique against a reference")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Writes <JOB_ID>.common_targets, <JOB_ID>.semi_common_targets and
<JOB_ID>.unique_targets into the output directory, or nothing on error.

Examples:
  tdiff ref.targets var.targets job42
  tdiff ref.targets var.targets job42 --out-dir results --json
  tdiff ref.targets var.targets job42 --config targetdiff.toml --verbose")]
pub struct Cli {
    /// Reference targets file
    pub reference: PathBuf,

    /// Variant targets file
    pub variant: PathBuf,

    /// Job identifier; prefixes the three output artifacts
    pub job_id: String,

    /// TOML config file (input, key and output sections)
    #[arg(long, short = 'c', env = "TARGETDIFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory receiving the artifacts (overrides config output.dir)
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,

    /// Field separator (overrides config input.separator)
    #[arg(long)]
    pub separator: Option<SeparatorArg>,

    /// Print the JSON run report to stdout
    #[arg(long)]
    pub json: bool,

    /// Write the JSON run report to a file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log progress (info level)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Log pipeline details (debug level)
    #[arg(long)]
    pub debug: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SeparatorArg {
    Whitespace,
    Tab,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\nengine:  targetdiff-recon ", env!("CARGO_PKG_VERSION"),
        "\ncommit:  ", env!("TDIFF_COMMIT"),
        "\nprofile: ", env!("TDIFF_PROFILE"),
        "\ntarget:  ", env!("TDIFF_TARGET"),
    )
}

/// Route `log` records to stderr. `RUST_LOG` wins over the flags.
fn init_logging(verbose: bool, debug: bool) {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Already-installed subscriber is not an error worth failing on
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match recon::cmd_reconcile(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
