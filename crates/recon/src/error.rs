use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad key field, arity below key width, etc.).
    ConfigValidation(String),
    /// Job identifier cannot namespace output artifacts.
    InvalidJobId(String),
    /// A line has too few fields to extract the position key.
    MalformedInput {
        path: PathBuf,
        line: usize,
        fields: usize,
        required: usize,
    },
    /// Unreadable input, unwritable output, or staging failure.
    Io { path: PathBuf, message: String },
}

impl ReconError {
    pub(crate) fn io(path: &Path, err: impl fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidJobId(msg) => write!(f, "invalid job id: {msg}"),
            Self::MalformedInput { path, line, fields, required } => write!(
                f,
                "{}:{line}: malformed record: {fields} field(s), at least {required} required",
                path.display()
            ),
            Self::Io { path, message } => write!(f, "IO error: {}: {message}", path.display()),
        }
    }
}

impl std::error::Error for ReconError {}
