use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ReconError;

/// Default position key: chromosome, position, cluster position (1-indexed).
pub const DEFAULT_KEY_FIELDS: [usize; 3] = [4, 5, 6];

/// Minimum arity of a target line.
pub const DEFAULT_MIN_FIELDS: usize = 6;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub key: KeyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub separator: FieldSeparator,
    #[serde(default = "default_min_fields")]
    pub min_fields: usize,
    #[serde(default = "default_true")]
    pub skip_blank_lines: bool,
}

fn default_min_fields() -> usize {
    DEFAULT_MIN_FIELDS
}

fn default_true() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            separator: FieldSeparator::default(),
            min_fields: DEFAULT_MIN_FIELDS,
            skip_blank_lines: true,
        }
    }
}

/// How a target line is split into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSeparator {
    /// Any run of spaces or tabs; leading/trailing whitespace ignored.
    #[default]
    Whitespace,
    /// Exactly one tab per field boundary; empty fields are kept.
    Tab,
}

impl FieldSeparator {
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::Whitespace => line.split_whitespace().collect(),
            Self::Tab => line.split('\t').collect(),
        }
    }
}

impl std::fmt::Display for FieldSeparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Whitespace => write!(f, "whitespace"),
            Self::Tab => write!(f, "tab"),
        }
    }
}

// ---------------------------------------------------------------------------
// Position key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct KeyConfig {
    /// 1-indexed field numbers joined into the position key, in order.
    #[serde(default = "default_key_fields")]
    pub fields: Vec<usize>,
}

fn default_key_fields() -> Vec<usize> {
    DEFAULT_KEY_FIELDS.to_vec()
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            fields: default_key_fields(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing + validation
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.key.fields.is_empty() {
            return Err(ReconError::ConfigValidation(
                "key.fields must name at least one field".into(),
            ));
        }

        // Fields are 1-indexed
        if let Some(bad) = self.key.fields.iter().find(|&&f| f == 0) {
            return Err(ReconError::ConfigValidation(format!(
                "key.fields are 1-indexed, got {bad}"
            )));
        }

        if self.input.min_fields == 0 {
            return Err(ReconError::ConfigValidation(
                "input.min_fields must be at least 1".into(),
            ));
        }

        let widest = self.widest_key_field();
        if self.input.min_fields < widest {
            return Err(ReconError::ConfigValidation(format!(
                "input.min_fields ({}) is smaller than key field {widest}",
                self.input.min_fields
            )));
        }

        Ok(())
    }

    /// Highest 1-indexed field the key reads.
    pub fn widest_key_field(&self) -> usize {
        self.key.fields.iter().copied().max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
