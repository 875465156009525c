use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Position key: the configured key fields of one target line, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(pub Vec<String>);

impl std::fmt::Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("\t"))
    }
}

/// One target line. Identity and order come from the raw line alone;
/// the key is derived from it at parse time.
#[derive(Debug, Clone)]
pub struct Record {
    pub line: String,
    pub key: PositionKey,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Byte-wise, same as `LC_ALL=C sort`.
impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line.cmp(&other.line)
    }
}

/// Lets sets of records be probed by raw line.
impl Borrow<str> for Record {
    fn borrow(&self) -> &str {
        &self.line
    }
}

/// Deduplicated, byte-wise ordered records read from one input.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub source: PathBuf,
    pub records: BTreeSet<Record>,
    /// Non-blank lines read, before deduplication.
    pub lines_read: usize,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.lines_read - self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.records.contains(line)
    }
}

/// Membership index over position keys.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex(pub HashSet<PositionKey>);

impl KeyIndex {
    pub fn contains(&self, key: &PositionKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Both normalized inputs of one run.
pub struct ReconInput {
    pub reference: RecordSet,
    pub variant: RecordSet,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetClass {
    Common,
    SemiCommon,
    Unique,
}

impl TargetClass {
    pub const ALL: [TargetClass; 3] = [Self::Common, Self::SemiCommon, Self::Unique];

    /// Artifact file suffix: `<jobId>.<suffix>`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Common => "common_targets",
            Self::SemiCommon => "semi_common_targets",
            Self::Unique => "unique_targets",
        }
    }
}

impl std::fmt::Display for TargetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "common"),
            Self::SemiCommon => write!(f, "semi_common"),
            Self::Unique => write!(f, "unique"),
        }
    }
}

/// One output classification. Built once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub class: TargetClass,
    pub records: BTreeSet<Record>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.records.contains(line)
    }

    /// Raw lines in output order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.line.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Classification {
    pub common: ResultSet,
    pub semi_common: ResultSet,
    pub unique: ResultSet,
}

impl Classification {
    pub fn get(&self, class: TargetClass) -> &ResultSet {
        match class {
            TargetClass::Common => &self.common,
            TargetClass::SemiCommon => &self.semi_common,
            TargetClass::Unique => &self.unique,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub reference_lines: usize,
    pub reference_records: usize,
    pub reference_duplicates: usize,
    pub variant_lines: usize,
    pub variant_records: usize,
    pub variant_duplicates: usize,
    pub common: usize,
    pub semi_common: usize,
    /// Variant records whose position key appears in the reference.
    pub variant_semi_common: usize,
    pub unique: usize,
    pub class_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub common: PathBuf,
    pub semi_common: PathBuf,
    pub unique: PathBuf,
}

impl ArtifactPaths {
    pub fn get(&self, class: TargetClass) -> &PathBuf {
        match class {
            TargetClass::Common => &self.common,
            TargetClass::SemiCommon => &self.semi_common,
            TargetClass::Unique => &self.unique,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub job_id: String,
    pub reference: PathBuf,
    pub variant: PathBuf,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub artifacts: ArtifactPaths,
}

impl ReconReport {
    pub fn to_json_pretty(&self) -> Result<String, ReconError> {
        serde_json::to_string_pretty(self).map_err(|e| ReconError::Io {
            path: PathBuf::from("<report>"),
            message: format!("JSON serialization error: {e}"),
        })
    }
}
