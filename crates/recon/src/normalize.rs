//! Input normalization: target file -> deduplicated, byte-wise ordered [`RecordSet`].

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::model::{PositionKey, Record, RecordSet};

/// Read one target file and normalize it.
pub fn load_record_set(path: &Path, config: &ReconConfig) -> Result<RecordSet, ReconError> {
    let text = std::fs::read_to_string(path).map_err(|e| ReconError::io(path, e))?;
    let set = parse_records(path, &text, config)?;
    log::info!(
        "{}: {} line(s), {} distinct record(s)",
        path.display(),
        set.lines_read,
        set.len()
    );
    Ok(set)
}

/// Parse target lines already in memory. `source` is only used for
/// error context and bookkeeping.
pub fn parse_records(
    source: &Path,
    text: &str,
    config: &ReconConfig,
) -> Result<RecordSet, ReconError> {
    let mut records = BTreeSet::new();
    let mut lines_read = 0;

    for (idx, raw) in text.lines().enumerate() {
        // `lines` leaves a bare `\r` on an unterminated last line
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if config.input.skip_blank_lines && line.trim().is_empty() {
            continue;
        }

        let fields = config.input.separator.split(line);
        if fields.len() < config.input.min_fields {
            return Err(ReconError::MalformedInput {
                path: source.to_path_buf(),
                line: idx + 1,
                fields: fields.len(),
                required: config.input.min_fields,
            });
        }

        lines_read += 1;
        records.insert(Record {
            line: line.to_string(),
            key: position_key(&fields, &config.key.fields),
        });
    }

    Ok(RecordSet {
        source: source.to_path_buf(),
        records,
        lines_read,
    })
}

/// Caller guarantees every key field is within `fields` (validated arity).
fn position_key(fields: &[&str], key_fields: &[usize]) -> PositionKey {
    PositionKey(
        key_fields
            .iter()
            .map(|&n| fields.get(n - 1).copied().unwrap_or_default().to_string())
            .collect(),
    )
}
