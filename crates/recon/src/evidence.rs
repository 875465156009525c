use std::collections::BTreeMap;

use crate::model::{Classification, ReconInput, ReconSummary, TargetClass};

/// Compute summary statistics for one run.
pub fn compute_summary(input: &ReconInput, classification: &Classification) -> ReconSummary {
    let mut class_counts: BTreeMap<String, usize> = BTreeMap::new();
    for class in TargetClass::ALL {
        class_counts.insert(class.to_string(), classification.get(class).len());
    }

    let variant_semi_common = input
        .variant
        .iter()
        .filter(|r| classification.semi_common.records.contains(*r))
        .count();

    ReconSummary {
        reference_lines: input.reference.lines_read,
        reference_records: input.reference.len(),
        reference_duplicates: input.reference.duplicates(),
        variant_lines: input.variant.lines_read,
        variant_records: input.variant.len(),
        variant_duplicates: input.variant.duplicates(),
        common: classification.common.len(),
        semi_common: classification.semi_common.len(),
        variant_semi_common,
        unique: classification.unique.len(),
        class_counts,
    }
}
