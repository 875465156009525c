use crate::model::{KeyIndex, RecordSet, ResultSet, TargetClass};

/// Records present verbatim in both sets.
pub fn exact_intersection(reference: &RecordSet, variant: &RecordSet) -> ResultSet {
    ResultSet {
        class: TargetClass::Common,
        records: reference
            .records
            .intersection(&variant.records)
            .cloned()
            .collect(),
    }
}

/// Position keys of every reference record.
pub fn build_key_index(reference: &RecordSet) -> KeyIndex {
    KeyIndex(reference.iter().map(|r| r.key.clone()).collect())
}

/// Variant records whose key is in `index`, plus reference records whose key
/// is in `index`.
///
/// `index` is built from the reference set, so the reference side matches
/// every reference record and the whole reference set ends up semi-common.
/// That follows the established output contract of this tool; whether the
/// reference side was meant to test against a variant-derived index instead
/// has not been confirmed.
pub fn semi_common(reference: &RecordSet, variant: &RecordSet, index: &KeyIndex) -> ResultSet {
    let matched_variant = variant.iter().filter(|r| index.contains(&r.key));
    let matched_reference = reference.iter().filter(|r| index.contains(&r.key));

    ResultSet {
        class: TargetClass::SemiCommon,
        records: matched_variant.chain(matched_reference).cloned().collect(),
    }
}

/// Variant records not in `semi_common`, by full-line equality.
/// Both sides are ordered sets, so this is a single merge walk.
pub fn unique(variant: &RecordSet, semi_common: &ResultSet) -> ResultSet {
    ResultSet {
        class: TargetClass::Unique,
        records: variant
            .records
            .difference(&semi_common.records)
            .cloned()
            .collect(),
    }
}
