//! Normalization of raw client labels into tag titles.

use super::TagTitle;
use std::collections::HashSet;

/// Normalizes raw labels into distinct tag titles.
///
/// Each label is trimmed; blank labels are discarded and duplicates (after
/// trimming) collapse to their first occurrence. Matching is exact, so labels
/// differing only in case stay distinct.
#[must_use]
pub fn normalize_labels<S: AsRef<str>>(labels: &[S]) -> Vec<TagTitle> {
    let mut seen = HashSet::with_capacity(labels.len());
    labels
        .iter()
        .filter_map(|label| TagTitle::new(label).ok())
        .filter(|title| seen.insert(title.clone()))
        .collect()
}
