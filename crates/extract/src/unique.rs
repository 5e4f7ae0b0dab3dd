//! Label disambiguation

use ahash::AHashMap;

/// Label for the `occurrence`-th repeat of `label`, as produced by [`make_unique`]
pub fn occurrence_label(label: &str, postfix: &str, occurrence: usize) -> String {
    format!("{label}{postfix}_{occurrence}")
}

/// Rename repeated labels so every entry is distinct.
///
/// The first occurrence of a value is kept as is; the second becomes
/// `value{postfix}_1`, the third `value{postfix}_2`, and so on. Comparison is
/// case-sensitive and positions never move.
pub fn make_unique(labels: Vec<String>, postfix: &str) -> Vec<String> {
    let mut seen: AHashMap<String, usize> = AHashMap::with_capacity(labels.len());
    labels
        .into_iter()
        .map(|label| match seen.get_mut(&label) {
            Some(count) => {
                let renamed = occurrence_label(&label, postfix, *count);
                *count += 1;
                renamed
            }
            None => {
                seen.insert(label.clone(), 1);
                label
            }
        })
        .collect()
}
