//! Qualified-reference extraction.

use crate::rule::ImportRule;
use std::collections::BTreeSet;

/// Collect the distinct symbols a file references as `<alias>.<Symbol>`.
///
/// Symbol names are constrained to `[A-Z][A-Za-z0-9]*`. Duplicates and the
/// alias itself are discarded. An empty result is valid; it means the alias
/// is absent, or present but never used in qualified form.
///
/// The `BTreeSet` keeps the set in lexicographic order, which downstream
/// synthesis relies on for reproducible output.
pub fn referenced_symbols(rule: &ImportRule, text: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for caps in rule.reference().captures_iter(text) {
        let name = &caps[1];
        if name == rule.alias() {
            continue;
        }
        out.insert(name.to_string());
    }
    out
}
