//! Named-import synthesis.

use crate::rule::ImportRule;
use std::collections::BTreeSet;

/// Render the replacement import statement for a non-empty symbol set.
///
/// Symbols are emitted in the set's (lexicographic) order, chunked at the
/// rule's wrap threshold. One chunk renders single-line:
///
/// ```text
/// import { Home, Search } from 'lucide-react';
/// ```
///
/// more than one renders as a block, one chunk per line, two-space indent:
///
/// ```text
/// import {
///   Activity, Bell, Check, Clock, Home, Menu,
///   Search
/// } from 'lucide-react';
/// ```
///
/// Callers guard the empty case upstream (an empty set means the file is
/// classified, not synthesized).
pub fn render_import(rule: &ImportRule, symbols: &BTreeSet<String>) -> String {
    debug_assert!(!symbols.is_empty(), "caller guards empty symbol sets");

    let names: Vec<&str> = symbols.iter().map(String::as_str).collect();
    let chunks: Vec<String> = names
        .chunks(rule.symbols_per_line())
        .map(|chunk| chunk.join(", "))
        .collect();

    if chunks.len() == 1 {
        format!("import {{ {} }} from '{}';", chunks[0], rule.module())
    } else {
        format!(
            "import {{\n  {}\n}} from '{}';",
            chunks.join(",\n  "),
            rule.module()
        )
    }
}
