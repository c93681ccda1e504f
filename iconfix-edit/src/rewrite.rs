//! Qualified-reference rewriting.

use crate::rule::ImportRule;
use regex::{NoExpand, Regex};
use std::collections::BTreeSet;

/// Replace every whole-token `<alias>.<symbol>` with the bare symbol, for
/// each symbol in the set.
///
/// Every symbol is matched with boundary anchors on both sides, so a set
/// containing `Home` never touches `Icons.HomeOutline`, and `MyIcons.Home`
/// is never mistaken for `Icons.Home`. Anchored patterns are disjoint,
/// which makes the replacement order irrelevant.
pub fn strip_qualifiers(
    rule: &ImportRule,
    text: &str,
    symbols: &BTreeSet<String>,
) -> anyhow::Result<String> {
    let alias = regex::escape(rule.alias());
    let mut out = text.to_string();
    for symbol in symbols {
        let pattern = format!(r"\b{}\.{}\b", alias, regex::escape(symbol));
        let re = Regex::new(&pattern)
            .map_err(|e| anyhow::anyhow!("compile pattern for {symbol:?}: {e}"))?;
        out = re.replace_all(&out, NoExpand(symbol)).into_owned();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rewrite(text: &str, names: &[&str]) -> String {
        strip_qualifiers(&ImportRule::default(), text, &set(names)).expect("rewrite")
    }

    #[test]
    fn rewrites_every_occurrence() {
        let out = rewrite("<Icons.Home/> {Icons.Home} Icons.Search", &["Home", "Search"]);
        assert_eq!(out, "<Home/> {Home} Search");
    }

    #[test]
    fn near_miss_tokens_stay_untouched() {
        let out = rewrite("<Icons.Home/> <Icons.HomeOutline/>", &["Home"]);
        assert_eq!(out, "<Home/> <Icons.HomeOutline/>");
    }

    #[test]
    fn other_namespaces_stay_untouched() {
        let out = rewrite("MyIcons.Home Icons.Home", &["Home"]);
        assert_eq!(out, "MyIcons.Home Home");
    }

    #[test]
    fn symbols_absent_from_text_are_noops() {
        let out = rewrite("const x = 1;", &["Home"]);
        assert_eq!(out, "const x = 1;");
    }

    #[test]
    fn prefix_pair_rewrites_cleanly() {
        // Home/HomeOutline is the pathological prefix pair; the anchors
        // keep the two patterns disjoint. Home applies first (set order)
        // and must not clip the longer token.
        let out = rewrite("<Icons.Home/> <Icons.HomeOutline/>", &["Home", "HomeOutline"]);
        assert_eq!(out, "<Home/> <HomeOutline/>");
    }
}
