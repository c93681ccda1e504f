//! Import rule configuration: which alias and module to repair.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("alias {0:?} is not a valid identifier")]
    InvalidAlias(String),

    #[error("module name must not be empty")]
    EmptyModule,
}

/// One wildcard-import repair rule.
///
/// Holds the compiled patterns so per-file scans don't recompile them. The
/// alias-bound detector is deliberately lenient (either quote style, loose
/// whitespace) while [`ImportRule::canonical_import`] is the exact statement
/// substitution anchors to; a wildcard import that is detected but not
/// canonical surfaces as a failed substitution rather than being passed over.
#[derive(Debug, Clone)]
pub struct ImportRule {
    alias: String,
    module: String,
    symbols_per_line: usize,
    wildcard: Regex,
    any_wildcard: Regex,
    reference: Regex,
}

impl ImportRule {
    pub const DEFAULT_ALIAS: &'static str = "Icons";
    pub const DEFAULT_MODULE: &'static str = "lucide-react";
    pub const DEFAULT_SYMBOLS_PER_LINE: usize = 6;

    pub fn new(alias: &str, module: &str) -> Result<Self, RuleError> {
        if !is_identifier(alias) {
            return Err(RuleError::InvalidAlias(alias.to_string()));
        }
        if module.is_empty() {
            return Err(RuleError::EmptyModule);
        }

        let alias_pat = regex::escape(alias);
        let module_pat = regex::escape(module);

        let wildcard = compiled(&format!(
            r#"import\s*\*\s*as\s+{alias_pat}\s+from\s+['"]{module_pat}['"]"#
        ));
        let any_wildcard = compiled(&format!(
            r#"import\s*\*\s*as\s+[A-Za-z_$][A-Za-z0-9_$]*\s+from\s+['"]{module_pat}['"]"#
        ));
        // Symbol names start uppercase; this keeps unrelated dotted access
        // (properties, methods) out of the extracted set.
        let reference = compiled(&format!(r"\b{alias_pat}\.([A-Z][A-Za-z0-9]*)"));

        Ok(Self {
            alias: alias.to_string(),
            module: module.to_string(),
            symbols_per_line: Self::DEFAULT_SYMBOLS_PER_LINE,
            wildcard,
            any_wildcard,
            reference,
        })
    }

    /// Override the wrap threshold (symbols per import line). Clamped to 1.
    pub fn with_symbols_per_line(mut self, symbols_per_line: usize) -> Self {
        self.symbols_per_line = symbols_per_line.max(1);
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn symbols_per_line(&self) -> usize {
        self.symbols_per_line
    }

    /// The exact single-line statement the substitution step anchors to.
    pub fn canonical_import(&self) -> String {
        format!("import * as {} from '{}';", self.alias, self.module)
    }

    /// Lenient detection: is a wildcard import of the module, bound to this
    /// rule's alias, present anywhere in the text?
    pub fn has_wildcard_import(&self, text: &str) -> bool {
        self.wildcard.is_match(text)
    }

    /// How many wildcard imports of the module exist, regardless of alias.
    pub fn wildcard_import_count(&self, text: &str) -> usize {
        self.any_wildcard.find_iter(text).count()
    }

    pub(crate) fn reference(&self) -> &Regex {
        &self.reference
    }
}

impl Default for ImportRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALIAS, Self::DEFAULT_MODULE).expect("default rule is valid")
    }
}

fn compiled(pattern: &str) -> Regex {
    // Patterns are built from escaped fragments; compilation cannot fail.
    Regex::new(pattern).expect("static pattern")
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
