//! Per-vendor query configuration.
//!
//! Which discrete queries get submitted to the analysis service depends
//! on who sent the document. The vendor is resolved by matching the
//! incoming file name against an ordered list of patterns; the resolved
//! vendor then selects its query set, with a `"default"` set as the
//! fallback on both steps.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Vendor used when no rule matches, and the fallback query set key.
pub const DEFAULT_VENDOR: &str = "default";

/// One discrete query submitted to the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuerySpec {
    /// The natural-language question
    pub text: String,

    /// Output key for the answer
    pub alias: String,
}

/// A single file-name pattern bound to a vendor.
///
/// Rules are ordered; the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRule {
    /// Pattern matched against the lowercased file name
    pub pattern: String,

    /// Vendor the pattern resolves to
    pub vendor: String,
}

/// Compiled, ordered vendor matcher.
#[derive(Debug)]
pub struct VendorMatcher {
    rules: Vec<(Regex, String)>,
}

impl VendorMatcher {
    /// Compile an ordered rule list.
    pub fn from_rules(rules: &[VendorRule]) -> Result<Self> {
        let compiled = rules
            .iter()
            .map(|rule| Ok((compile_pattern(&rule.pattern)?, rule.vendor.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules: compiled })
    }

    /// Parse and compile a JSON rule array.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let rules: Vec<VendorRule> = serde_json::from_slice(bytes)?;
        Self::from_rules(&rules)
    }

    /// Resolve the vendor for an incoming file name.
    pub fn match_file(&self, file_name: &str) -> &str {
        let name = file_name.to_lowercase();
        let vendor = self
            .rules
            .iter()
            .find(|(regex, _)| regex.is_match(&name))
            .map(|(_, vendor)| vendor.as_str())
            .unwrap_or(DEFAULT_VENDOR);
        log::debug!("file {:?} resolved to vendor {:?}", file_name, vendor);
        vendor
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the matcher has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Pattern heuristics: an anchored pattern (`^...$`) and a plain token
/// compile verbatim; a multi-word pattern matches its words in order
/// across whitespace, each on a word boundary.
fn compile_pattern(pattern: &str) -> Result<Regex> {
    let source = if pattern.contains('^') && pattern.contains('$') {
        pattern.to_string()
    } else if pattern.contains(' ') {
        format!(r"\b{}\b", pattern.replace(' ', r"\b\s*\b"))
    } else {
        pattern.to_string()
    };
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::VendorPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Query sets keyed by vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryConfig {
    vendors: BTreeMap<String, Vec<QuerySpec>>,
}

impl QueryConfig {
    /// Parse the vendor → queries map from JSON.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The query set for a vendor, falling back to the default set,
    /// then to no queries at all.
    pub fn queries_for(&self, vendor: &str) -> &[QuerySpec] {
        self.vendors
            .get(vendor)
            .or_else(|| self.vendors.get(DEFAULT_VENDOR))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Configured vendor names.
    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.vendors.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, vendor: &str) -> VendorRule {
        VendorRule {
            pattern: pattern.to_string(),
            vendor: vendor.to_string(),
        }
    }

    #[test]
    fn test_plain_pattern_is_substring_match() {
        let matcher = VendorMatcher::from_rules(&[rule("acme", "acme-corp")]).unwrap();
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.match_file("ACME-invoice-123.pdf"), "acme-corp");
        assert_eq!(matcher.match_file("other.pdf"), DEFAULT_VENDOR);
    }

    #[test]
    fn test_empty_rule_set_always_defaults() {
        let matcher = VendorMatcher::from_rules(&[]).unwrap();
        assert!(matcher.is_empty());
        assert_eq!(matcher.match_file("anything.pdf"), DEFAULT_VENDOR);
    }

    #[test]
    fn test_anchored_pattern_is_exact() {
        let matcher =
            VendorMatcher::from_rules(&[rule(r"^inv-\d+\.pdf$", "numbered")]).unwrap();
        assert_eq!(matcher.match_file("inv-42.pdf"), "numbered");
        assert_eq!(matcher.match_file("prefix-inv-42.pdf"), DEFAULT_VENDOR);
    }

    #[test]
    fn test_multi_word_pattern_uses_word_boundaries() {
        let matcher = VendorMatcher::from_rules(&[rule("globex pty", "globex")]).unwrap();
        assert_eq!(matcher.match_file("globex pty statement.pdf"), "globex");
        assert_eq!(matcher.match_file("globexpty.pdf"), DEFAULT_VENDOR);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let matcher = VendorMatcher::from_rules(&[
            rule("invoice", "generic"),
            rule("acme", "acme-corp"),
        ])
        .unwrap();
        assert_eq!(matcher.match_file("acme-invoice.pdf"), "generic");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = VendorMatcher::from_rules(&[rule("([unclosed", "x")]).unwrap_err();
        assert!(matches!(err, Error::VendorPattern { .. }));
    }

    #[test]
    fn test_query_config_fallback() {
        let config = QueryConfig::from_json(
            br#"{
                "default": [{"Text": "What is the invoice number?", "Alias": "invoice_number"}],
                "acme": [{"Text": "What is the PO number?", "Alias": "po_number"}]
            }"#,
        )
        .unwrap();

        assert_eq!(config.queries_for("acme")[0].alias, "po_number");
        assert_eq!(config.queries_for("unknown")[0].alias, "invoice_number");
        assert_eq!(config.vendors().count(), 2);
    }

    #[test]
    fn test_query_config_empty_without_default() {
        let config = QueryConfig::from_json(b"{}").unwrap();
        assert!(config.queries_for("anyone").is_empty());
    }
}
