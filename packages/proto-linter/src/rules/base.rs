//! Base trait for all lint rules

use crate::error::LintError;
use crate::models::{Failure, SchemaDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static RULE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").unwrap());

/// Base trait that all lint rules must implement.
///
/// Rules hold no state between runs; the same rule may be checked
/// concurrently as long as each call gets its own `add` callback.
pub trait LintRule: Send + Sync {
    /// The unique identifier for this rule (e.g., "SERVICE_NAMES_SERVICE_SUFFIX")
    fn rule_id(&self) -> &str;

    /// Short description of what the rule checks
    fn description(&self) -> &str;

    /// Report every violation in `documents` through `add`.
    ///
    /// Returns an error only when the documents cannot be traversed, never
    /// for a violation.
    fn check(
        &self,
        add: &mut dyn FnMut(Failure),
        dir_path: &Path,
        documents: &[SchemaDocument],
    ) -> Result<(), LintError>;
}

/// Rule ids are uppercase snake case tokens
pub fn is_valid_rule_id(id: &str) -> bool {
    RULE_ID_REGEX.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rule_ids() {
        assert!(is_valid_rule_id("SERVICE_NAMES_SERVICE_SUFFIX"));
        assert!(is_valid_rule_id("RPC_NAMES_V2"));
        assert!(is_valid_rule_id("LINT"));
    }

    #[test]
    fn test_invalid_rule_ids() {
        assert!(!is_valid_rule_id(""));
        assert!(!is_valid_rule_id("service_names"));
        assert!(!is_valid_rule_id("SERVICE__NAMES"));
        assert!(!is_valid_rule_id("_SERVICE"));
        assert!(!is_valid_rule_id("SERVICE_"));
        assert!(!is_valid_rule_id("Service-Names"));
    }
}
