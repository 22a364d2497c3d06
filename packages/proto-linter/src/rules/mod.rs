//! Lint rules for proto-linter

pub mod base;

// Rule implementations
pub mod request_response_names_match_rpc_lixin;
pub mod service_names_service_suffix;

use crate::error::LintError;
use base::{is_valid_rule_id, LintRule};

/// The set of rules available to a run.
///
/// Built explicitly and handed to the runner; there is no process-wide list.
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// A registry holding every built-in rule
    pub fn with_default_rules() -> Self {
        Self {
            rules: vec![
                Box::new(request_response_names_match_rpc_lixin::RequestResponseNamesMatchRpcLixinRule::new()),
                Box::new(service_names_service_suffix::ServiceNamesServiceSuffixRule::new()),
            ],
        }
    }

    /// Add a rule. Its id must be uppercase snake case and not yet registered.
    pub fn register(&mut self, rule: Box<dyn LintRule>) -> Result<(), LintError> {
        let id = rule.rule_id();
        if !is_valid_rule_id(id) {
            return Err(LintError::InvalidRuleId(id.to_string()));
        }
        if self.get(id).is_some() {
            return Err(LintError::DuplicateRule(id.to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&dyn LintRule> {
        self.rules().find(|r| r.rule_id() == id)
    }

    /// All registered rule ids, in registration order
    pub fn rule_ids(&self) -> Vec<String> {
        self.rules().map(|r| r.rule_id().to_string()).collect()
    }

    /// Rules filtered by enabled ids; `None` enables everything.
    ///
    /// Registration order is kept regardless of the order of `enabled_ids`.
    pub fn enabled(&self, enabled_ids: Option<&[String]>) -> Result<Vec<&dyn LintRule>, LintError> {
        let Some(ids) = enabled_ids else {
            return Ok(self.rules().collect());
        };

        if let Some(unknown) = ids.iter().find(|id| self.get(id).is_none()) {
            return Err(LintError::UnknownRule(unknown.clone()));
        }

        Ok(self
            .rules()
            .filter(|rule| ids.iter().any(|id| id == rule.rule_id()))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
