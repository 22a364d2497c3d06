//! SERVICE_NAMES_SERVICE_SUFFIX: Service Names End With "Service"
//!
//! `FooAPI` gets a message pointing at the likely rename to `FooService`.

use crate::error::LintError;
use crate::models::{Failure, FailureSink, SchemaDocument, Service};
use crate::rules::base::LintRule;
use crate::visitor::{run_visitor, Visitor};
use std::path::Path;

pub const RULE_ID: &str = "SERVICE_NAMES_SERVICE_SUFFIX";

pub struct ServiceNamesServiceSuffixRule;

impl ServiceNamesServiceSuffixRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ServiceNamesServiceSuffixRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for ServiceNamesServiceSuffixRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        r#"Verifies that all service names end with "Service"."#
    }

    fn check(
        &self,
        add: &mut dyn FnMut(Failure),
        _dir_path: &Path,
        documents: &[SchemaDocument],
    ) -> Result<(), LintError> {
        let mut visitor = SuffixVisitor {
            sink: FailureSink::new(self.rule_id(), add),
        };
        run_visitor(&mut visitor, documents)
    }
}

struct SuffixVisitor<'a> {
    sink: FailureSink<'a>,
}

impl Visitor for SuffixVisitor<'_> {
    fn visit_service(&mut self, service: &Service) {
        if service.name.ends_with("Service") {
            return;
        }

        let message = if service.name.ends_with("API") {
            format!(
                "Service name {:?} must end with \"Service\". Since it currently ends with \"API\", \
                this likely means replacing \"API\" with \"Service\"",
                service.name
            )
        } else {
            format!("Service name {:?} must end with \"Service\".", service.name)
        };
        self.sink.add_failure(&service.position, message);
    }
}
