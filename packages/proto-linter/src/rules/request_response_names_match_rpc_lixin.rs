//! REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN: Request/Response Names Match the RPC
//!
//! Requests are always `<Rpc>Request`. Responses follow the verb of the RPC
//! (see [`crate::naming`]), and `google.longrunning.Operation` is accepted
//! for any RPC.

use crate::error::LintError;
use crate::models::{Failure, FailureSink, Rpc, SchemaDocument, Service};
use crate::naming::{expected_request_name, expected_response_name, response_matches};
use crate::rules::base::LintRule;
use crate::visitor::{run_visitor, walk_service, Visitor};
use std::path::Path;

pub const RULE_ID: &str = "REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN";

pub const DESCRIPTION: &str = "Verifies that all request names are RpcNameRequest and all response \
    names follow the verb of the RPC (Create/Update/Get return the resource, Delete returns \
    google.protobuf.Empty, others RpcNameResponse).";

pub struct RequestResponseNamesMatchRpcLixinRule;

impl RequestResponseNamesMatchRpcLixinRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequestResponseNamesMatchRpcLixinRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for RequestResponseNamesMatchRpcLixinRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn check(
        &self,
        add: &mut dyn FnMut(Failure),
        _dir_path: &Path,
        documents: &[SchemaDocument],
    ) -> Result<(), LintError> {
        let mut visitor = NamesMatchVisitor {
            sink: FailureSink::new(self.rule_id(), add),
        };
        run_visitor(&mut visitor, documents)
    }
}

struct NamesMatchVisitor<'a> {
    sink: FailureSink<'a>,
}

impl Visitor for NamesMatchVisitor<'_> {
    fn visit_service(&mut self, service: &Service) {
        walk_service(self, service);
    }

    fn visit_rpc(&mut self, rpc: &Rpc) {
        let expected_request = expected_request_name(&rpc.name);
        if rpc.request_type != expected_request {
            self.sink.add_failure(
                &rpc.position,
                format!(
                    "Name of request type {:?} should be {:?}.",
                    rpc.request_type, expected_request
                ),
            );
        }

        if !response_matches(&rpc.name, &rpc.returns_type) {
            self.sink.add_failure(
                &rpc.position,
                format!(
                    "Name of response type {:?} should be {:?}.",
                    rpc.returns_type,
                    expected_response_name(&rpc.name)
                ),
            );
        }
    }
}
