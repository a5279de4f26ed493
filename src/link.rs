use crate::ext::Extendable;
use crate::server::Server;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A design-time link from a response to another operation, addressed either
/// by `operationRef` or by `operationId` (mutually exclusive).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<Extendable<Server>>,
}

impl ValidateSpec for Link {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.operation_ref.is_some() && self.operation_id.is_some() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "operationRef&operationId",
            )));
        }
        if let Some(id) = &self.operation_id {
            // Targets not yet seen as declared operations are collected into
            // a side table; existence checking across the document is
            // deferred until operation lookup by id is available.
            let key = join_loc("operations", id);
            if !validator.visited.contains(&key) {
                validator
                    .link_operation_ids
                    .insert(join_loc(location, "operationId"), id.clone());
            }
        }
        if let Some(server) = &self.server {
            errs.extend(server.validate_spec(&join_loc(location, "server"), validator));
        }
        errs
    }
}
