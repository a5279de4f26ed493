use crate::ext::Extendable;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A server hosting the described API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, Extendable<ServerVariable>>,
}

impl ValidateSpec for Server {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.url.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "url")));
        }
        for (name, variable) in &self.variables {
            let loc = join_loc(&join_loc(location, "variables"), name);
            errs.extend(variable.validate_spec(&loc, validator));
        }
        errs
    }
}

/// A variable for server URL template substitution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVariable {
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default)]
    pub default: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValidateSpec for ServerVariable {
    fn validate_spec(&self, location: &str, _validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.default.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "default")));
        } else if !self.enum_values.is_empty() && !self.enum_values.contains(&self.default) {
            errs.push(Diagnostic::new(
                join_loc(location, "default"),
                crate::error::ErrorKind::InvalidEnum,
                format!(
                    "default '{}' must be listed in the enum values",
                    self.default
                ),
            ));
        }
        errs
    }
}
