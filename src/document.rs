use crate::checker::ExampleChecker;
use crate::components::Components;
use crate::error::{ErrorKind, OasError};
use crate::ext::Extendable;
use crate::info::{check_url, Info};
use crate::paths::Paths;
use crate::security::SecurityRequirement;
use crate::server::Server;
use crate::validate::{join_loc, run_validation, Diagnostic, ValidateSpec, ValidationOptions, Validator};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^3\.1\.\d+$").expect("valid pattern"));

/// The root of a described API. Decoding is lenient: structural violations
/// are reported by [`OpenApi::validate`], not by the decoder, so a flawed
/// document can still be loaded, inspected, and re-encoded untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub openapi: String,
    #[serde(default)]
    pub info: Extendable<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema_dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Extendable<Server>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Paths>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Extendable<Components>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Extendable<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Extendable<ExternalDocs>>,
    /// Root-level `x-*` extensions (and any other unclaimed keys).
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl OpenApi {
    pub fn new(info: Info) -> Self {
        Self {
            openapi: "3.1.0".to_string(),
            info: info.into(),
            ..Self::default()
        }
    }

    pub fn from_json(data: &str) -> Result<Self, OasError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_yaml(data: &str) -> Result<Self, OasError> {
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, OasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, OasError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Walks the whole document and returns every rule violation found, with
    /// slash-joined location paths. An empty result means the document is
    /// well-formed under the checked rules.
    pub fn validate(&self, opts: ValidationOptions) -> Vec<Diagnostic> {
        run_validation(self, opts, None)
    }

    /// Like [`OpenApi::validate`], but example data is additionally checked
    /// against its governing schema through the given checker.
    pub fn validate_with_checker(
        &self,
        opts: ValidationOptions,
        checker: &dyn ExampleChecker,
    ) -> Vec<Diagnostic> {
        run_validation(self, opts, Some(checker))
    }
}

impl ValidateSpec for OpenApi {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.openapi.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "openapi")));
        } else if !VERSION_PATTERN.is_match(&self.openapi) {
            errs.push(Diagnostic::new(
                join_loc(location, "openapi"),
                ErrorKind::InvalidPattern,
                format!(
                    "unsupported version '{}', must match `{}`",
                    self.openapi,
                    VERSION_PATTERN.as_str()
                ),
            ));
        }
        errs.extend(self.info.validate_spec(&join_loc(location, "info"), validator));
        for (i, server) in self.servers.iter().enumerate() {
            errs.extend(server.validate_spec(&join_loc(location, format!("servers/{i}")), validator));
        }
        if let Some(paths) = &self.paths {
            errs.extend(paths.validate_spec(&join_loc(location, "paths"), validator));
        }
        if let Some(components) = &self.components {
            errs.extend(components.validate_spec(&join_loc(location, "components"), validator));
        }
        for (i, tag) in self.tags.iter().enumerate() {
            errs.extend(tag.validate_spec(&join_loc(location, format!("tags/{i}")), validator));
        }
        if let Some(docs) = &self.external_docs {
            errs.extend(docs.validate_spec(&join_loc(location, "externalDocs"), validator));
        }
        errs
    }
}

/// Metadata for a single tag used by the document's operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Extendable<ExternalDocs>>,
}

impl ValidateSpec for Tag {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.name.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "name")));
        }
        if let Some(docs) = &self.external_docs {
            errs.extend(docs.validate_spec(&join_loc(location, "externalDocs"), validator));
        }
        errs
    }
}

/// A pointer to external documentation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl ValidateSpec for ExternalDocs {
    fn validate_spec(&self, location: &str, _validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.url.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "url")));
        } else if let Some(err) = check_url(Some(&self.url)) {
            errs.push(Diagnostic::new(
                join_loc(location, "url"),
                ErrorKind::InvalidPattern,
                err,
            ));
        }
        errs
    }
}
