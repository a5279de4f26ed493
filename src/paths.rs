use crate::document::ExternalDocs;
use crate::error::ErrorKind;
use crate::ext::{is_false, Extendable};
use crate::media::RequestBody;
use crate::parameter::Parameter;
use crate::refs::RefOrSpec;
use crate::response::Responses;
use crate::security::SecurityRequirement;
use crate::server::Server;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// The relative paths to the individual endpoints. Keys are path templates
/// and must begin with a forward slash; `x-` keys are vendor extensions
/// and are kept verbatim.
///
/// Paths is map-shaped on the wire, so it carries its extensions itself
/// instead of being wrapped in [`Extendable`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paths {
    pub paths: BTreeMap<String, RefOrSpec<Extendable<PathItem>>>,
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl Paths {
    pub fn add(
        &mut self,
        path: impl Into<String>,
        item: RefOrSpec<Extendable<PathItem>>,
    ) -> &mut Self {
        self.paths.insert(path.into(), item);
        self
    }
}

impl Serialize for Paths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map =
            serializer.serialize_map(Some(self.paths.len() + self.extensions.len()))?;
        for (path, item) in &self.paths {
            map.serialize_entry(path, item)?;
        }
        for (name, value) in &self.extensions {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut out = Paths::default();
        for (key, value) in raw {
            if key.starts_with("x-") {
                out.extensions.insert(key, value);
            } else {
                let item = serde_json::from_value(value).map_err(D::Error::custom)?;
                out.paths.insert(key, item);
            }
        }
        Ok(out)
    }
}

impl ValidateSpec for Paths {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        for (path, item) in &self.paths {
            let loc = join_loc(location, path);
            if !path.starts_with('/') {
                errs.push(Diagnostic::new(
                    loc.clone(),
                    ErrorKind::InvalidPattern,
                    "must start with `/`",
                ));
            }
            errs.extend(item.validate_spec(&loc, validator));
        }
        errs
    }
}

/// The operations available on a single path, plus shared parameters and
/// server overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Extendable<Operation>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Extendable<Server>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOrSpec<Extendable<Parameter>>>,
}

impl PathItem {
    /// The defined operations paired with their lowercase method names.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Extendable<Operation>)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

impl ValidateSpec for PathItem {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        for (method, op) in self.operations() {
            errs.extend(op.validate_spec(&join_loc(location, method), validator));
        }
        for (i, server) in self.servers.iter().enumerate() {
            errs.extend(server.validate_spec(&join_loc(location, format!("servers/{i}")), validator));
        }
        for (i, parameter) in self.parameters.iter().enumerate() {
            errs.extend(
                parameter.validate_spec(&join_loc(location, format!("parameters/{i}")), validator),
            );
        }
        errs
    }
}

/// A single API operation on a path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Extendable<ExternalDocs>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOrSpec<Extendable<Parameter>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RefOrSpec<Extendable<RequestBody>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Responses>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub callbacks: BTreeMap<String, RefOrSpec<Callback>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Extendable<Server>>,
}

impl ValidateSpec for Operation {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if let Some(id) = &self.operation_id {
            // Registered so link targets collected elsewhere can be matched
            // against the ids that actually exist.
            validator.mark_visited(format!("operations/{id}"));
        }
        if let Some(docs) = &self.external_docs {
            errs.extend(docs.validate_spec(&join_loc(location, "externalDocs"), validator));
        }
        for (i, parameter) in self.parameters.iter().enumerate() {
            errs.extend(
                parameter.validate_spec(&join_loc(location, format!("parameters/{i}")), validator),
            );
        }
        if let Some(body) = &self.request_body {
            errs.extend(body.validate_spec(&join_loc(location, "requestBody"), validator));
        }
        if let Some(responses) = &self.responses {
            errs.extend(responses.validate_spec(&join_loc(location, "responses"), validator));
        }
        for (name, callback) in &self.callbacks {
            errs.extend(
                callback.validate_spec(&join_loc(location, format!("callbacks/{name}")), validator),
            );
        }
        for (i, server) in self.servers.iter().enumerate() {
            errs.extend(server.validate_spec(&join_loc(location, format!("servers/{i}")), validator));
        }
        errs
    }
}

/// A map of out-of-band callbacks related to the parent operation. Keys are
/// runtime expressions identifying the callback URL; `x-` keys are kept as
/// extensions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Callback {
    pub callbacks: BTreeMap<String, RefOrSpec<Extendable<PathItem>>>,
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl Callback {
    pub fn add(
        &mut self,
        expression: impl Into<String>,
        item: RefOrSpec<Extendable<PathItem>>,
    ) -> &mut Self {
        self.callbacks.insert(expression.into(), item);
        self
    }
}

impl Serialize for Callback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map =
            serializer.serialize_map(Some(self.callbacks.len() + self.extensions.len()))?;
        for (expression, item) in &self.callbacks {
            map.serialize_entry(expression, item)?;
        }
        for (name, value) in &self.extensions {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Callback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut out = Callback::default();
        for (key, value) in raw {
            if key.starts_with("x-") {
                out.extensions.insert(key, value);
            } else {
                let item = serde_json::from_value(value).map_err(D::Error::custom)?;
                out.callbacks.insert(key, item);
            }
        }
        Ok(out)
    }
}

impl ValidateSpec for Callback {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        for (expression, item) in &self.callbacks {
            errs.extend(item.validate_spec(&join_loc(location, expression), validator));
        }
        errs
    }
}
