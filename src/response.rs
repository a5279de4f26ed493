use crate::error::ErrorKind;
use crate::ext::Extendable;
use crate::link::Link;
use crate::media::MediaType;
use crate::parameter::Header;
use crate::refs::RefOrSpec;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use regex::Regex;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Explicit status codes plus the five range wildcards 1XX..5XX.
static RESPONSE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-5](\d{2}|XX)$").expect("valid pattern"));

/// The expected responses of an operation, keyed by status code or range,
/// with an optional `default` fallback.
///
/// The status-code keys share the flat encoding with the `default` key and
/// any `x-*` extensions, so the codec splits the raw map by key shape
/// instead of deriving.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Responses {
    pub default: Option<RefOrSpec<Extendable<Response>>>,
    pub responses: BTreeMap<String, RefOrSpec<Extendable<Response>>>,
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl Serialize for Responses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.responses.len()
            + self.extensions.len()
            + usize::from(self.default.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        for (code, response) in &self.responses {
            map.serialize_entry(code, response)?;
        }
        for (name, value) in &self.extensions {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut out = Responses::default();
        for (key, value) in raw {
            if key == "default" {
                out.default = Some(serde_json::from_value(value).map_err(de::Error::custom)?);
            } else if key.starts_with("x-") {
                out.extensions.insert(key, value);
            } else {
                let response = serde_json::from_value(value).map_err(de::Error::custom)?;
                out.responses.insert(key, response);
            }
        }
        Ok(out)
    }
}

impl ValidateSpec for Responses {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if let Some(default) = &self.default {
            errs.extend(default.validate_spec(&join_loc(location, "default"), validator));
        }
        for (code, response) in &self.responses {
            if !RESPONSE_CODE_PATTERN.is_match(code) {
                errs.push(Diagnostic::new(
                    join_loc(location, code),
                    ErrorKind::InvalidPattern,
                    format!(
                        "must match pattern '{}', but got '{code}'",
                        RESPONSE_CODE_PATTERN.as_str()
                    ),
                ));
            }
            errs.extend(response.validate_spec(&join_loc(location, code), validator));
        }
        errs
    }
}

/// A single response of an operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, RefOrSpec<Extendable<Header>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, Extendable<MediaType>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, RefOrSpec<Extendable<Link>>>,
}

impl ValidateSpec for Response {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.description.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "description")));
        }
        for (name, header) in &self.headers {
            let loc = join_loc(&join_loc(location, "headers"), name);
            errs.extend(header.validate_spec(&loc, validator));
        }
        for (media, media_type) in &self.content {
            let loc = join_loc(&join_loc(location, "content"), media);
            errs.extend(media_type.validate_spec(&loc, validator));
        }
        for (name, link) in &self.links {
            let loc = join_loc(&join_loc(location, "links"), name);
            errs.extend(link.validate_spec(&loc, validator));
        }
        errs
    }
}
