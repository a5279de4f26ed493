use crate::ext::{is_false, Extendable};
use crate::info::check_url;
use crate::refs::RefOrSpec;
use crate::schema::Schema;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single media-type representation of a payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, RefOrSpec<Extendable<Example>>>,
}

impl ValidateSpec for MediaType {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.example.is_some() && !self.examples.is_empty() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "example&examples",
            )));
        }
        if let Some(schema) = &self.schema {
            errs.extend(schema.validate_spec(&join_loc(location, "schema"), validator));
        }
        for (name, example) in &self.examples {
            let loc = join_loc(&join_loc(location, "examples"), name);
            errs.extend(example.validate_spec(&loc, validator));
        }
        if !validator.opts.skip_example_validation {
            errs.extend(self.validate_examples(location, validator));
        }
        errs
    }
}

impl MediaType {
    fn validate_examples(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.example.is_none() && self.examples.is_empty() {
            return errs;
        }
        let Some(schema) = &self.schema else {
            errs.push(Diagnostic::new(
                location,
                crate::error::ErrorKind::ExampleValidationFailed,
                "unable to validate examples without schema",
            ));
            return errs;
        };
        let schema_location = schema.location_or_ref(&join_loc(location, "schema"));

        if let Some(value) = &self.example {
            if let Some(msg) = validator.check_example(&schema_location, value) {
                errs.push(Diagnostic::new(
                    join_loc(location, "example"),
                    crate::error::ErrorKind::ExampleValidationFailed,
                    msg,
                ));
            }
        }
        for (name, entry) in &self.examples {
            // A failed resolution was already reported for the entry itself.
            let Ok(example) = entry.resolve(validator.components()) else {
                continue;
            };
            if let Some(value) = &example.spec.value {
                if let Some(msg) = validator.check_example(&schema_location, value) {
                    errs.push(Diagnostic::new(
                        join_loc(&join_loc(location, "examples"), name),
                        crate::error::ErrorKind::ExampleValidationFailed,
                        msg,
                    ));
                }
            }
        }
        errs
    }
}

/// A named example of a value. `value` and `externalValue` exclude each
/// other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
}

impl ValidateSpec for Example {
    fn validate_spec(&self, location: &str, _validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.value.is_some() && self.external_value.is_some() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "value&externalValue",
            )));
        }
        if let Some(err) = check_url(self.external_value.as_deref()) {
            errs.push(Diagnostic::new(
                join_loc(location, "externalValue"),
                crate::error::ErrorKind::InvalidPattern,
                err,
            ));
        }
        errs
    }
}

/// A single request body, keyed by media type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, Extendable<MediaType>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl ValidateSpec for RequestBody {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.content.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "content")));
        }
        for (media, media_type) in &self.content {
            let loc = join_loc(&join_loc(location, "content"), media);
            errs.extend(media_type.validate_spec(&loc, validator));
        }
        errs
    }
}
