use crate::error::ErrorKind;
use crate::ext::{is_false, Extendable};
use crate::media::{Example, MediaType};
use crate::refs::RefOrSpec;
use crate::schema::Schema;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// RFC 3986 reserved characters, forbidden in query parameter names unless
/// `allowReserved` is set.
pub const RESERVED_CHARACTERS: &str = ":/?#[]@!$&'()*+,;=";

/// A path parameter name is a single template segment: no `/`, `#` or `?`.
static PATH_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/#?]+$").expect("valid pattern"));

/// The location of a parameter within a request.
///
/// Unrecognized values decode losslessly into `Unknown` and are reported as
/// soft diagnostics during validation, never as decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterIn {
    Path,
    Query,
    Header,
    Cookie,
    Unknown(String),
}

impl ParameterIn {
    pub(crate) fn is_unset(&self) -> bool {
        matches!(self, ParameterIn::Unknown(s) if s.is_empty())
    }
}

impl Default for ParameterIn {
    fn default() -> Self {
        ParameterIn::Unknown(String::new())
    }
}

impl From<String> for ParameterIn {
    fn from(s: String) -> Self {
        match s.as_str() {
            "path" => ParameterIn::Path,
            "query" => ParameterIn::Query,
            "header" => ParameterIn::Header,
            "cookie" => ParameterIn::Cookie,
            _ => ParameterIn::Unknown(s),
        }
    }
}

impl From<ParameterIn> for String {
    fn from(v: ParameterIn) -> Self {
        v.to_string()
    }
}

impl fmt::Display for ParameterIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterIn::Path => "path",
            ParameterIn::Query => "query",
            ParameterIn::Header => "header",
            ParameterIn::Cookie => "cookie",
            ParameterIn::Unknown(s) => s,
        };
        f.write_str(s)
    }
}

/// How a parameter value is serialized. Each style is only valid for
/// specific locations; the pairing is enforced during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterStyle {
    Matrix,
    Label,
    Form,
    Simple,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
    Unknown(String),
}

impl From<String> for ParameterStyle {
    fn from(s: String) -> Self {
        match s.as_str() {
            "matrix" => ParameterStyle::Matrix,
            "label" => ParameterStyle::Label,
            "form" => ParameterStyle::Form,
            "simple" => ParameterStyle::Simple,
            "spaceDelimited" => ParameterStyle::SpaceDelimited,
            "pipeDelimited" => ParameterStyle::PipeDelimited,
            "deepObject" => ParameterStyle::DeepObject,
            _ => ParameterStyle::Unknown(s),
        }
    }
}

impl From<ParameterStyle> for String {
    fn from(v: ParameterStyle) -> Self {
        v.to_string()
    }
}

impl fmt::Display for ParameterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterStyle::Matrix => "matrix",
            ParameterStyle::Label => "label",
            ParameterStyle::Form => "form",
            ParameterStyle::Simple => "simple",
            ParameterStyle::SpaceDelimited => "spaceDelimited",
            ParameterStyle::PipeDelimited => "pipeDelimited",
            ParameterStyle::DeepObject => "deepObject",
            ParameterStyle::Unknown(s) => s,
        };
        f.write_str(s)
    }
}

/// A single operation parameter, identified by the combination of `name`
/// and `in`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "in", default, skip_serializing_if = "ParameterIn::is_unset")]
    pub location: ParameterIn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub explode: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_reserved: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_empty_value: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, Extendable<MediaType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, RefOrSpec<Extendable<Example>>>,
}

impl ValidateSpec for Parameter {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.schema.is_some() && !self.content.is_empty() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "schema&content",
            )));
        }
        if self.example.is_some() && !self.examples.is_empty() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "example&examples",
            )));
        }

        if !self.content.is_empty() {
            if self.content.len() != 1 {
                errs.push(Diagnostic::new(
                    join_loc(location, "content"),
                    ErrorKind::UnsupportedCombination,
                    format!(
                        "invalid number of items, expected only one, but got '{}'",
                        self.content.len()
                    ),
                ));
            }
            for (media, media_type) in &self.content {
                let loc = join_loc(&join_loc(location, "content"), media);
                errs.extend(media_type.validate_spec(&loc, validator));
            }
        }
        if let Some(schema) = &self.schema {
            errs.extend(schema.validate_spec(&join_loc(location, "schema"), validator));
        }
        for (name, example) in &self.examples {
            let loc = join_loc(&join_loc(location, "examples"), name);
            errs.extend(example.validate_spec(&loc, validator));
        }

        match &self.location {
            ParameterIn::Path | ParameterIn::Query | ParameterIn::Header | ParameterIn::Cookie => {}
            ParameterIn::Unknown(s) if s.is_empty() => {
                errs.push(Diagnostic::required(join_loc(location, "in")));
            }
            ParameterIn::Unknown(s) => {
                errs.push(Diagnostic::new(
                    join_loc(location, "in"),
                    ErrorKind::InvalidEnum,
                    format!(
                        "invalid value, expected one of [query, header, path, cookie], but got '{s}'"
                    ),
                ));
            }
        }

        if let Some(style) = &self.style {
            match style {
                ParameterStyle::Matrix | ParameterStyle::Label => {
                    if self.location != ParameterIn::Path {
                        errs.push(Diagnostic::new(
                            join_loc(location, "style"),
                            ErrorKind::UnsupportedCombination,
                            "only allowed when `in` is 'path'",
                        ));
                    }
                }
                ParameterStyle::Form => {
                    if self.location != ParameterIn::Query && self.location != ParameterIn::Cookie {
                        errs.push(Diagnostic::new(
                            join_loc(location, "style"),
                            ErrorKind::UnsupportedCombination,
                            "only allowed when `in` is 'query' or 'cookie'",
                        ));
                    }
                }
                ParameterStyle::Simple => {
                    if self.location != ParameterIn::Path && self.location != ParameterIn::Header {
                        errs.push(Diagnostic::new(
                            join_loc(location, "style"),
                            ErrorKind::UnsupportedCombination,
                            "only allowed when `in` is 'path' or 'header'",
                        ));
                    }
                }
                ParameterStyle::SpaceDelimited
                | ParameterStyle::PipeDelimited
                | ParameterStyle::DeepObject => {
                    if self.location != ParameterIn::Query {
                        errs.push(Diagnostic::new(
                            join_loc(location, "style"),
                            ErrorKind::UnsupportedCombination,
                            "only allowed when `in` is 'query'",
                        ));
                    }
                }
                ParameterStyle::Unknown(s) => {
                    errs.push(Diagnostic::new(
                        join_loc(location, "style"),
                        ErrorKind::InvalidEnum,
                        format!(
                            "invalid value, expected one of [matrix, label, form, simple, \
                             spaceDelimited, pipeDelimited, deepObject], but got '{s}'"
                        ),
                    ));
                }
            }
        }

        if self.name.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "name")));
        } else if self.location == ParameterIn::Path && !PATH_NAME_PATTERN.is_match(&self.name) {
            errs.push(Diagnostic::new(
                join_loc(location, "name"),
                ErrorKind::InvalidPattern,
                format!(
                    "must match pattern '{}', but got '{}'",
                    PATH_NAME_PATTERN.as_str(),
                    self.name
                ),
            ));
        } else if !self.allow_reserved
            && self.location == ParameterIn::Query
            && self.name.contains(|c| RESERVED_CHARACTERS.contains(c))
        {
            errs.push(Diagnostic::new(
                join_loc(location, "name"),
                ErrorKind::InvalidPattern,
                format!(
                    "'{}' contains reserved characters: '{RESERVED_CHARACTERS}'",
                    self.name
                ),
            ));
        }

        if self.allow_reserved && self.location != ParameterIn::Query {
            errs.push(Diagnostic::new(
                join_loc(location, "allowReserved"),
                ErrorKind::UnsupportedCombination,
                "only allowed when `in` is 'query'",
            ));
        }
        if self.allow_empty_value && self.location != ParameterIn::Query {
            errs.push(Diagnostic::new(
                join_loc(location, "allowEmptyValue"),
                ErrorKind::UnsupportedCombination,
                "only allowed when `in` is 'query'",
            ));
        }
        if !self.required && self.location == ParameterIn::Path {
            errs.push(Diagnostic::new(
                join_loc(location, "required"),
                ErrorKind::Required,
                "must be `true` when `in` is 'path'",
            ));
        }

        if validator.opts.skip_example_validation {
            return errs;
        }
        errs.extend(self.validate_examples(location, validator));
        errs
    }
}

impl Parameter {
    /// Checks the example value, and every entry of the example map, against
    /// the effective schema: the direct schema if present, otherwise the
    /// single content entry's schema.
    fn validate_examples(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.example.is_none() && self.examples.is_empty() {
            return errs;
        }
        let schema_location = if let Some(schema) = &self.schema {
            Some(schema.location_or_ref(&join_loc(location, "schema")))
        } else {
            self.content.iter().next().and_then(|(media, media_type)| {
                let loc = join_loc(&join_loc(&join_loc(location, "content"), media), "schema");
                media_type
                    .spec
                    .schema
                    .as_ref()
                    .map(|schema| schema.location_or_ref(&loc))
            })
        };
        let Some(schema_location) = schema_location else {
            errs.push(Diagnostic::new(
                location,
                ErrorKind::ExampleValidationFailed,
                "unable to validate examples without schema or content",
            ));
            return errs;
        };

        if let Some(value) = &self.example {
            if let Some(msg) = validator.check_example(&schema_location, value) {
                errs.push(Diagnostic::new(
                    join_loc(location, "example"),
                    ErrorKind::ExampleValidationFailed,
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
                        ErrorKind::ExampleValidationFailed,
                        msg,
                    ));
                }
            }
        }
        errs
    }
}

/// A response or encoding header: a parameter without `name` and `in`,
/// implicitly located in the headers map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub explode: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, Extendable<MediaType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, RefOrSpec<Extendable<Example>>>,
}

impl ValidateSpec for Header {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.schema.is_some() && !self.content.is_empty() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "schema&content",
            )));
        }
        if self.example.is_some() && !self.examples.is_empty() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "example&examples",
            )));
        }
        if !self.content.is_empty() && self.content.len() != 1 {
            errs.push(Diagnostic::new(
                join_loc(location, "content"),
                ErrorKind::UnsupportedCombination,
                format!(
                    "invalid number of items, expected only one, but got '{}'",
                    self.content.len()
                ),
            ));
        }
        if let Some(style) = &self.style {
            if *style != ParameterStyle::Simple {
                errs.push(Diagnostic::new(
                    join_loc(location, "style"),
                    ErrorKind::UnsupportedCombination,
                    "headers only support the 'simple' style",
                ));
            }
        }
        if let Some(schema) = &self.schema {
            errs.extend(schema.validate_spec(&join_loc(location, "schema"), validator));
        }
        for (media, media_type) in &self.content {
            let loc = join_loc(&join_loc(location, "content"), media);
            errs.extend(media_type.validate_spec(&loc, validator));
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

impl Header {
    fn validate_examples(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.example.is_none() && self.examples.is_empty() {
            return errs;
        }
        let schema_location = if let Some(schema) = &self.schema {
            Some(schema.location_or_ref(&join_loc(location, "schema")))
        } else {
            self.content.iter().next().and_then(|(media, media_type)| {
                let loc = join_loc(&join_loc(&join_loc(location, "content"), media), "schema");
                media_type
                    .spec
                    .schema
                    .as_ref()
                    .map(|schema| schema.location_or_ref(&loc))
            })
        };
        let Some(schema_location) = schema_location else {
            errs.push(Diagnostic::new(
                location,
                ErrorKind::ExampleValidationFailed,
                "unable to validate examples without schema or content",
            ));
            return errs;
        };

        if let Some(value) = &self.example {
            if let Some(msg) = validator.check_example(&schema_location, value) {
                errs.push(Diagnostic::new(
                    join_loc(location, "example"),
                    ErrorKind::ExampleValidationFailed,
                    msg,
                ));
            }
        }
        for (name, entry) in &self.examples {
            let Ok(example) = entry.resolve(validator.components()) else {
                continue;
            };
            if let Some(value) = &example.spec.value {
                if let Some(msg) = validator.check_example(&schema_location, value) {
                    errs.push(Diagnostic::new(
                        join_loc(&join_loc(location, "examples"), name),
                        ErrorKind::ExampleValidationFailed,
                        msg,
                    ));
                }
            }
        }
        errs
    }
}
