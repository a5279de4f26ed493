use crate::ext::{is_false, Extendable};
use crate::refs::RefOrSpec;
use crate::scalars::{BoolOrSchema, SingleOrArray};
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A JSON-Schema-dialect schema, modeling the keyword subset the document
/// format uses. Keywords outside the subset are preserved in `extensions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The `type` keyword; a single type name or a list of them.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SingleOrArray<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RefOrSpec<Schema>>>,
    /// `false` forbids extra properties, which is different from absent, so
    /// the flag is kept behind an `Option` and never defaulted away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<BoolOrSchema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<RefOrSpec<Schema>>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<Extendable<Xml>>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl Schema {
    /// Merges a single extension (or unsupported keyword) into the schema.
    pub fn add_ext(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> &mut Self {
        self.extensions.insert(name.into(), value.into());
        self
    }
}

impl ValidateSpec for Schema {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        for (name, schema) in &self.properties {
            let loc = join_loc(&join_loc(location, "properties"), name);
            errs.extend(schema.validate_spec(&loc, validator));
        }
        if let Some(items) = &self.items {
            errs.extend(items.validate_spec(&join_loc(location, "items"), validator));
        }
        if let Some(ap) = &self.additional_properties {
            if let Some(schema) = ap.schema() {
                errs.extend(
                    schema.validate_spec(&join_loc(location, "additionalProperties"), validator),
                );
            }
        }
        for (field, group) in [
            ("allOf", &self.all_of),
            ("anyOf", &self.any_of),
            ("oneOf", &self.one_of),
        ] {
            for (i, schema) in group.iter().enumerate() {
                let loc = join_loc(&join_loc(location, field), i.to_string());
                errs.extend(schema.validate_spec(&loc, validator));
            }
        }
        if let Some(not) = &self.not {
            errs.extend(not.validate_spec(&join_loc(location, "not"), validator));
        }
        if let Some(discriminator) = &self.discriminator {
            errs.extend(
                discriminator.validate_spec(&join_loc(location, "discriminator"), validator),
            );
        }
        if let Some(xml) = &self.xml {
            errs.extend(xml.validate_spec(&join_loc(location, "xml"), validator));
        }
        errs
    }
}

/// Routes a polymorphic payload to one of several alternative schemas based
/// on a property value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    pub property_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mapping: BTreeMap<String, String>,
}

impl ValidateSpec for Discriminator {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.property_name.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "propertyName")));
        }
        // Every mapping value is an implicit schema reference and goes
        // through the same resolution-and-validate step as an explicit one.
        for (name, target) in &self.mapping {
            let implicit = RefOrSpec::<Schema>::reference(target);
            let loc = join_loc(&join_loc(location, "mapping"), name);
            errs.extend(implicit.validate_spec(&loc, validator));
        }
        errs
    }
}

/// Fine-tuning metadata for XML model definitions. Pure data; there is
/// nothing to validate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Xml {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub attribute: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrapped: bool,
}

impl ValidateSpec for Xml {
    fn validate_spec(&self, _location: &str, _validator: &mut Validator) -> Vec<Diagnostic> {
        Vec::new()
    }
}
