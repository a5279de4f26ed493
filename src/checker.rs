use crate::document::OpenApi;
use crate::error::OasError;
use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

/// Failure modes of a single example-data check.
#[derive(Debug, Error, Diagnostic)]
pub enum ExampleError {
    #[error("no schema found at '{location}'")]
    #[diagnostic(code(oas::example::schema_not_found))]
    SchemaNotFound { location: String },

    #[error("schema at '{location}' failed to compile: {message}")]
    #[diagnostic(code(oas::example::compile))]
    Compile { location: String, message: String },

    #[error("example does not match its schema: {message}")]
    #[diagnostic(code(oas::example::mismatch))]
    Mismatch { message: String },
}

/// Checks one candidate value against the schema governing a location.
///
/// The validator only knows the schema's address (a reference identifier or
/// a slash-joined location path); how the schema semantics are interpreted is
/// entirely the checker's concern.
pub trait ExampleChecker {
    fn check_example(&self, schema_location: &str, value: &Value) -> Result<(), ExampleError>;
}

/// An [`ExampleChecker`] backed by a JSON Schema engine in Draft 2020-12
/// mode. The whole document is serialized once; each check compiles a
/// wrapper schema whose `$ref` points at the governing schema inside that
/// document, so sibling references inside the schema keep resolving.
pub struct JsonSchemaChecker {
    document: Value,
}

impl JsonSchemaChecker {
    pub fn for_document(spec: &OpenApi) -> Result<Self, OasError> {
        let document = serde_json::to_value(spec)?;
        Ok(Self { document })
    }

    /// Translates a schema address into a JSON pointer into the serialized
    /// document, verifying the target exists along the way.
    ///
    /// Location segments were produced by slash-joining, while document keys
    /// may themselves contain slashes (path templates like `/pets`, media
    /// types like `application/json`), so at each object the longest
    /// recombined run of segments that matches a key wins.
    fn pointer_for(&self, location: &str) -> Option<String> {
        let path = location.trim_start_matches("#/");
        let segments: Vec<&str> = path.split('/').collect();
        let mut node = &self.document;
        let mut pointer = String::new();
        let mut i = 0;
        while i < segments.len() {
            match node {
                Value::Object(map) => {
                    let mut matched = None;
                    for end in (i..segments.len()).rev() {
                        let key = segments[i..=end].join("/");
                        if map.contains_key(&key) {
                            matched = Some((key, end));
                            break;
                        }
                    }
                    let (key, end) = matched?;
                    node = map.get(&key)?;
                    pointer.push('/');
                    pointer.push_str(&key.replace('~', "~0").replace('/', "~1"));
                    i = end + 1;
                }
                Value::Array(items) => {
                    let idx: usize = segments[i].parse().ok()?;
                    node = items.get(idx)?;
                    pointer.push('/');
                    pointer.push_str(segments[i]);
                    i += 1;
                }
                _ => return None,
            }
        }
        Some(pointer)
    }
}

impl ExampleChecker for JsonSchemaChecker {
    // TODO: cache compiled validators per pointer instead of rebuilding one
    // for every checked value.
    fn check_example(&self, schema_location: &str, value: &Value) -> Result<(), ExampleError> {
        let pointer = self
            .pointer_for(schema_location)
            .ok_or_else(|| ExampleError::SchemaNotFound {
                location: schema_location.to_string(),
            })?;
        let mut wrapper = self.document.clone();
        if let Value::Object(map) = &mut wrapper {
            map.insert("$ref".to_string(), Value::String(format!("#{pointer}")));
        }
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(&wrapper)
            .map_err(|e| ExampleError::Compile {
                location: schema_location.to_string(),
                message: e.to_string(),
            })?;
        validator.validate(value).map_err(|e| ExampleError::Mismatch {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_for(json: &str) -> JsonSchemaChecker {
        JsonSchemaChecker {
            document: serde_json::from_str(json).unwrap(),
        }
    }

    #[test]
    fn pointer_recombines_slashed_keys() {
        let checker = checker_for(
            r#"{
                "paths": {
                    "/pets": {
                        "get": {
                            "parameters": [
                                {"schema": {"type": "integer"}}
                            ]
                        }
                    }
                }
            }"#,
        );
        assert_eq!(
            checker
                .pointer_for("paths//pets/get/parameters/0/schema")
                .as_deref(),
            Some("/paths/~1pets/get/parameters/0/schema")
        );
    }

    #[test]
    fn pointer_for_missing_target_is_none() {
        let checker = checker_for(r#"{"components": {"schemas": {}}}"#);
        assert_eq!(checker.pointer_for("#/components/schemas/Pet"), None);
    }
}
