use oas_core::document::OpenApi;
use oas_core::error::ErrorKind;
use oas_core::{Diagnostic, ValidationOptions};

fn validate_param(param: serde_json::Value) -> Vec<Diagnostic> {
    let doc = serde_json::json!({
        "openapi": "3.1.0",
        "info": {"title": "t", "version": "1"},
        "paths": {"/p": {"get": {"parameters": [param]}}}
    });
    OpenApi::from_json(&doc.to_string())
        .unwrap()
        .validate(ValidationOptions::new())
}

fn has(diags: &[Diagnostic], location: &str, kind: ErrorKind) -> bool {
    diags.iter().any(|d| d.location == location && d.kind == kind)
}

const LOC: &str = "paths//p/get/parameters/0";

#[test]
fn test_valid_path_parameter() {
    let diags = validate_param(serde_json::json!({
        "name": "petId", "in": "path", "required": true,
        "schema": {"type": "integer"}
    }));
    assert!(diags.is_empty(), "unexpected: {diags:?}");
}

#[test]
fn test_path_parameter_name_must_be_a_single_segment() {
    let diags = validate_param(serde_json::json!({
        "name": "a/b", "in": "path", "required": true
    }));
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert!(has(&diags, &format!("{LOC}/name"), ErrorKind::InvalidPattern));
}

#[test]
fn test_missing_name_and_in() {
    let diags = validate_param(serde_json::json!({}));
    assert!(has(&diags, &format!("{LOC}/name"), ErrorKind::Required));
    assert!(has(&diags, &format!("{LOC}/in"), ErrorKind::Required));
}

#[test]
fn test_unknown_in_decodes_but_is_flagged() {
    let diags = validate_param(serde_json::json!({"name": "x", "in": "body"}));
    assert!(has(&diags, &format!("{LOC}/in"), ErrorKind::InvalidEnum));
}

#[test]
fn test_path_parameter_must_be_required() {
    let diags = validate_param(serde_json::json!({"name": "petId", "in": "path"}));
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    let d = &diags[0];
    assert_eq!(d.location, format!("{LOC}/required"));
    assert_eq!(d.kind, ErrorKind::Required);
}

#[test]
fn test_style_location_pairings() {
    // style value, in value, expected ok
    let cases = [
        ("matrix", "path", true),
        ("matrix", "query", false),
        ("label", "path", true),
        ("label", "header", false),
        ("form", "query", true),
        ("form", "cookie", true),
        ("form", "path", false),
        ("simple", "path", true),
        ("simple", "header", true),
        ("simple", "query", false),
        ("spaceDelimited", "query", true),
        ("spaceDelimited", "path", false),
        ("pipeDelimited", "query", true),
        ("pipeDelimited", "header", false),
        ("deepObject", "query", true),
        ("deepObject", "cookie", false),
    ];
    for (style, location, ok) in cases {
        let diags = validate_param(serde_json::json!({
            "name": "x", "in": location, "required": location == "path", "style": style
        }));
        let flagged = has(
            &diags,
            &format!("{LOC}/style"),
            ErrorKind::UnsupportedCombination,
        );
        assert_eq!(
            flagged, !ok,
            "style '{style}' with in '{location}' gave: {diags:?}"
        );
    }
}

#[test]
fn test_unknown_style_is_flagged_as_enum_violation() {
    let diags = validate_param(serde_json::json!({
        "name": "x", "in": "query", "style": "zigzag"
    }));
    assert!(has(&diags, &format!("{LOC}/style"), ErrorKind::InvalidEnum));
}

#[test]
fn test_reserved_characters_in_query_name() {
    let diags = validate_param(serde_json::json!({"name": "a;b", "in": "query"}));
    assert!(has(&diags, &format!("{LOC}/name"), ErrorKind::InvalidPattern));

    let diags = validate_param(serde_json::json!({
        "name": "a;b", "in": "query", "allowReserved": true
    }));
    assert!(diags.is_empty(), "unexpected: {diags:?}");
}

#[test]
fn test_allow_reserved_and_empty_value_are_query_only() {
    let diags = validate_param(serde_json::json!({
        "name": "x", "in": "header", "allowReserved": true, "allowEmptyValue": true
    }));
    assert!(has(
        &diags,
        &format!("{LOC}/allowReserved"),
        ErrorKind::UnsupportedCombination
    ));
    assert!(has(
        &diags,
        &format!("{LOC}/allowEmptyValue"),
        ErrorKind::UnsupportedCombination
    ));
}

#[test]
fn test_schema_and_content_exclude_each_other() {
    let diags = validate_param(serde_json::json!({
        "name": "x", "in": "query",
        "schema": {"type": "string"},
        "content": {"application/json": {"schema": {"type": "string"}}}
    }));
    assert!(has(
        &diags,
        &format!("{LOC}/schema&content"),
        ErrorKind::MutuallyExclusive
    ));
}

#[test]
fn test_content_allows_exactly_one_entry() {
    let diags = validate_param(serde_json::json!({
        "name": "x", "in": "query",
        "content": {
            "application/json": {"schema": {"type": "string"}},
            "text/plain": {"schema": {"type": "string"}}
        }
    }));
    assert!(has(
        &diags,
        &format!("{LOC}/content"),
        ErrorKind::UnsupportedCombination
    ));
}

#[test]
fn test_example_and_examples_exclude_each_other() {
    let diags = validate_param(serde_json::json!({
        "name": "x", "in": "query", "schema": {"type": "string"},
        "example": "a",
        "examples": {"first": {"value": "b"}}
    }));
    assert!(has(
        &diags,
        &format!("{LOC}/example&examples"),
        ErrorKind::MutuallyExclusive
    ));
}

#[test]
fn test_header_style_must_be_simple() {
    let doc = serde_json::json!({
        "openapi": "3.1.0",
        "info": {"title": "t", "version": "1"},
        "paths": {"/p": {"get": {"responses": {"200": {
            "description": "ok",
            "headers": {"X-Rate-Limit": {"style": "form", "schema": {"type": "integer"}}}
        }}}}}
    });
    let diags = OpenApi::from_json(&doc.to_string())
        .unwrap()
        .validate(ValidationOptions::new());
    assert!(has(
        &diags,
        "paths//p/get/responses/200/headers/X-Rate-Limit/style",
        ErrorKind::UnsupportedCombination
    ));
}
