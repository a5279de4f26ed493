use oas_core::document::OpenApi;
use oas_core::error::ErrorKind;
use oas_core::{Diagnostic, ValidationOptions};

fn validate(doc: serde_json::Value) -> Vec<Diagnostic> {
    OpenApi::from_json(&doc.to_string())
        .unwrap()
        .validate(ValidationOptions::new())
}

fn has(diags: &[Diagnostic], location: &str, kind: ErrorKind) -> bool {
    diags.iter().any(|d| d.location == location && d.kind == kind)
}

fn minimal() -> serde_json::Value {
    serde_json::json!({
        "openapi": "3.1.0",
        "info": {"title": "t", "version": "1"}
    })
}

#[test]
fn test_minimal_document_is_clean() {
    let diags = validate(minimal());
    assert!(diags.is_empty(), "unexpected: {diags:?}");
}

#[test]
fn test_missing_version_and_title() {
    let diags = validate(serde_json::json!({"info": {}}));
    assert!(has(&diags, "openapi", ErrorKind::Required));
    assert!(has(&diags, "info/title", ErrorKind::Required));
    assert!(has(&diags, "info/version", ErrorKind::Required));
}

#[test]
fn test_unsupported_document_version() {
    let mut doc = minimal();
    doc["openapi"] = serde_json::json!("3.0.3");
    let diags = validate(doc);
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert!(has(&diags, "openapi", ErrorKind::InvalidPattern));
}

#[test]
fn test_license_identifier_and_url_exclude_each_other() {
    let mut doc = minimal();
    doc["info"]["license"] = serde_json::json!({
        "name": "MIT", "identifier": "MIT", "url": "https://opensource.org/license/mit/"
    });
    let diags = validate(doc);
    assert!(has(
        &diags,
        "info/license/identifier&url",
        ErrorKind::MutuallyExclusive
    ));
}

#[test]
fn test_malformed_urls_are_flagged_in_place() {
    let mut doc = minimal();
    doc["info"]["contact"] = serde_json::json!({"url": "not a url"});
    doc["externalDocs"] = serde_json::json!({"url": ":also bad"});
    let diags = validate(doc);
    assert!(has(&diags, "info/contact/url", ErrorKind::InvalidPattern));
    assert!(has(&diags, "externalDocs/url", ErrorKind::InvalidPattern));
}

#[test]
fn test_server_variable_default_must_be_enumerated() {
    let mut doc = minimal();
    doc["servers"] = serde_json::json!([{
        "url": "https://{region}.example.com",
        "variables": {"region": {"enum": ["eu", "us"], "default": "ap"}}
    }]);
    let diags = validate(doc);
    assert!(has(
        &diags,
        "servers/0/variables/region/default",
        ErrorKind::InvalidEnum
    ));
}

#[test]
fn test_tag_name_is_required() {
    let mut doc = minimal();
    doc["tags"] = serde_json::json!([{"description": "no name"}]);
    let diags = validate(doc);
    assert!(has(&diags, "tags/0/name", ErrorKind::Required));
}

#[test]
fn test_path_keys_must_start_with_a_slash() {
    let mut doc = minimal();
    doc["paths"] = serde_json::json!({"pets": {"get": {}}});
    let diags = validate(doc);
    assert!(has(&diags, "paths/pets", ErrorKind::InvalidPattern));
}

#[test]
fn test_response_code_pattern() {
    let mut doc = minimal();
    doc["paths"] = serde_json::json!({"/pets": {"get": {"responses": {
        "200": {"description": "ok"},
        "2XX": {"description": "any success"},
        "2xx": {"description": "lowercase range"},
        "600": {"description": "out of range"}
    }}}});
    let diags = validate(doc);
    assert!(has(
        &diags,
        "paths//pets/get/responses/2xx",
        ErrorKind::InvalidPattern
    ));
    assert!(has(
        &diags,
        "paths//pets/get/responses/600",
        ErrorKind::InvalidPattern
    ));
    assert_eq!(diags.len(), 2, "got: {diags:?}");
}

#[test]
fn test_response_description_is_required() {
    let mut doc = minimal();
    doc["paths"] = serde_json::json!({"/pets": {"get": {"responses": {
        "default": {}
    }}}});
    let diags = validate(doc);
    assert!(has(
        &diags,
        "paths//pets/get/responses/default/description",
        ErrorKind::Required
    ));
}

#[test]
fn test_request_body_content_is_required() {
    let mut doc = minimal();
    doc["paths"] = serde_json::json!({"/pets": {"post": {"requestBody": {}}}});
    let diags = validate(doc);
    assert!(has(
        &diags,
        "paths//pets/post/requestBody/content",
        ErrorKind::Required
    ));
}

#[test]
fn test_component_names_are_pattern_checked() {
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"schemas": {
        "Pet.v2_draft-1": {"type": "object"},
        "bad name": {"type": "object"}
    }});
    let diags = validate(doc);
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert!(has(
        &diags,
        "components/schemas/bad name",
        ErrorKind::InvalidPattern
    ));
}

#[test]
fn test_broken_reference_is_a_diagnostic_not_an_error() {
    let mut doc = minimal();
    doc["paths"] = serde_json::json!({"/pets": {"get": {"parameters": [
        {"$ref": "#/components/parameters/Missing"}
    ]}}});
    let diags = validate(doc);
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert!(has(
        &diags,
        "paths//pets/get/parameters/0",
        ErrorKind::ReferenceResolutionFailed
    ));
}

#[test]
fn test_cyclic_schema_references_terminate() {
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"schemas": {
        "A": {"$ref": "#/components/schemas/B"},
        "B": {"$ref": "#/components/schemas/A"}
    }});
    doc["paths"] = serde_json::json!({"/pets": {"get": {"parameters": [
        {"name": "p", "in": "query", "schema": {"$ref": "#/components/schemas/A"}}
    ]}}});
    let diags = validate(doc);
    assert!(has(
        &diags,
        "paths//pets/get/parameters/0/schema",
        ErrorKind::ReferenceResolutionFailed
    ));
}

#[test]
fn test_shared_component_is_validated_exactly_once() {
    // The flawed parameter is referenced from two operations and also listed
    // in components; its missing name must surface a single time, at the
    // component's own location.
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"parameters": {
        "Broken": {"in": "query"}
    }});
    doc["paths"] = serde_json::json!({
        "/a": {"get": {"parameters": [{"$ref": "#/components/parameters/Broken"}]}},
        "/b": {"get": {"parameters": [{"$ref": "#/components/parameters/Broken"}]}}
    });
    let diags = validate(doc);
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert!(has(
        &diags,
        "components/parameters/Broken/name",
        ErrorKind::Required
    ));
}

#[test]
fn test_alias_chain_validates_target_exactly_once() {
    // The reference goes through an alias entry before reaching the flawed
    // parameter; the defect must still surface a single time, at the final
    // entry's own location.
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"parameters": {
        "Alias": {"$ref": "#/components/parameters/Real"},
        "Real": {"in": "query"}
    }});
    doc["paths"] = serde_json::json!({
        "/a": {"get": {"parameters": [{"$ref": "#/components/parameters/Alias"}]}}
    });
    let diags = validate(doc);
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert!(has(
        &diags,
        "components/parameters/Real/name",
        ErrorKind::Required
    ));
}

#[test]
fn test_discriminator_property_name_and_mapping() {
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"schemas": {
        "Cat": {"type": "object"},
        "Pet": {
            "oneOf": [{"$ref": "#/components/schemas/Cat"}],
            "discriminator": {
                "propertyName": "petKind",
                "mapping": {
                    "cat": "#/components/schemas/Cat",
                    "dog": "#/components/schemas/Dog"
                }
            }
        }
    }});
    let diags = validate(doc);
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert!(has(
        &diags,
        "components/schemas/Pet/discriminator/mapping/dog",
        ErrorKind::ReferenceResolutionFailed
    ));
}

#[test]
fn test_link_operation_ref_and_id_exclude_each_other() {
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"links": {
        "Both": {"operationRef": "#/paths/~1pets/get", "operationId": "listPets"}
    }});
    let diags = validate(doc);
    assert!(has(
        &diags,
        "components/links/Both/operationRef&operationId",
        ErrorKind::MutuallyExclusive
    ));
}

#[test]
fn test_security_scheme_per_type_requirements() {
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"securitySchemes": {
        "Key": {"type": "apiKey"},
        "Basic": {"type": "http"},
        "OAuth": {"type": "oauth2"},
        "Oidc": {"type": "openIdConnect"},
        "Odd": {"type": "rotating-totp"},
        "Bare": {}
    }});
    let diags = validate(doc);
    assert!(has(&diags, "components/securitySchemes/Key/name", ErrorKind::Required));
    assert!(has(&diags, "components/securitySchemes/Key/in", ErrorKind::Required));
    assert!(has(&diags, "components/securitySchemes/Basic/scheme", ErrorKind::Required));
    assert!(has(&diags, "components/securitySchemes/OAuth/flows", ErrorKind::Required));
    assert!(has(
        &diags,
        "components/securitySchemes/Oidc/openIdConnectUrl",
        ErrorKind::Required
    ));
    assert!(has(&diags, "components/securitySchemes/Odd/type", ErrorKind::InvalidEnum));
    assert!(has(&diags, "components/securitySchemes/Bare/type", ErrorKind::Required));
}

#[test]
fn test_oauth_flow_variant_urls() {
    let mut doc = minimal();
    doc["components"] = serde_json::json!({"securitySchemes": {
        "OAuth": {"type": "oauth2", "flows": {
            "implicit": {"scopes": {}},
            "password": {"scopes": {}},
            "authorizationCode": {"scopes": {}}
        }}
    }});
    let diags = validate(doc);
    let base = "components/securitySchemes/OAuth/flows";
    assert!(has(&diags, &format!("{base}/implicit/authorizationUrl"), ErrorKind::Required));
    assert!(has(&diags, &format!("{base}/password/tokenUrl"), ErrorKind::Required));
    assert!(has(
        &diags,
        &format!("{base}/authorizationCode/authorizationUrl"),
        ErrorKind::Required
    ));
    assert!(has(
        &diags,
        &format!("{base}/authorizationCode/tokenUrl"),
        ErrorKind::Required
    ));
}

#[test]
fn test_callback_path_items_are_walked() {
    let mut doc = minimal();
    doc["paths"] = serde_json::json!({"/subscribe": {"post": {
        "responses": {"202": {"description": "accepted"}},
        "callbacks": {"onEvent": {
            "{$request.body#/callbackUrl}": {"post": {"responses": {
                "900": {"description": "bad code"}
            }}}
        }}
    }}});
    let diags = validate(doc);
    assert!(has(
        &diags,
        "paths//subscribe/post/callbacks/onEvent/{$request.body#/callbackUrl}/post/responses/900",
        ErrorKind::InvalidPattern
    ));
}
