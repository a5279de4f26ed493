use oas_core::components::{ComponentEntry, Components};
use oas_core::error::ResolveError;
use oas_core::ext::Extendable;
use oas_core::refs::RefOrSpec;
use oas_core::schema::Schema;

fn components_with(entries: Vec<(&str, ComponentEntry)>) -> Extendable<Components> {
    let mut components = Components::default();
    for (name, entry) in entries {
        components.add(name, entry);
    }
    Extendable::new(components)
}

fn resolve_err(
    reference: &str,
    components: Option<&Extendable<Components>>,
) -> ResolveError {
    let r = RefOrSpec::<Schema>::reference(reference);
    match r.resolve(components) {
        Ok(_) => panic!("expected a ResolveError, but got Ok"),
        Err(err) => err,
    }
}

#[test]
fn test_decode_commits_to_ref_on_nonempty_dollar_ref() {
    let v: RefOrSpec<Schema> =
        serde_json::from_value(serde_json::json!({"$ref": "#/components/schemas/Pet"})).unwrap();
    assert_eq!(v.as_ref_name(), Some("#/components/schemas/Pet"));
}

#[test]
fn test_decode_inline_value_without_dollar_ref() {
    let v: RefOrSpec<Schema> =
        serde_json::from_value(serde_json::json!({"type": "string"})).unwrap();
    let spec = v.as_spec().expect("inline value");
    assert_eq!(spec.schema_type.as_ref().unwrap().first().unwrap(), "string");
}

#[test]
fn test_decode_empty_dollar_ref_falls_through_to_inline() {
    // An empty `$ref` does not select the reference shape; the key survives
    // as an unclaimed schema keyword instead.
    let v: RefOrSpec<Schema> = serde_json::from_value(serde_json::json!({"$ref": ""})).unwrap();
    let spec = v.as_spec().expect("inline value");
    assert_eq!(spec.extensions["$ref"], "");
}

#[test]
fn test_encode_is_untagged_both_ways() {
    let r = RefOrSpec::<Schema>::reference("#/components/schemas/Pet");
    assert_eq!(
        serde_json::to_value(&r).unwrap(),
        serde_json::json!({"$ref": "#/components/schemas/Pet"})
    );
    let inline = RefOrSpec::spec(Schema {
        title: Some("Pet".into()),
        ..Schema::default()
    });
    assert_eq!(
        serde_json::to_value(&inline).unwrap(),
        serde_json::json!({"title": "Pet"})
    );
}

#[test]
fn test_ref_summary_and_description_round_trip() {
    let data = serde_json::json!({
        "$ref": "#/components/schemas/Pet",
        "summary": "a pet",
        "description": "overrides the target description"
    });
    let v: RefOrSpec<Schema> = serde_json::from_value(data.clone()).unwrap();
    assert_eq!(serde_json::to_value(&v).unwrap(), data);
}

#[test]
fn test_resolve_inline_is_identity() {
    let v = RefOrSpec::spec(Schema::default());
    assert!(v.resolve(None).is_ok());
}

#[test]
fn test_resolve_follows_reference_chain() {
    let components = components_with(vec![
        (
            "Alias",
            ComponentEntry::Schema(RefOrSpec::reference("#/components/schemas/Pet")),
        ),
        (
            "Pet",
            ComponentEntry::Schema(RefOrSpec::spec(Schema {
                title: Some("Pet".into()),
                ..Schema::default()
            })),
        ),
    ]);
    let r = RefOrSpec::<Schema>::reference("#/components/schemas/Alias");
    let target = r.resolve(Some(&components)).unwrap();
    assert_eq!(target.title.as_deref(), Some("Pet"));
}

#[test]
fn test_resolve_reports_cycle_with_visited_chain() {
    let components = components_with(vec![
        (
            "A",
            ComponentEntry::Schema(RefOrSpec::reference("#/components/schemas/B")),
        ),
        (
            "B",
            ComponentEntry::Schema(RefOrSpec::reference("#/components/schemas/A")),
        ),
    ]);
    match resolve_err("#/components/schemas/A", Some(&components)) {
        ResolveError::CycleDetected { reference, chain } => {
            assert_eq!(reference, "#/components/schemas/A");
            assert_eq!(
                chain,
                "#/components/schemas/A -> #/components/schemas/B"
            );
        }
        other => panic!("expected CycleDetected, got {other:?}"),
    }
}

#[test]
fn test_resolve_self_reference_is_a_cycle() {
    let components = components_with(vec![(
        "A",
        ComponentEntry::Schema(RefOrSpec::reference("#/components/schemas/A")),
    )]);
    assert!(matches!(
        resolve_err("#/components/schemas/A", Some(&components)),
        ResolveError::CycleDetected { .. }
    ));
}

#[test]
fn test_resolve_empty_reference() {
    assert!(matches!(resolve_err("", None), ResolveError::NilReference));
}

#[test]
fn test_resolve_rejects_remote_reference() {
    let err = resolve_err("https://example.com/schemas.json#/components/schemas/Pet", None);
    assert!(matches!(err, ResolveError::UnsupportedRemoteReference { .. }));
}

#[test]
fn test_resolve_rejects_non_components_local_pointer() {
    let err = resolve_err("#/paths/~1pets/get", None);
    assert!(matches!(err, ResolveError::UnsupportedRemoteReference { .. }));
}

#[test]
fn test_resolve_without_components_section() {
    assert!(matches!(
        resolve_err("#/components/schemas/Pet", None),
        ResolveError::ComponentsRequired { .. }
    ));
}

#[test]
fn test_resolve_missing_name_is_not_found() {
    let components = components_with(vec![]);
    assert!(matches!(
        resolve_err("#/components/schemas/Missing", Some(&components)),
        ResolveError::NotFound { .. }
    ));
}

#[test]
fn test_resolve_unknown_category_is_not_found() {
    let components = components_with(vec![]);
    assert!(matches!(
        resolve_err("#/components/bogus/Pet", Some(&components)),
        ResolveError::NotFound { .. }
    ));
}

#[test]
fn test_resolve_known_category_of_wrong_type_is_a_mismatch() {
    let components = components_with(vec![]);
    match resolve_err("#/components/responses/Pet", Some(&components)) {
        ResolveError::TypeMismatch {
            expected, found, ..
        } => {
            assert_eq!(expected, "schemas");
            assert_eq!(found, "responses");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}
