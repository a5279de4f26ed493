use oas_core::scalars::{BoolOrSchema, SingleOrArray};
use oas_core::schema::Schema;

#[test]
fn test_bool_or_schema_decodes_booleans() {
    let allowed: BoolOrSchema = serde_json::from_value(serde_json::json!(true)).unwrap();
    assert!(allowed.is_allowed());
    assert!(allowed.schema().is_none());

    let forbidden: BoolOrSchema = serde_json::from_value(serde_json::json!(false)).unwrap();
    assert!(!forbidden.is_allowed());
}

#[test]
fn test_bool_or_schema_decodes_nested_schema() {
    let v: BoolOrSchema =
        serde_json::from_value(serde_json::json!({"type": "string"})).unwrap();
    assert!(v.is_allowed());
    assert!(v.schema().is_some());
}

#[test]
fn test_bool_or_schema_round_trips_each_shape() {
    for data in [
        serde_json::json!(false),
        serde_json::json!({"$ref": "#/components/schemas/Pet"}),
    ] {
        let v: BoolOrSchema = serde_json::from_value(data.clone()).unwrap();
        assert_eq!(serde_json::to_value(&v).unwrap(), data);
    }
}

#[test]
fn test_explicit_false_is_distinct_from_absent() {
    let with_flag: Schema =
        serde_json::from_value(serde_json::json!({"additionalProperties": false})).unwrap();
    assert!(!with_flag
        .additional_properties
        .as_ref()
        .expect("flag kept")
        .is_allowed());
    assert_eq!(
        serde_json::to_value(&with_flag).unwrap(),
        serde_json::json!({"additionalProperties": false})
    );

    let without: Schema = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(without.additional_properties.is_none());
}

#[test]
fn test_single_or_array_decodes_both_shapes() {
    let single: SingleOrArray<String> =
        serde_json::from_value(serde_json::json!("string")).unwrap();
    assert_eq!(*single, vec!["string".to_string()]);

    let many: SingleOrArray<String> =
        serde_json::from_value(serde_json::json!(["string", "null"])).unwrap();
    assert_eq!(many.len(), 2);
}

#[test]
fn test_single_or_array_encodes_one_element_as_scalar() {
    let single = SingleOrArray::from("string".to_string());
    assert_eq!(serde_json::to_value(&single).unwrap(), serde_json::json!("string"));

    let many: SingleOrArray<String> =
        SingleOrArray::from(vec!["string".to_string(), "null".to_string()]);
    assert_eq!(
        serde_json::to_value(&many).unwrap(),
        serde_json::json!(["string", "null"])
    );

    let empty = SingleOrArray::<String>::new();
    assert_eq!(serde_json::to_value(&empty).unwrap(), serde_json::json!([]));
}

#[test]
fn test_schema_type_uses_single_or_array() {
    let v: Schema = serde_json::from_value(serde_json::json!({"type": "string"})).unwrap();
    assert_eq!(
        serde_json::to_value(&v).unwrap(),
        serde_json::json!({"type": "string"})
    );

    let v: Schema =
        serde_json::from_value(serde_json::json!({"type": ["string", "null"]})).unwrap();
    assert_eq!(v.schema_type.unwrap().len(), 2);
}
