use jsonschema::JSONSchema;
use serde_json::json;

fn compiled_schema() -> JSONSchema {
    let schema = include_str!("../schemas/monarchs.v1.json");
    let schema_json: serde_json::Value = serde_json::from_str(schema).unwrap();
    let schema_static: &'static serde_json::Value = Box::leak(Box::new(schema_json));
    JSONSchema::options().compile(schema_static).unwrap()
}

#[test]
fn kings_fixture_is_valid() {
    let compiled = compiled_schema();
    let instance: serde_json::Value =
        serde_json::from_str(include_str!("resources/kings.json")).unwrap();
    assert!(compiled.is_valid(&instance));
}

#[test]
fn three_segment_years_are_rejected() {
    let compiled = compiled_schema();
    let mut invalid: serde_json::Value =
        serde_json::from_str(include_str!("resources/kings.json")).unwrap();
    invalid[0]["yrs"] = json!("1952-1962-1970");

    assert!(!compiled.is_valid(&invalid), "yrs pattern should fail");
}

#[test]
fn empty_name_is_rejected() {
    let compiled = compiled_schema();
    let invalid = json!([{ "id": 1, "nm": "", "cty": "United Kingdom", "hse": "House of York", "yrs": "1483" }]);
    assert!(!compiled.is_valid(&invalid));
}
