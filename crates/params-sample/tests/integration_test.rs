use params_sample::model::{PersonParams, ProfileParams};
use plain_params::{fields, ParamsError, Value};
use serde_json::json;

// --- Construction ---

#[test]
fn test_creates_instance_with_valid_parameters() {
    let mut params = ProfileParams::new(fields! { name: "John", age: 30 }).unwrap();
    assert!(params.is_valid());
    assert_eq!(params.name(), "John");
    assert_eq!(params.age(), 30);
}

#[test]
fn test_rejects_invalid_fields() {
    let err = ProfileParams::new(fields! { invalid_field: "value" }).unwrap_err();
    assert!(matches!(
        err,
        ParamsError::UnknownField { ref field, .. } if field == "invalid_field"
    ));
}

#[test]
fn test_accepts_string_keys() {
    let params = ProfileParams::new(fields! { "name": "John", "age": 25 }).unwrap();
    assert_eq!(params.name(), "John");
    assert_eq!(params.age(), 25);
}

// --- Validation ---

#[test]
fn test_validates_presence_of_real_fields() {
    let mut params = ProfileParams::new(fields! { name: "John" }).unwrap();
    assert!(!params.is_valid());
    assert!(params.errors().get("age").iter().any(|m| m == "can't be blank"));
}

#[test]
fn test_redeclared_presence_reports_once() {
    let mut params = PersonParams::new(fields! {}).unwrap();
    assert!(!params.is_valid());
    assert_eq!(params.errors().get("name"), ["can't be blank"]);
    assert_eq!(params.errors().get("age"), ["can't be blank"]);
    assert_eq!(
        params.errors().full_messages(),
        ["Name can't be blank", "Age can't be blank"]
    );
}

// --- Values ---

#[test]
fn test_values_returns_real_and_virtual() {
    let params = ProfileParams::new(fields! { name: "John", age: 30 }).unwrap();
    let values = params.values();
    assert_eq!(Value::Object(values.real), json!({ "name": "John", "age": 30 }));
    assert_eq!(
        Value::Object(values.r#virtual),
        json!({
            "age_in_days": 10950,
            "full_description": "John is 30 years old",
            "nickname": null
        })
    );
}

#[test]
fn test_real_and_virtual_partitions() {
    let params = ProfileParams::new(fields! { name: "John", age: 30, nickname: "JJ" }).unwrap();
    assert_eq!(Value::Object(params.real_values()), json!({ "name": "John", "age": 30 }));
    assert_eq!(params.virtual_values()["nickname"], "JJ");
    assert_eq!(params.virtual_values()["age_in_days"], 10950);
}

#[test]
fn test_never_persisted() {
    let params = ProfileParams::new(fields! { name: "John", age: 30 }).unwrap();
    assert!(!params.is_persisted());
}

// --- Virtual fields ---

#[test]
fn test_derived_fields_ignore_direct_values() {
    let params = ProfileParams::new(fields! { name: "John", age: 30, age_in_days: 100 }).unwrap();
    assert_eq!(params.age_in_days(), 10950);
}

#[test]
fn test_derived_fields_use_real_fields() {
    let params = ProfileParams::new(fields! { name: "Jane", age: 25 }).unwrap();
    assert_eq!(params.age_in_days(), 9125);
    assert_eq!(params.full_description(), "Jane is 25 years old");
}

#[test]
fn test_derived_fields_without_prerequisites_are_null() {
    let params = ProfileParams::new(fields! { name: "Jane" }).unwrap();
    assert_eq!(params.age_in_days(), Value::Null);
    assert_eq!(params.full_description(), Value::Null);
}

#[test]
fn test_derived_fields_handle_fractional_ages() {
    let params = ProfileParams::new(fields! { name: "Jane", age: 2.5 }).unwrap();
    assert_eq!(params.age_in_days(), 912.5);
    assert_eq!(params.full_description(), "Jane is 2.5 years old");
}

#[test]
fn test_derived_fields_are_null_when_out_of_range() {
    let params = ProfileParams::new(fields! { name: "Max", age: i64::MAX }).unwrap();
    assert_eq!(params.age_in_days(), Value::Null);
    assert_eq!(params.values().r#virtual["age_in_days"], Value::Null);
    assert_eq!(params.age(), i64::MAX);
}

#[test]
fn test_stored_virtual_field_is_settable() {
    let mut params = ProfileParams::new(fields! { name: "Jane", age: 25 }).unwrap();
    assert_eq!(params.nickname(), Value::Null);
    params.set_nickname("JJ");
    assert_eq!(params.nickname(), "JJ");
    assert!(params.is_valid());
}

// --- Model compatibility ---

#[test]
fn test_model_naming() {
    let params = ProfileParams::new(fields! { name: "John", age: 30 }).unwrap();
    assert_eq!(params.model_name().name(), "ProfileParams");
    assert_eq!(params.model_name().param_key(), "profile_params");
}

#[test]
fn test_conversion_methods() {
    let params = ProfileParams::new(fields! { name: "John", age: 30 }).unwrap();
    assert_eq!(params.to_key(), None);
    assert_eq!(params.to_param(), None);
    assert_eq!(params.to_model().values(), params.values());
}
