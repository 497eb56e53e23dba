use pretty_assertions::assert_eq;
use serde_json::json;
use squirrel_trace_explorer::parser::{decode, ObjectArena, RefState, Value};
use squirrel_trace_explorer::utils::ParseError;

#[test]
fn test_decode_scalars() {
    assert_eq!(decode(&json!(null)).unwrap(), Value::Null);
    assert_eq!(decode(&json!(true)).unwrap(), Value::Bool(true));
    assert_eq!(decode(&json!(-12)).unwrap(), Value::Int(-12));
    assert_eq!(decode(&json!("abc")).unwrap(), Value::Str("abc".to_string()));
}

#[test]
fn test_decode_float_narrows_to_f32() {
    let value = decode(&json!(0.1)).unwrap();
    assert_eq!(value, Value::Float(0.1_f32));
    assert_eq!(value.render(&ObjectArena::new()), "0.1");
}

#[test]
fn test_decode_address_token() {
    let value = decode(&json!("POINTER:00C0FFEE")).unwrap();
    let reference = value.as_reference().unwrap();
    assert_eq!(reference.address(), 0x00C0_FFEE);
    assert_eq!(reference.state(), RefState::Unresolved);
}

#[test]
fn test_decode_malformed_address_token_fails() {
    for token in ["POINTER:123", "POINTER:0000000Z", "POINTER:000000001"] {
        let err = decode(&json!([1, {"x": token}])).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress(_)), "{}", token);
    }
}

#[test]
fn test_decode_object_extracts_declared_type() {
    let value = decode(&json!({"ObjectType": "SQClosure", "_function": "POINTER:00000010"})).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.declared_type(), Some("SQClosure"));
    assert_eq!(object.len(), 1);
    assert!(object.get("ObjectType").is_none());
    assert!(object.get("_function").unwrap().as_reference().is_some());
}

#[test]
fn test_decode_object_without_type_is_unknown() {
    let arena = ObjectArena::new();
    let value = decode(&json!({"a": 1})).unwrap();

    assert_eq!(value.as_object().unwrap().declared_type(), None);
    assert_eq!(value.label(&arena), "Unknown type");
    assert_eq!(value.render(&arena), "{...}");
}

#[test]
fn test_decode_sqtable_becomes_hash_table() {
    let arena = ObjectArena::new();
    let value = decode(&json!({"ObjectType": "SQTable", "_nodes": []})).unwrap();

    assert!(matches!(value, Value::HashTable(_)));
    assert_eq!(value.label(&arena), "SQTable");
    assert_eq!(value.render(&arena), "{...}");
}

#[test]
fn test_decode_address_keys_become_references() {
    let value = decode(&json!({"POINTER:00000001": 5, "name": 6})).unwrap();
    let object = value.as_object().unwrap();

    assert!(object.fields()[0].0.as_reference().is_some());
    assert_eq!(object.get("name"), Some(&Value::Int(6)));
}

#[test]
fn test_decode_array_preserves_order() {
    let value = decode(&json!([3, "b", null])).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Value::Int(3), Value::Str("b".to_string()), Value::Null])
    );
}
