use satls_utils::{dejsonify, jsonify};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    trial_id: usize,
    best: u32,
    trace: Vec<u32>,
}

#[test]
fn test_jsonify_sorts_keys() {
    let value = json!({"b": 1, "a": {"d": 2, "c": 3}, "e": [{"z": 0, "y": 1}]});
    assert_eq!(
        jsonify(&value).unwrap(),
        r#"{"a":{"c":3,"d":2},"b":1,"e":[{"y":1,"z":0}]}"#
    );
}

#[test]
fn test_dejsonify_roundtrip() {
    let record = Record {
        trial_id: 3,
        best: 12,
        trace: vec![40, 20, 12],
    };
    let text = jsonify(&record).unwrap();
    assert_eq!(text, r#"{"best":12,"trace":[40,20,12],"trial_id":3}"#);
    assert_eq!(dejsonify::<Record>(&text).unwrap(), record);
    assert!(dejsonify::<Value>("{not json").is_err());
}
