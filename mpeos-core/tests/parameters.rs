use mpeos_core::parameter::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
struct MyPureModel {
    a: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
struct MyBinaryModel {
    b: f64,
}

const PURE_JSON: &str = r#"
    [
        {
            "identifier": {
                "cas": "123-4-5",
                "name": "foo"
            },
            "model_record": {
                "a": 0.1
            }
        },
        {
            "identifier": {
                "cas": "678-9-1",
                "name": "bar"
            },
            "model_record": {
                "a": 0.2
            }
        }
    ]
    "#;

const BINARY_JSON: &str = r#"
    [
        {
            "id1": {
                "cas": "678-9-1"
            },
            "id2": {
                "cas": "123-4-5"
            },
            "model_record": {
                "b": 12.0
            }
        }
    ]
    "#;

fn write_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("mpeos_core_{}_{name}", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn from_records() -> Result<(), ParameterError> {
    let records: Vec<PureRecord<MyPureModel>> = serde_json::from_str(PURE_JSON)?;
    let selected = PureRecord::select(&["bar", "foo"], records, IdentifierOption::Name)?;
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].identifier.cas.as_deref(), Some("678-9-1"));
    assert_eq!(selected[1].model_record, MyPureModel { a: 0.1 });
    Ok(())
}

#[test]
fn from_json() -> Result<(), ParameterError> {
    let path = write_file("pure.json", PURE_JSON);
    let records =
        PureRecord::<MyPureModel>::from_json(&["678-9-1"], &path, IdentifierOption::Cas)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].model_record.a, 0.2);
    std::fs::remove_file(path)?;
    Ok(())
}

#[test]
fn from_json_duplicates_input() {
    let records: Vec<PureRecord<MyPureModel>> = serde_json::from_str(PURE_JSON).unwrap();
    let res = PureRecord::select(&["foo", "foo"], records, IdentifierOption::Name);
    assert!(matches!(res, Err(ParameterError::IncompatibleParameters(_))));
}

#[test]
fn from_json_missing_component() {
    let records: Vec<PureRecord<MyPureModel>> = serde_json::from_str(PURE_JSON).unwrap();
    let res = PureRecord::select(&["foo", "baz", "qux"], records, IdentifierOption::Name);
    assert!(matches!(res, Err(ParameterError::ComponentsNotFound(s)) if s == "baz, qux"));
}

#[test]
fn missing_file() {
    let res = PureRecord::<MyPureModel>::from_json(
        &["foo"],
        "does/not/exist.json",
        IdentifierOption::Name,
    );
    assert!(matches!(res, Err(ParameterError::FileIO(_))));
}

#[test]
fn binary_records_correct_order() -> Result<(), ParameterError> {
    let path = write_file("binary.json", BINARY_JSON);
    let binary = BinaryRecord::<Identifier, MyBinaryModel>::from_json(&path)?;
    std::fs::remove_file(path)?;

    let records: Vec<PureRecord<MyPureModel>> = serde_json::from_str(PURE_JSON)?;
    let (foo, bar) = (&records[0].identifier, &records[1].identifier);
    let (b, order) = BinaryRecord::find_pair(&binary, foo, bar, IdentifierOption::Cas)?
        .ok_or_else(|| ParameterError::ComponentsNotFound(String::from("foo, bar")))?;
    assert_eq!(b.b, 12.0);
    assert_eq!(order, PairOrder::Reversed);

    let (_, order) = BinaryRecord::find_pair(&binary, bar, foo, IdentifierOption::Cas)?
        .ok_or_else(|| ParameterError::ComponentsNotFound(String::from("bar, foo")))?;
    assert_eq!(order, PairOrder::Forward);
    Ok(())
}

#[test]
fn binary_records_match_by_name_only_if_present() -> Result<(), ParameterError> {
    let binary: Vec<BinaryRecord<Identifier, MyBinaryModel>> = serde_json::from_str(BINARY_JSON)?;
    let records: Vec<PureRecord<MyPureModel>> = serde_json::from_str(PURE_JSON)?;
    let (foo, bar) = (&records[0].identifier, &records[1].identifier);
    assert!(BinaryRecord::find_pair(&binary, foo, bar, IdentifierOption::Name)?.is_none());
    Ok(())
}

#[test]
fn malformed_json() {
    let json = r#"[{"identifier": {"cas": "123-4-5"}, "model_record": {"c": 1.0}}]"#;
    assert!(serde_json::from_str::<Vec<PureRecord<MyPureModel>>>(json).is_err());
}
