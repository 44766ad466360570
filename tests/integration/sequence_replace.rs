//! Sequences are replaced wholesale, never merged element-wise

use super::test_utils::StateDir;
use persist::Store;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CustomStruct {
    id: i64,
}

#[test]
fn test_saved_sequence_loads_into_empty_default() {
    let dir = StateDir::new("slice.teststate.json");

    {
        let mut st: Vec<CustomStruct> = Vec::new();
        let store = Store::new(dir.path(), &mut st).unwrap();
        store.lock().push(CustomStruct { id: 1 });
        store.lock().push(CustomStruct { id: 2 });
        store.save().unwrap();
    }

    let mut st: Vec<CustomStruct> = Vec::new();
    Store::new(dir.path(), &mut st).unwrap();

    assert_eq!(st, vec![CustomStruct { id: 1 }, CustomStruct { id: 2 }]);
    assert_eq!(dir.read().matches("\"Id\"").count(), 2);
}

#[test]
fn test_non_empty_default_sequence_is_replaced() {
    let dir = StateDir::new("state.json");
    dir.write(r#"[{"Id": 7}]"#);

    let mut st = vec![
        CustomStruct { id: 1 },
        CustomStruct { id: 2 },
        CustomStruct { id: 3 },
    ];
    Store::open(dir.path(), &mut st).unwrap();

    assert_eq!(st, vec![CustomStruct { id: 7 }]);
}

#[test]
fn test_empty_persisted_sequence_clears_default() {
    let dir = StateDir::new("state.json");
    dir.write("[]");

    let mut st = vec![CustomStruct { id: 1 }];
    Store::open(dir.path(), &mut st).unwrap();

    assert!(st.is_empty());
}
