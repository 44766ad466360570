//! Mapping merge: persisted entries win, default-only entries survive

use super::test_utils::StateDir;
use persist::Store;
use std::collections::HashMap;

fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_absent_file_keeps_defaults() {
    let dir = StateDir::new("teststate.json");
    let mut m = map(&[("foo", "bar")]);

    let store = Store::new(dir.path(), &mut m).unwrap();
    drop(store);

    assert_eq!(m, map(&[("foo", "bar")]));
    assert!(!dir.path().exists());
}

#[test]
fn test_saved_mapping_merges_onto_new_defaults() {
    let dir = StateDir::new("teststate.json");

    let mut m = map(&[("foo", "bar")]);
    {
        let store = Store::new(dir.path(), &mut m).unwrap();
        {
            let mut value = store.lock();
            value.insert("bar".to_string(), "foo".to_string());
            value.insert("foo".to_string(), "bar2".to_string());
        }
        store.save().unwrap();
    }

    let mut m = map(&[("foo", "bar"), ("qwe", "asd")]);
    Store::new(dir.path(), &mut m).unwrap();

    assert_eq!(m.len(), 3);
    assert_eq!(m["foo"], "bar2");
    assert_eq!(m["bar"], "foo");
    assert_eq!(m["qwe"], "asd");
}

#[test]
fn test_persisted_mapping_onto_single_key_default() {
    let dir = StateDir::new("state.json");
    dir.write(r#"{"bar":"foo","foo":"bar2"}"#);

    let mut m = map(&[("foo", "bar")]);
    Store::open(dir.path(), &mut m).unwrap();

    assert_eq!(m, map(&[("foo", "bar2"), ("bar", "foo")]));
}

#[test]
fn test_nested_mapping_values_merge_per_key() {
    let dir = StateDir::new("state.json");
    dir.write(r#"{"alice": {"role": "admin"}, "carol": {"role": "guest"}}"#);

    let mut users: HashMap<String, HashMap<String, String>> = HashMap::from([
        (
            "alice".to_string(),
            map(&[("role", "user"), ("lang", "en")]),
        ),
        ("bob".to_string(), map(&[("role", "user")])),
    ]);
    Store::open(dir.path(), &mut users).unwrap();

    assert_eq!(users["alice"], map(&[("role", "admin"), ("lang", "en")]));
    assert_eq!(users["bob"], map(&[("role", "user")]));
    assert_eq!(users["carol"], map(&[("role", "guest")]));
}

#[test]
fn test_mapping_of_sequences_replaces_each_sequence() {
    let dir = StateDir::new("state.json");
    dir.write(r#"{"admins": ["root"]}"#);

    let mut lists: HashMap<String, Vec<String>> = HashMap::from([
        ("admins".to_string(), vec!["alice".to_string(), "bob".to_string()]),
        ("muted".to_string(), vec!["spam".to_string()]),
    ]);
    Store::open(dir.path(), &mut lists).unwrap();

    assert_eq!(lists["admins"], vec!["root".to_string()]);
    assert_eq!(lists["muted"], vec!["spam".to_string()]);
}

#[test]
fn test_integer_keyed_mapping_round_trips() {
    let dir = StateDir::new("state.json");

    let mut scores: HashMap<u64, u32> = HashMap::from([(1, 10), (2, 20)]);
    Store::open(dir.path(), &mut scores).unwrap().save().unwrap();

    let mut reloaded: HashMap<u64, u32> = HashMap::from([(3, 30)]);
    Store::open(dir.path(), &mut reloaded).unwrap();
    assert_eq!(reloaded, HashMap::from([(1, 10), (2, 20), (3, 30)]));
}
