//! Save followed by a fresh open reproduces the saved value

use persist::{Store, StoreOptions};
use proptest::prelude::*;
use std::collections::HashMap;
use tempfile::TempDir;

fn reload<T>(path: &std::path::Path) -> T
where
    T: Default + serde::Serialize + serde::de::DeserializeOwned,
{
    let mut fresh = T::default();
    Store::open(path, &mut fresh).unwrap();
    fresh
}

proptest! {
    #[test]
    fn test_mapping_round_trip(value in prop::collection::hash_map(".*", any::<i64>(), 0..16), pretty in any::<bool>()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut bound = value.clone();
        let options = StoreOptions::default().pretty(pretty).sync(false);
        Store::open_with(&path, &mut bound, options).unwrap().save().unwrap();

        let reloaded: HashMap<String, i64> = reload(&path);
        prop_assert_eq!(reloaded, value);
    }

    #[test]
    fn test_sequence_round_trip(value in prop::collection::vec((any::<u32>(), ".{0,8}"), 0..16)) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut bound = value.clone();
        Store::open_with(&path, &mut bound, StoreOptions::default().sync(false))
            .unwrap()
            .save()
            .unwrap();

        let reloaded: Vec<(u32, String)> = reload(&path);
        prop_assert_eq!(reloaded, value);
    }

    #[test]
    fn test_nested_round_trip(
        value in prop::collection::btree_map("[a-z]{1,4}", prop::collection::vec(any::<bool>(), 0..4), 0..8)
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut bound = value.clone();
        Store::open_with(&path, &mut bound, StoreOptions::default().sync(false))
            .unwrap()
            .save()
            .unwrap();

        let reloaded: std::collections::BTreeMap<String, Vec<bool>> = reload(&path);
        prop_assert_eq!(reloaded, value);
    }
}
