use awolan_core::{KvStore, StoreError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Probe {
    label: String,
    count: u32,
}

#[test]
fn values_survive_reopening_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("awolan.db");

    let store = KvStore::open(&path).unwrap();
    store.set("@awolan_description", "remember the roses").unwrap();
    store
        .set_json(
            "@awolan_events",
            &vec![Probe {
                label: "anniversary".to_string(),
                count: 1,
            }],
        )
        .unwrap();
    drop(store);

    let reopened = KvStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("@awolan_description").unwrap().as_deref(),
        Some("remember the roses")
    );
    let probes: Option<Vec<Probe>> = reopened.get_json("@awolan_events").unwrap();
    assert_eq!(probes.unwrap()[0].label, "anniversary");
}

#[test]
fn typed_json_roundtrip() {
    let store = KvStore::open_in_memory().unwrap();
    let probes = vec![
        Probe {
            label: "a".to_string(),
            count: 1,
        },
        Probe {
            label: "b".to_string(),
            count: 2,
        },
    ];

    store.set_json("probes", &probes).unwrap();
    assert_eq!(store.get_json::<Vec<Probe>>("probes").unwrap(), Some(probes));
    assert_eq!(store.get_json::<Vec<Probe>>("absent").unwrap(), None);
}

#[test]
fn corrupt_json_surfaces_as_an_encoding_error() {
    let store = KvStore::open_in_memory().unwrap();
    store.set("probes", "[{\"label\": oops").unwrap();

    match store.get_json::<Vec<Probe>>("probes") {
        Err(StoreError::Encoding(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}
