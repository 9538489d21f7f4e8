//! Store and normalization tests
//!
//! Exercises the request adapters together with the file store, the way the
//! tag service uses them.

use geotag::storage::TagStore;
use geotag::tag::{CanonicalTagRequest, LegacyForm, LegacyTagRequest, Tag};
use geotag::{GeotagError, TagError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn temp_store() -> (TempDir, TagStore) {
    let dir = TempDir::new().unwrap();
    let store = TagStore::open(dir.path().join("tags.json"));
    (dir, store)
}

#[test]
fn test_canonical_submission_round_trips_through_file() {
    let (_dir, store) = temp_store();

    let parsed = CanonicalTagRequest::from_json(&json!({
        "lat": 51.5,
        "lng": -0.12,
        "text": "  Hello London ",
        "userId": "  example-user  "
    }))
    .unwrap();
    let stored = store.append(parsed).unwrap();

    let tags = store.load();
    assert_eq!(tags, vec![stored.clone()]);
    assert_eq!(stored.lat, 51.5);
    assert_eq!(stored.lng, -0.12);
    assert_eq!(stored.text, "Hello London");
    assert_eq!(stored.user_id.as_deref(), Some("example-user"));
    assert!(stored.timestamp > 0);
}

#[test]
fn test_file_is_a_pretty_printed_array() {
    let (_dir, store) = temp_store();
    store
        .append(CanonicalTagRequest::from_json(&json!({"lat": 1, "lng": 2, "text": "a"})).unwrap())
        .unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains('\n'), "store should be pretty-printed");

    let value: Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["userId"], json!("anonymous"));
}

#[test]
fn test_rejected_submission_leaves_store_untouched() {
    let (_dir, store) = temp_store();
    store
        .append(CanonicalTagRequest::from_json(&json!({"lat": 1, "lng": 2, "text": "keep"})).unwrap())
        .unwrap();
    let before = std::fs::read(store.path()).unwrap();

    for body in [
        json!({"lat": "not-a-number", "lng": 0, "text": "x"}),
        json!({"lat": 0, "lng": 0, "text": "  "}),
        json!({"lat": 0, "text": "x"}),
    ] {
        assert_eq!(
            CanonicalTagRequest::from_json(&body),
            Err(TagError::InvalidTagData)
        );
    }

    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_legacy_form_and_canonical_share_schema() {
    let (_dir, store) = temp_store();

    let mut form = LegacyForm::default();
    form.set("latitude", "10.25".into());
    form.set("longitude", "-20.75".into());
    form.set("file", "Legacy text sample".into());
    form.set("userId", " legacy-user ".into());
    store.append(LegacyTagRequest::from_form(&form).unwrap()).unwrap();

    store
        .append(
            LegacyTagRequest::from_json(&json!({"lat": 3, "longitude": 4, "text": "json"}))
                .unwrap(),
        )
        .unwrap();

    let tags = store.load();
    assert_eq!(tags.len(), 2);
    assert_eq!(
        (tags[0].lat, tags[0].lng, tags[0].text.as_str()),
        (10.25, -20.75, "Legacy text sample")
    );
    assert_eq!(tags[0].user_id.as_deref(), Some("legacy-user"));
    assert_eq!((tags[1].lat, tags[1].lng), (3.0, 4.0));
}

#[test]
fn test_records_without_user_id_still_load() {
    let (_dir, store) = temp_store();
    std::fs::write(
        store.path(),
        r#"[{"lat": 1.0, "lng": 2.0, "text": "old", "timestamp": 1700000000000}]"#,
    )
    .unwrap();

    let tags = store.load();
    assert_eq!(
        tags,
        vec![Tag {
            lat: 1.0,
            lng: 2.0,
            text: "old".to_string(),
            user_id: None,
            timestamp: 1_700_000_000_000,
        }]
    );
}

#[test]
fn test_corrupt_file_is_replaced_by_next_write() {
    let (_dir, store) = temp_store();
    std::fs::write(store.path(), "{ this is not json").unwrap();
    assert!(store.load().is_empty());

    store
        .append(CanonicalTagRequest::from_json(&json!({"lat": 1, "lng": 2, "text": "fresh"})).unwrap())
        .unwrap();

    let tags = store.load();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].text, "fresh");
}

#[test]
fn test_clear_writes_empty_array() {
    let (_dir, store) = temp_store();
    store
        .append(CanonicalTagRequest::from_json(&json!({"lat": 1, "lng": 2, "text": "x"})).unwrap())
        .unwrap();

    store.clear().unwrap();
    assert!(store.load().is_empty());
    let value: Value = serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
    assert_eq!(value, json!([]));
}

#[test]
fn test_write_failure_surfaces_io_error() {
    let dir = TempDir::new().unwrap();
    let store = TagStore::open(dir.path().join("missing-dir").join("tags.json"));

    let result = store.append(
        CanonicalTagRequest::from_json(&json!({"lat": 1, "lng": 2, "text": "x"})).unwrap(),
    );
    assert!(matches!(result, Err(GeotagError::Io(_))));
}

#[test]
fn test_concurrent_appends_are_not_lost() {
    let (_dir, store) = temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..10 {
                    let body = json!({
                        "lat": worker,
                        "lng": i,
                        "text": format!("worker {} tag {}", worker, i),
                        "userId": format!("worker-{}", worker)
                    });
                    store
                        .append(CanonicalTagRequest::from_json(&body).unwrap())
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let tags = store.load();
    assert_eq!(tags.len(), 80);

    // Each worker's tags keep their relative order.
    for worker in 0..8 {
        let own: Vec<f64> = tags
            .iter()
            .filter(|t| t.lat == worker as f64)
            .map(|t| t.lng)
            .collect();
        assert_eq!(own, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }
}
