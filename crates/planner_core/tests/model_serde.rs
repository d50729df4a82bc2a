use planner_core::fixtures::{AMAZING_GRACE_BLOCK, SUNDAY_MORNING};
use planner_core::{MusicalKey, PlannerStore, ReferencePolicy, Service, Song};
use serde_json::{json, Value};

#[test]
fn service_wire_shape_uses_type_and_hh_mm() {
    let store = PlannerStore::with_fixtures(ReferencePolicy::Retain).unwrap();
    let service = store.service(SUNDAY_MORNING).unwrap();

    let value = serde_json::to_value(service).unwrap();
    assert_eq!(value["date"], json!("2024-01-21"));
    assert_eq!(value["time"], json!("10:00"));
    assert_eq!(value["team_id"], Value::Null);

    let block = &value["blocks"][1];
    assert_eq!(block["id"], json!(AMAZING_GRACE_BLOCK.to_string()));
    assert_eq!(block["type"], json!("song"));
    assert_eq!(block["order"], json!(2));
    assert_eq!(block["assignments"][0]["role"], json!("Vocals"));

    let back: Service = serde_json::from_value(value).unwrap();
    assert_eq!(&back, service);
}

#[test]
fn sharp_keys_serialize_with_hash_sign() {
    assert_eq!(serde_json::to_value(MusicalKey::CSharp).unwrap(), json!("C#"));
    let key: MusicalKey = serde_json::from_value(json!("F#")).unwrap();
    assert_eq!(key, MusicalKey::FSharp);
    assert!(serde_json::from_value::<MusicalKey>(json!("Db")).is_err());
}

#[test]
fn malformed_time_is_rejected_on_decode() {
    let store = PlannerStore::with_fixtures(ReferencePolicy::Retain).unwrap();
    let mut value = serde_json::to_value(store.service(SUNDAY_MORNING).unwrap()).unwrap();
    value["time"] = json!("10am");

    assert!(serde_json::from_value::<Service>(value).is_err());
}

#[test]
fn song_optional_fields_decode_as_none() {
    let song: Song = serde_json::from_value(json!({
        "id": "7f1d9a8c-2b3e-4f5a-9c6d-0e1f2a3b4c5d",
        "title": "Goodness of God",
        "authors": ["Ed Cash"],
        "key": "A#",
        "tempo": null,
        "lyrics": null,
        "copyright": null,
        "arrangements": []
    }))
    .unwrap();

    assert_eq!(song.key, MusicalKey::ASharp);
    assert_eq!(song.tempo, None);
}
