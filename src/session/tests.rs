use super::*;
use crate::draw::{Annotation, AnnotationKind, AnnotationStore, EditorState, IconKind, Transform};
use crate::util::Point;
use serde_json::json;

fn sample_state() -> EditorState {
    let mut arrow = Annotation::icon(IconKind::Arrow, Point::new(500.0, 300.0)).with_id("arrow1");
    arrow.set_rotation(135.0);
    arrow.set_size(96.5);
    let annotations = AnnotationStore::from_annotations(vec![
        arrow,
        Annotation::text("Wet floor\nno signage", 40.0, Point::new(120.25, 80.0)).with_id("label"),
        Annotation::icon(IconKind::Injury, Point::new(-20.0, 1200.0)).with_id("offcanvas"),
    ]);
    EditorState::new(Transform::new(-37.5, 12.125, 1.75), annotations)
}

#[test]
fn round_trip_preserves_state() {
    let state = sample_state();
    let json = serialize(&state).unwrap();
    assert_eq!(deserialize(&json), state);
}

#[test]
fn round_trip_of_empty_state() {
    let state = EditorState::default();
    assert_eq!(deserialize(&serialize(&state).unwrap()), state);
}

#[test]
fn serialized_shape_is_stable() {
    let json = serialize(&sample_state()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], CURRENT_VERSION);
    assert_eq!(value["transform"]["scale"], 1.75);
    assert_eq!(
        value["annotations"][0],
        json!({
            "type": "icon",
            "id": "arrow1",
            "x": 500.0,
            "y": 300.0,
            "tool": "arrow",
            "size": 96.5,
            "rotation": 135.0
        })
    );
    assert_eq!(value["annotations"][1]["type"], "text");
    assert_eq!(value["annotations"][1]["text"], "Wet floor\nno signage");
}

#[test]
fn invalid_json_gives_default_state() {
    assert_eq!(deserialize("{not json"), EditorState::default());
    assert_eq!(deserialize("[1, 2, 3]"), EditorState::default());
    assert_eq!(deserialize(""), EditorState::default());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let state = deserialize(r#"{"annotations":[{"type":"icon","x":10,"y":20,"tool":"cross"}]}"#);
    assert_eq!(state.transform, Transform::identity());
    let annotation = &state.annotations.all()[0];
    assert!(!annotation.id.is_empty());
    assert_eq!(annotation.size(), 140.0);

    let state = deserialize(r#"{"transform":{"scale":2}}"#);
    assert_eq!(state.transform, Transform::new(0.0, 0.0, 2.0));
    assert!(state.annotations.is_empty());
}

#[test]
fn newer_version_is_loaded_best_effort() {
    let json = json!({
        "version": CURRENT_VERSION + 1,
        "transform": {"x": 5.0, "y": 6.0, "scale": 2.0},
        "annotations": [{"type": "icon", "id": "a", "x": 1.0, "y": 2.0, "tool": "cross"}],
        "layers": []
    })
    .to_string();

    let state = deserialize(&json);
    assert_eq!(state.transform, Transform::new(5.0, 6.0, 2.0));
    assert_eq!(state.annotations.len(), 1);
}

#[test]
fn malformed_annotations_are_dropped_individually() {
    let json = json!({
        "transform": {"x": 0, "y": 0, "scale": 1},
        "annotations": [
            {"type": "icon", "id": "ok", "x": 1, "y": 2, "tool": "crash"},
            {"type": "icon", "id": "bad-tool", "x": 1, "y": 2, "tool": "pencil"},
            {"type": "text", "id": "no-position", "text": "hi"},
            {"type": "ellipse", "id": "unknown", "x": 1, "y": 2},
            "garbage",
            {"type": "text", "id": "label", "x": 5, "y": 6, "text": "Exit", "size": 20}
        ]
    });
    let state = deserialize(&json.to_string());
    let ids: Vec<&str> = state.annotations.all().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["ok", "label"]);
}

#[test]
fn out_of_range_values_are_clamped() {
    let json = json!({
        "transform": {"x": 3, "y": 4, "scale": 0.001},
        "annotations": [
            {"type": "icon", "id": "big", "x": 0, "y": 0, "tool": "warning", "size": 5000, "rotation": -45},
            {"type": "text", "id": "tiny", "x": 0, "y": 0, "text": "a", "size": 1}
        ]
    });
    let state = deserialize(&json.to_string());
    assert_eq!(state.transform.scale, 0.1);

    match state.annotations.find("big").unwrap().kind {
        AnnotationKind::Icon { size, rotation, .. } => {
            assert_eq!(size, 220.0);
            assert_eq!(rotation, 315.0);
        }
        _ => panic!("expected icon"),
    }
    assert_eq!(state.annotations.find("tiny").unwrap().size(), 14.0);
}

#[test]
fn duplicate_ids_are_regenerated() {
    let json = json!({
        "annotations": [
            {"type": "icon", "id": "same", "x": 0, "y": 0, "tool": "arrow"},
            {"type": "icon", "id": "same", "x": 9, "y": 9, "tool": "circle"}
        ]
    });
    let state = deserialize(&json.to_string());
    let all = state.annotations.all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "same");
    assert_ne!(all[1].id, "same");
}

#[test]
fn deserialize_or_fit_uses_cover_fit_without_state() {
    let state = deserialize_or_fit(None, Some((800.0, 600.0)));
    assert_eq!(state.transform, Transform::new(0.0, -180.0, 2.4));
    assert!(state.annotations.is_empty());

    let state = deserialize_or_fit(Some("  "), None);
    assert_eq!(state, EditorState::default());
}

#[test]
fn deserialize_or_fit_keeps_stored_transform() {
    let stored = sample_state();
    let json = serialize(&stored).unwrap();
    assert_eq!(deserialize_or_fit(Some(&json), Some((800.0, 600.0))), stored);

    // Annotations survive even when the transform has to be refitted
    let partial = r#"{"annotations":[{"type":"icon","id":"a","x":1,"y":1,"tool":"arrow"}]}"#;
    let state = deserialize_or_fit(Some(partial), Some((800.0, 600.0)));
    assert_eq!(state.transform.scale, 2.4);
    assert!(state.annotations.contains("a"));
}

#[test]
fn state_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");
    let state = sample_state();

    save_state_file(&path, &state).unwrap();
    assert_eq!(load_state_file(&path, None).unwrap(), state);
    assert!(!dir.path().join("nested").join("state.json.tmp").exists());
}

#[test]
fn missing_state_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let state = load_state_file(&dir.path().join("absent.json"), Some((1920.0, 1080.0))).unwrap();
    assert_eq!(state.transform, Transform::identity());
    assert!(state.annotations.is_empty());
}
