//! Integration tests: the on-disk config format (vk-core).
//!
//! Hand-written files must keep loading as fields are added, and the
//! default workspace must come back from a missing file.

use pretty_assertions::assert_eq;
use vk_core::{
    Argb, Bounds, ConfigStore, GroupId, InputSource, JsonFileStore, MouseButton, OverlayConfig, SnapSettings,
    build_groups,
};

fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("vk-core-it-{}", std::process::id()))
        .join(name)
}

// ─── Parsing ────────────────────────────────────────────────────────────

#[test]
fn sparse_file_fills_defaults() {
    let json = r#"{
        "offset_x": 12,
        "units": [
            { "label": "W", "source": { "key": 87 }, "x": 28, "y": 0, "width": 24, "height": 24, "group": "wasd" },
            { "label": "LMB", "source": { "mouse": "left" }, "x": 0, "y": 84, "width": 32, "height": 32 }
        ]
    }"#;
    let config: OverlayConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.offset_x, 12);
    assert_eq!(config.offset_y, 5);
    assert_eq!(config.scale, 1.0);
    assert_eq!(config.snap, SnapSettings::default());
    assert_eq!(config.units.len(), 2);
    assert!(config.units.iter().all(|u| u.visible));
    assert_eq!(config.units[0].source, InputSource::Key(87));
    assert_eq!(config.units[0].group, GroupId::intern("wasd"));
    assert_eq!(config.units[1].source, InputSource::Mouse(MouseButton::Left));
    assert_eq!(config.units[1].group, GroupId::ungrouped());
}

#[test]
fn overrides_are_written_only_when_set() {
    let mut config = OverlayConfig::default();
    config.units.truncate(2);
    config.units[1].colors.fill = Some(Argb(0xFF33_99FF));
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json.matches("\"colors\"").count(), 1);
    assert!(!json.contains("group_palettes"));

    let back: OverlayConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.units[1].colors.fill, Some(Argb(0xFF33_99FF)));
    assert!(back.units[0].colors.is_empty());
}

// ─── File store ─────────────────────────────────────────────────────────

#[test]
fn missing_file_loads_default_workspace() {
    let mut store = JsonFileStore::new(scratch_path("missing/overlay.json"));
    let config = store.load().unwrap();
    let groups = build_groups(&config.units);
    let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["wasd", "space", "lmb", "rmb", "cps"]);
    assert_eq!(groups[1].bounds(&config.units), Bounds::new(0, 56, 80, 24));
}

#[test]
fn malformed_file_is_an_error() {
    let path = scratch_path("broken.json");
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).unwrap();
    }
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(path.clone()).load().unwrap_err();
    assert!(err.starts_with("parse "), "unexpected error: {err}");
    let _ = std::fs::remove_file(&path);
}
