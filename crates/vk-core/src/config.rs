//! Persistent overlay configuration and the store it is saved through.

use crate::catalog::TemplateCatalog;
use crate::color::Argb;
use crate::id::GroupId;
use crate::model::{ColorOverrides, ColorTarget, Palette, Unit, UnitHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const MIN_SNAP_THRESHOLD: i32 = 1;
pub const MAX_SNAP_THRESHOLD: i32 = 20;

/// Snapping switches, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    pub snapping_enabled: bool,
    pub guides_enabled: bool,
    pub distance_labels_enabled: bool,
    pub threshold: i32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            snapping_enabled: true,
            guides_enabled: true,
            distance_labels_enabled: true,
            threshold: 6,
        }
    }
}

impl SnapSettings {
    /// Threshold used by the snapping engine, never below 1.
    pub fn effective_threshold(&self) -> i32 {
        self.threshold.max(MIN_SNAP_THRESHOLD)
    }

    /// Step the threshold, staying within `1..=20`.
    pub fn adjust_threshold(&mut self, delta: i32) {
        self.threshold = (self.threshold + delta).clamp(MIN_SNAP_THRESHOLD, MAX_SNAP_THRESHOLD);
    }

    /// No engine work is needed when every switch is off.
    pub fn any_enabled(&self) -> bool {
        self.snapping_enabled || self.guides_enabled || self.distance_labels_enabled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub offset_x: i32,
    pub offset_y: i32,
    pub scale: f32,
    pub palette: Palette,
    /// Group-level overrides, consulted between unit overrides and the palette.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub group_palettes: HashMap<GroupId, ColorOverrides>,
    pub snap: SnapSettings,
    pub units: Vec<Unit>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            offset_x: 5,
            offset_y: 5,
            scale: 1.0,
            palette: Palette::default(),
            group_palettes: HashMap::new(),
            snap: SnapSettings::default(),
            units: TemplateCatalog::builtin().default_layout(),
        }
    }
}

impl OverlayConfig {
    pub fn unit(&self, h: UnitHandle) -> Option<&Unit> {
        self.units.get(h.0)
    }

    pub fn unit_mut(&mut self, h: UnitHandle) -> Option<&mut Unit> {
        self.units.get_mut(h.0)
    }

    /// `unit override ?? group override ?? palette`.
    pub fn resolve_color(&self, unit: &Unit, target: ColorTarget) -> Argb {
        unit.colors
            .get(target)
            .or_else(|| self.group_palettes.get(&unit.group).and_then(|o| o.get(target)))
            .unwrap_or_else(|| self.palette.get(target))
    }

    pub fn has_group(&self, id: GroupId) -> bool {
        self.units.iter().any(|u| u.group == id)
    }

    /// Restore the default unit layout. Palette, transform and snap settings
    /// are kept.
    pub fn reset_layout(&mut self) {
        self.units = TemplateCatalog::builtin().default_layout();
        self.group_palettes.clear();
    }
}

/// Opaque persistence boundary. Every committing edit calls `save` once.
pub trait ConfigStore {
    fn load(&mut self) -> Result<OverlayConfig, String>;
    fn save(&mut self, config: &OverlayConfig) -> Result<(), String>;
}

// ─── In-memory store ─────────────────────────────────────────────────────

/// Keeps the last saved config in memory and counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<OverlayConfig>,
    saves: usize,
    fail_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        Self {
            saved: Some(config),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    pub fn saved(&self) -> Option<&OverlayConfig> {
        self.saved.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ConfigStore for MemoryStore {
    fn load(&mut self) -> Result<OverlayConfig, String> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, config: &OverlayConfig) -> Result<(), String> {
        if let Some(msg) = &self.fail_with {
            return Err(msg.clone());
        }
        self.saves += 1;
        self.saved = Some(config.clone());
        Ok(())
    }
}

// ─── JSON file store ─────────────────────────────────────────────────────

/// Pretty-printed JSON on disk. A missing file loads as the default config.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&mut self) -> Result<OverlayConfig, String> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", self.path.display());
                return Ok(OverlayConfig::default());
            }
            Err(e) => return Err(format!("read {}: {e}", self.path.display())),
        };
        serde_json::from_str(&text).map_err(|e| format!("parse {}: {e}", self.path.display()))
    }

    fn save(&mut self, config: &OverlayConfig) -> Result<(), String> {
        let json = serde_json::to_string_pretty(config).map_err(|e| format!("serialize config: {e}"))?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
        }
        std::fs::write(&self.path, json).map_err(|e| format!("write {}: {e}", self.path.display()))
    }
}
