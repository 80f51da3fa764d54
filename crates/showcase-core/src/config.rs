//! Gallery configuration consumed by the presentation core.
//!
//! The document is loaded by the host page and handed over already fetched;
//! this module only parses, validates and indexes it.

use crate::constants::{CAMERA_TRANSITION_MAX_MS, CAMERA_TRANSITION_MIN_MS};
use crate::error::{Result, ShowcaseError};
use fnv::FnvHashMap;
use serde::Deserialize;

/// One showcase entry. Immutable for the session.
///
/// Fields:
/// - `id`: stable identifier, reported back in interaction/hover events
/// - `title`, `description`: display metadata, opaque to the core
/// - `asset`: reference resolved by the loading collaborator, opaque to the core
/// - `scale`: per-axis base scale applied on top of bounds normalisation
/// - `metadata`: free-form data passed through untouched
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub asset: String,
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub metadata: serde_json::Value,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Scene light levels. Only `main` reaches the core, as a multiplier on the
/// spotlight base intensity; the rest are for the rendering collaborator.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightingSettings {
    pub ambient: f32,
    pub main: f32,
    pub fill: f32,
    pub rim: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            main: 1.0,
            fill: 0.5,
            rim: 0.3,
        }
    }
}

/// Falloff and mounting of the per-model spotlights.
///
/// When `color` is absent each light gets a hue derived from its item index.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotlightSettings {
    pub color: Option<[f32; 3]>,
    pub intensity: f32,
    pub distance: f32,
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    pub height: f32,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        Self {
            color: None,
            intensity: 2.0,
            distance: 12.0,
            angle: std::f32::consts::PI / 6.0,
            penumbra: 0.5,
            decay: 1.5,
            height: 3.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub camera_distance: f32,
    pub camera_height: f32,
    pub camera_transition_ms: f32,
    pub lighting: LightingSettings,
    pub spotlight: SpotlightSettings,
    pub auto_rotate_speed: f32,
    pub auto_rotate_direction: f32,
    pub horizontal_offset: f32,
    pub mobile_breakpoint: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera_distance: 6.0,
            camera_height: 0.6,
            camera_transition_ms: 1200.0,
            lighting: LightingSettings::default(),
            spotlight: SpotlightSettings::default(),
            auto_rotate_speed: 0.4,
            auto_rotate_direction: 1.0,
            horizontal_offset: 1.6,
            mobile_breakpoint: 768.0,
        }
    }
}

impl Settings {
    /// Camera transition length clamped to the supported window.
    pub fn transition_ms(&self) -> f32 {
        self.camera_transition_ms
            .clamp(CAMERA_TRANSITION_MIN_MS, CAMERA_TRANSITION_MAX_MS)
    }

    /// Signed idle angular speed (radians per second).
    pub fn idle_speed(&self) -> f32 {
        let dir = if self.auto_rotate_direction < 0.0 { -1.0 } else { 1.0 };
        self.auto_rotate_speed.abs() * dir
    }

    /// Intensity an active item's spotlight eases toward.
    pub fn spotlight_base_intensity(&self) -> f32 {
        self.spotlight.intensity * self.lighting.main.max(0.0)
    }
}

#[derive(Deserialize)]
struct RawConfig {
    items: Vec<GalleryItem>,
    #[serde(default)]
    settings: Settings,
}

/// Ordered items plus settings, with an id index built once at load.
#[derive(Clone, Debug)]
pub struct GalleryConfig {
    pub items: Vec<GalleryItem>,
    pub settings: Settings,
    by_id: FnvHashMap<String, usize>,
}

impl GalleryConfig {
    /// Validate and index an already-parsed item list.
    pub fn new(items: Vec<GalleryItem>, settings: Settings) -> Result<Self> {
        validate_settings(&settings)?;
        let mut by_id = FnvHashMap::default();
        for (i, item) in items.iter().enumerate() {
            validate_item(item)?;
            if by_id.insert(item.id.clone(), i).is_some() {
                return Err(ShowcaseError::InvalidConfig(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }
        Ok(Self {
            items,
            settings,
            by_id,
        })
    }

    /// Parse the JSON document `{ "items": [...], "settings": {...} }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::new(raw.items, raw.settings)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

fn validate_item(item: &GalleryItem) -> Result<()> {
    if item.id.trim().is_empty() {
        return Err(ShowcaseError::InvalidConfig("item with empty id".into()));
    }
    if item.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(ShowcaseError::InvalidConfig(format!(
            "item '{}' has a non-positive scale {:?}",
            item.id, item.scale
        )));
    }
    Ok(())
}

fn validate_settings(s: &Settings) -> Result<()> {
    let non_negative = [
        ("cameraDistance", s.camera_distance),
        ("autoRotateSpeed", s.auto_rotate_speed.abs()),
        ("horizontalOffset", s.horizontal_offset),
        ("mobileBreakpoint", s.mobile_breakpoint),
        ("lighting.ambient", s.lighting.ambient),
        ("lighting.main", s.lighting.main),
        ("lighting.fill", s.lighting.fill),
        ("lighting.rim", s.lighting.rim),
        ("spotlight.intensity", s.spotlight.intensity),
        ("spotlight.distance", s.spotlight.distance),
        ("spotlight.penumbra", s.spotlight.penumbra),
        ("spotlight.decay", s.spotlight.decay),
    ];
    for (name, v) in non_negative {
        if !v.is_finite() || v < 0.0 {
            return Err(ShowcaseError::InvalidConfig(format!(
                "{name} must be a finite non-negative number, got {v}"
            )));
        }
    }
    let angle = s.spotlight.angle;
    if !(angle > 0.0 && angle <= std::f32::consts::FRAC_PI_2) {
        return Err(ShowcaseError::InvalidConfig(format!(
            "spotlight.angle must be in (0, pi/2], got {angle}"
        )));
    }
    if !s.camera_height.is_finite() || !s.camera_transition_ms.is_finite() {
        return Err(ShowcaseError::InvalidConfig(
            "camera settings must be finite".into(),
        ));
    }
    Ok(())
}
