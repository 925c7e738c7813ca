use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 800.0,
            title: "Circle Merge".into(),
            auto_close: 0.0,
        }
    }
}

/// Logical play field. Width is fixed; height follows the window aspect ratio.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub logical_width: f32,
    /// Used when no primary window exists (headless runs, tests).
    pub fallback_height: f32,
    pub ground_height: f32,
    pub wall_thickness: f32,
}
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            logical_width: 750.0,
            fallback_height: 1334.0,
            ground_height: 120.0,
            wall_thickness: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LadderConfig {
    pub radii: Vec<f32>,
    /// Number of leading tiers eligible for spawning.
    pub spawnable: usize,
}
impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            radii: vec![
                26.0, 40.0, 54.0, 59.0, 76.0, 92.0, 97.0, 129.0, 154.0, 155.0, 204.0,
            ],
            spawnable: 6,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Gap between the top edge and the top of a freshly spawned circle.
    pub top_margin: f32,
    pub respawn_delay_secs: f32,
    pub seed: Option<u64>,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            top_margin: 30.0,
            respawn_delay_secs: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub pixels_per_meter: f32,
    pub gravity_y: f32,
    pub restitution: f32,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 100.0,
            gravity_y: -980.0,
            restitution: 0.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LossConfig {
    /// Logical y (top-down) above which a resting circle ends the game.
    pub threshold_y: f32,
    /// Linear speed (logical units / s) under which a body counts as still.
    pub rest_speed: f32,
    pub rest_secs: f32,
}
impl Default for LossConfig {
    fn default() -> Self {
        Self {
            threshold_y: 300.0,
            rest_speed: 5.0,
            rest_secs: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct VisualsConfig {
    /// Image paths index-aligned with `ladder.radii`. Missing entries render as flat circles.
    pub textures: Vec<String>,
    pub background: String,
    pub ground_color: String,
}
impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            textures: Vec::new(),
            background: "#ffe89d".into(),
            ground_color: "#7b5438".into(),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub ladder: LadderConfig,
    pub spawn: SpawnConfig,
    pub physics: PhysicsConfig,
    pub loss: LossConfig,
    pub visuals: VisualsConfig,
    pub rapier_debug: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            field: Default::default(),
            ladder: Default::default(),
            spawn: Default::default(),
            physics: Default::default(),
            loss: Default::default(),
            visuals: Default::default(),
            rapier_debug: false,
        }
    }
}

/// Parse `#rrggbb` / `rrggbb` style colors used in the visuals section.
pub fn parse_hex_color(hex: &str) -> Result<Color, String> {
    Srgba::hex(hex)
        .map(Color::from)
        .map_err(|e| format!("invalid color {hex:?}: {e}"))
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Load each path in order, deep-merging later maps over earlier ones.
    /// Returns the config, the paths that contributed, and non-fatal errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        if let Some((_, ev)) = bm.iter_mut().find(|(ek, _)| **ek == k) {
                            if let Some(val) = incoming.take() {
                                merge_value(ev, val);
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.field.logical_width <= 0.0 || self.field.fallback_height <= 0.0 {
            w.push("field dimensions must be > 0".into());
        }
        if self.field.ground_height < 0.0 || self.field.wall_thickness <= 0.0 {
            w.push("field.ground_height must be >= 0 and field.wall_thickness > 0".into());
        }

        let radii = &self.ladder.radii;
        if radii.is_empty() {
            w.push("ladder.radii is empty; default ladder will be used".into());
        }
        if radii.iter().any(|r| *r <= 0.0) {
            w.push("ladder.radii must all be > 0".into());
        }
        if radii.windows(2).any(|pair| pair[1] <= pair[0]) {
            w.push("ladder.radii must be strictly increasing".into());
        }
        if self.ladder.spawnable == 0 {
            w.push("ladder.spawnable is 0; treated as 1".into());
        }
        if self.ladder.spawnable > radii.len() {
            w.push(format!(
                "ladder.spawnable {} exceeds ladder length {}; clamped",
                self.ladder.spawnable,
                radii.len()
            ));
        }
        if let Some(max) = radii.last() {
            if max * 2.0 > self.field.logical_width {
                w.push(format!(
                    "largest radius {max} does not fit field width {}",
                    self.field.logical_width
                ));
            }
        }

        if !self.visuals.textures.is_empty() && self.visuals.textures.len() < radii.len() {
            w.push(format!(
                "visuals.textures has {} entries for {} tiers; remaining tiers render flat",
                self.visuals.textures.len(),
                radii.len()
            ));
        }
        for (label, value) in [
            ("visuals.background", &self.visuals.background),
            ("visuals.ground_color", &self.visuals.ground_color),
        ] {
            if let Err(e) = parse_hex_color(value) {
                w.push(format!("{label}: {e}"));
            }
        }

        if self.spawn.respawn_delay_secs < 0.0 {
            w.push("spawn.respawn_delay_secs negative -> treated as 0".into());
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.physics.gravity_y >= 0.0 {
            w.push(format!(
                "physics.gravity_y is {}; circles will not fall",
                self.physics.gravity_y
            ));
        }
        if !(0.0..=1.0).contains(&self.physics.restitution) {
            w.push(format!(
                "physics.restitution {} outside 0..1",
                self.physics.restitution
            ));
        }
        if self.loss.threshold_y <= 0.0 || self.loss.threshold_y >= self.field.fallback_height {
            w.push(format!(
                "loss.threshold_y {} outside the play field",
                self.loss.threshold_y
            ));
        }
        if self.loss.rest_secs <= 0.0 || self.loss.rest_speed <= 0.0 {
            w.push("loss.rest_secs and loss.rest_speed must be > 0".into());
        }
        w
    }
}
