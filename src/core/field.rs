//! Logical play field and its mapping onto Bevy world space.
//!
//! Gameplay thresholds are expressed in logical units: origin at the top-left corner,
//! y growing downward, fixed width. The camera scales that rectangle to fill the
//! window horizontally, so world space is the same rectangle centered on the origin
//! with y up.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::config::GameConfig;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Height keeps the window aspect ratio at the fixed logical width.
    pub fn from_window(logical_width: f32, window_width: f32, window_height: f32) -> Self {
        let height = if window_width > 0.0 {
            window_height * logical_width / window_width
        } else {
            logical_width
        };
        Self::new(logical_width, height)
    }

    pub fn to_world(&self, logical: Vec2) -> Vec2 {
        Vec2::new(logical.x - self.width * 0.5, self.height * 0.5 - logical.y)
    }

    pub fn to_logical(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }

    /// Pointer x in window pixels -> logical x.
    pub fn pointer_to_logical_x(&self, cursor_x: f32, window_width: f32) -> f32 {
        if window_width <= 0.0 {
            return self.width * 0.5;
        }
        cursor_x * self.width / window_width
    }

    /// Keep a circle of `radius` between the walls. Circles wider than the field sit centered.
    pub fn clamp_center_x(&self, x: f32, radius: f32) -> f32 {
        if radius * 2.0 >= self.width {
            return self.width * 0.5;
        }
        if x.is_nan() {
            return self.width * 0.5;
        }
        x.clamp(radius, self.width - radius)
    }

    /// Logical y of a freshly spawned (pending) circle.
    pub fn spawn_y(&self, radius: f32, top_margin: f32) -> f32 {
        radius + top_margin
    }
}

/// Startup: size the field from the primary window, or the configured fallback when headless.
/// A field inserted by the host is kept.
pub fn init_play_field(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    existing: Option<Res<PlayField>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if existing.is_some() {
        return;
    }
    let width = cfg.field.logical_width;
    let field = match windows.single() {
        Ok(window) => PlayField::from_window(width, window.width(), window.height()),
        Err(_) => PlayField::new(width, cfg.field.fallback_height),
    };
    info!(target: "field", "play field {:.0}x{:.0}", field.width, field.height);
    commands.insert_resource(field);
}
