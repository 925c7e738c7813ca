use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::core::config::{parse_hex_color, GameConfig};
use crate::core::field::{init_play_field, PlayField};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (apply_background, setup_camera.after(init_play_field)));
    }
}

/// The field's logical width always spans the viewport; its height matches the window aspect.
fn setup_camera(mut commands: Commands, field: Res<PlayField>) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedHorizontal {
                viewport_width: field.width,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}

fn apply_background(mut commands: Commands, cfg: Res<GameConfig>) {
    match parse_hex_color(&cfg.visuals.background) {
        Ok(color) => commands.insert_resource(ClearColor(color)),
        Err(e) => warn!(target: "visuals", "background: {e}"),
    }
}
