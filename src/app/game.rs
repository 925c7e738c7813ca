use bevy::prelude::*;

use crate::debug::DebugPlugin;
use crate::gameplay::GameplayPlugin;
use crate::interaction::input::pointer::PointerInputPlugin;
use crate::interaction::session::auto_close::SessionPlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::visuals::VisualsPlugin;

/// Full game on top of `DefaultPlugins`: gameplay loop, Rapier, pointer input and rendering.
/// Insert `GameConfig` (and optionally `GameOverHook`) before adding it.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GameplayPlugin,
            PhysicsSetupPlugin,
            PointerInputPlugin,
            CameraPlugin,
            VisualsPlugin,
            SessionPlugin,
            ConfigHotReloadPlugin,
            DebugPlugin,
        ));
    }
}
