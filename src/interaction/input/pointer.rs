use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::app::state::DropPhase;
use crate::core::field::PlayField;
use crate::core::system::system_order::PrePhysicsSet;

/// Device-independent pointer intent, already in logical field coordinates.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Move { x: f32 },
    /// `x` is `None` when the release happened without a known pointer position.
    Release { x: Option<f32> },
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PointerReadSet;

/// Last pointer x seen, in window pixels. Only a change from this counts as a move.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    pub last_px: Option<f32>,
}

/// Reads mouse / touch from the primary window. Needs window + input plugins.
pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerAction>()
            .init_resource::<PointerTracker>()
            .configure_sets(Update, PointerReadSet.before(PrePhysicsSet))
            .add_systems(OnEnter(DropPhase::Pending), seed_pointer)
            .add_systems(
                Update,
                read_pointer
                    .in_set(PointerReadSet)
                    .run_if(in_state(DropPhase::Pending)),
            );
    }
}

/// First active touch wins over the mouse cursor.
fn primary_pointer_x(window: &Window, touches: &Touches) -> Option<f32> {
    if let Some(touch) = touches.iter().next() {
        return Some(touch.position().x);
    }
    window.cursor_position().map(|p| p.x)
}

/// A new circle starts centered; remember where the pointer rests so it is not
/// mistaken for a move.
fn seed_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    mut tracker: ResMut<PointerTracker>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(px) = primary_pointer_x(window, &touches) {
        tracker.last_px = Some(px);
    }
}

fn read_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    field: Res<PlayField>,
    mut tracker: ResMut<PointerTracker>,
    mut out: EventWriter<PointerAction>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let to_logical = |px: f32| field.pointer_to_logical_x(px, window.width());

    let released_touch = touches.iter_just_released().next().map(|t| t.position().x);
    if buttons.just_released(MouseButton::Left) || released_touch.is_some() {
        let px = released_touch
            .or_else(|| window.cursor_position().map(|p| p.x))
            .or(tracker.last_px);
        if px.is_some() {
            tracker.last_px = px;
        }
        out.write(PointerAction::Release {
            x: px.map(to_logical),
        });
        return;
    }

    let Some(px) = primary_pointer_x(window, &touches) else {
        return;
    };
    if tracker.last_px != Some(px) {
        tracker.last_px = Some(px);
        out.write(PointerAction::Move { x: to_logical(px) });
    }
}
