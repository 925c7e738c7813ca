//! Engine-agnostic gameplay loop: spawn, drop, merge, lose.
//!
//! `GameplayPlugin` runs headless (no window, renderer or Rapier step needed). It
//! consumes typed records (`PointerAction`, `ContactEvent`, `BodyRested`) that the
//! input and physics layers produce, which is also how the tests drive it.

pub mod drop;
pub mod loss;
pub mod merge;
pub mod spawn;

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::app::state::{play_active, DropPhase};
use crate::core::config::GameConfig;
use crate::core::field::init_play_field;
use crate::core::system::system_order::{ContactMapSet, LossSet, PostPhysicsAdjustSet, PrePhysicsSet};
use crate::interaction::input::pointer::PointerAction;
use crate::physics::arena::spawn_arena;
use crate::physics::contacts::{map_collision_events, ActiveContacts, ContactEvent};
use crate::physics::rest::{track_resting_bodies, BodyRested};

use drop::{apply_pointer_actions, CircleReleased};
use loss::{detect_loss, notify_game_over, GameOver};
use merge::{merge_touching_circles, CirclesMerged, LadderCompleted, MergeStats};
use spawn::{
    cancel_drop_timer, prepare_spawning, spawn_pending_circle, tick_drop_timer, CircleSpawned,
    SpawnCounter,
};

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_state::<DropPhase>()
            .add_event::<CollisionEvent>()
            .add_event::<PointerAction>()
            .add_event::<ContactEvent>()
            .add_event::<BodyRested>()
            .add_event::<CircleSpawned>()
            .add_event::<CircleReleased>()
            .add_event::<CirclesMerged>()
            .add_event::<LadderCompleted>()
            .add_event::<GameOver>()
            .init_resource::<SpawnCounter>()
            .init_resource::<MergeStats>()
            .init_resource::<ActiveContacts>()
            .configure_sets(
                Update,
                (
                    PrePhysicsSet,
                    ContactMapSet.after(PrePhysicsSet),
                    PostPhysicsAdjustSet.after(ContactMapSet),
                    LossSet.after(PostPhysicsAdjustSet),
                ),
            )
            .add_systems(
                Startup,
                (init_play_field, prepare_spawning, spawn_arena).chain(),
            )
            .add_systems(
                Update,
                (
                    apply_pointer_actions.run_if(in_state(DropPhase::Pending)),
                    tick_drop_timer.run_if(in_state(DropPhase::Released)),
                )
                    .in_set(PrePhysicsSet),
            )
            // After the loss check, so a lost frame never hands out another circle.
            .add_systems(
                Update,
                spawn_pending_circle
                    .after(LossSet)
                    .run_if(in_state(DropPhase::Idle)),
            )
            .add_systems(Update, map_collision_events.in_set(ContactMapSet))
            .add_systems(
                Update,
                (merge_touching_circles, track_resting_bodies)
                    .chain()
                    .in_set(PostPhysicsAdjustSet)
                    .run_if(play_active),
            )
            .add_systems(Update, detect_loss.in_set(LossSet).run_if(play_active))
            .add_systems(
                OnEnter(DropPhase::GameOver),
                (cancel_drop_timer, notify_game_over),
            );
    }
}
