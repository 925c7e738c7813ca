//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. PrePhysics (pointer input, pending-circle placement, drop timer)
//! 2. ContactMap (engine collision / motion data -> typed gameplay records)
//! 3. PostPhysicsAdjust (merges and rest detection)
//! 4. Loss (game-over check; its state transition wins the frame)
//! 5. The next pending circle is spawned after Loss, and only if the game goes on.
//!
//! Rapier itself steps in PostUpdate, so gameplay reads the previous step's results.
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ContactMapSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct LossSet;
