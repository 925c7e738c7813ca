//! Boundary between Rapier and gameplay: arena bodies, engine setup and the typed
//! records (contacts, rest transitions) gameplay consumes.

pub mod arena;
pub mod contacts;
pub mod rapier_physics;
pub mod rest;
