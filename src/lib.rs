pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::app::state::DropPhase;
pub use crate::core::components::{Circle, PendingCircle};
pub use crate::core::config::{GameConfig, WindowConfig};
pub use crate::gameplay::loss::{GameOver, GameOverHook};
pub use crate::gameplay::GameplayPlugin;
