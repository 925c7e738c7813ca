//! Debug module: feature gated stats collection & periodic logging.
//! Systems are only registered when compiled with `--features debug`.

#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use stats::DebugStats;

use bevy::prelude::*;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(feature = "debug")]
        {
            use crate::core::system::system_order::LossSet;
            app.init_resource::<stats::DebugStats>()
                .init_resource::<logging::DebugLogState>()
                .add_systems(
                    Update,
                    (
                        stats::debug_stats_collect_system,
                        logging::debug_logging_system,
                    )
                        .chain()
                        .after(LossSet),
                );
        }
        #[cfg(not(feature = "debug"))]
        let _ = app;
    }
}
