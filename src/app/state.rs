use bevy::prelude::*;

/// Drop lifecycle of the single player-controlled circle.
/// Idle -> Pending -> Released -> Idle ... ; any phase -> GameOver (terminal).
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum DropPhase {
    /// No pending circle; one is spawned this frame.
    #[default]
    Idle,
    /// A static circle follows the pointer and waits for release.
    Pending,
    /// The last circle is falling; the next spawn is scheduled.
    Released,
    /// A circle came to rest above the loss line. Input and merging stop.
    GameOver,
}

/// Run condition: true until the game has been lost.
pub fn play_active(phase: Res<State<DropPhase>>) -> bool {
    *phase.get() != DropPhase::GameOver
}
