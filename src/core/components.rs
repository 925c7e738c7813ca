use bevy::prelude::*;

/// A merge-able circle body. `radius` always equals the ladder radius of `tier`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub tier: usize,
    pub radius: f32,
}

/// Marker for the single player-held circle waiting to be dropped.
#[derive(Component, Debug, Default)]
pub struct PendingCircle;

/// Bodies carrying this are checked against the loss line whenever they come to rest.
#[derive(Component, Debug, Default)]
pub struct LossWatch;

/// Accumulated stillness for rest detection.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct RestTracker {
    pub still_secs: f32,
    pub resting: bool,
}

impl RestTracker {
    /// Feed one frame of motion. Returns true only on the frame the body falls asleep.
    pub fn advance(&mut self, speed: f32, dt: f32, rest_speed: f32, rest_secs: f32) -> bool {
        if speed > rest_speed {
            self.still_secs = 0.0;
            self.resting = false;
            return false;
        }
        if self.resting {
            return false;
        }
        self.still_secs += dt;
        if self.still_secs >= rest_secs {
            self.resting = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    Floor,
    LeftWall,
    RightWall,
}

/// Static arena piece. `size` is the full extent in logical units.
#[derive(Component, Debug, Clone, Copy)]
pub struct Boundary {
    pub kind: BoundaryKind,
    pub size: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_fires_once_after_sustained_stillness() {
        let mut t = RestTracker::default();
        assert!(!t.advance(0.0, 0.4, 5.0, 1.0));
        assert!(!t.advance(1.0, 0.4, 5.0, 1.0));
        assert!(t.advance(0.0, 0.4, 5.0, 1.0));
        assert!(t.resting);
        assert!(!t.advance(0.0, 0.4, 5.0, 1.0));
    }

    #[test]
    fn motion_wakes_and_rearms() {
        let mut t = RestTracker::default();
        assert!(t.advance(0.0, 1.0, 5.0, 1.0));
        assert!(!t.advance(50.0, 0.1, 5.0, 1.0));
        assert!(!t.resting);
        assert_eq!(t.still_secs, 0.0);
        assert!(t.advance(0.0, 1.0, 5.0, 1.0));
    }
}
