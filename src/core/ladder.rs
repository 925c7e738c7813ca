//! Radius ladder: the ordered circle sizes that drive spawning and merging.
//!
//! Tier `i` merges into tier `i + 1`. Only the first `spawnable` tiers are ever
//! handed to the player.

use bevy::prelude::*;
use rand::Rng;

use crate::core::config::LadderConfig;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RadiusLadder {
    radii: Vec<f32>,
    spawnable: usize,
}

impl RadiusLadder {
    /// Build a ladder from strictly increasing positive radii.
    /// `spawnable` is clamped into `1..=radii.len()`.
    pub fn new(radii: Vec<f32>, spawnable: usize) -> Result<Self, String> {
        if radii.is_empty() {
            return Err("ladder needs at least one radius".into());
        }
        if let Some(bad) = radii.iter().find(|r| !(**r > 0.0)) {
            return Err(format!("ladder radius {bad} must be > 0"));
        }
        if radii.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err("ladder radii must be strictly increasing".into());
        }
        let spawnable = spawnable.clamp(1, radii.len());
        Ok(Self { radii, spawnable })
    }

    /// Ladder from config, falling back to the default ladder if the configured one is unusable.
    pub fn from_config(cfg: &LadderConfig) -> Self {
        match Self::new(cfg.radii.clone(), cfg.spawnable) {
            Ok(ladder) => ladder,
            Err(e) => {
                warn!(target: "ladder", "invalid ladder ({e}); using defaults");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn spawnable(&self) -> usize {
        self.spawnable
    }

    pub fn radius(&self, tier: usize) -> Option<f32> {
        self.radii.get(tier).copied()
    }

    pub fn top_tier(&self) -> usize {
        self.radii.len() - 1
    }

    /// Tier produced by merging two circles of `tier`; `None` at the top of the ladder.
    pub fn next(&self, tier: usize) -> Option<usize> {
        let next = tier.checked_add(1)?;
        (next < self.radii.len()).then_some(next)
    }

    /// The first circle of a game is always the smallest; afterwards any spawnable tier is
    /// equally likely.
    pub fn pick_spawn_tier(&self, spawned_so_far: u32, rng: &mut impl Rng) -> usize {
        if spawned_so_far == 0 {
            0
        } else {
            rng.gen_range(0..self.spawnable)
        }
    }
}

impl Default for RadiusLadder {
    fn default() -> Self {
        let cfg = LadderConfig::default();
        Self {
            spawnable: cfg.spawnable.min(cfg.radii.len()),
            radii: cfg.radii,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn default_ladder_shape() {
        let ladder = RadiusLadder::default();
        assert_eq!(ladder.len(), 11);
        assert_eq!(ladder.spawnable(), 6);
        assert_eq!(ladder.radius(0), Some(26.0));
        assert_eq!(ladder.top_tier(), 10);
    }

    #[test]
    fn next_stops_at_top() {
        let ladder = RadiusLadder::default();
        assert_eq!(ladder.next(0), Some(1));
        assert_eq!(ladder.next(9), Some(10));
        assert_eq!(ladder.next(10), None);
        assert_eq!(ladder.next(usize::MAX), None);
    }

    #[test]
    fn rejects_unordered_or_empty() {
        assert!(RadiusLadder::new(vec![], 1).is_err());
        assert!(RadiusLadder::new(vec![10.0, 10.0], 1).is_err());
        assert!(RadiusLadder::new(vec![10.0, -1.0], 1).is_err());
        assert!(RadiusLadder::new(vec![f32::NAN], 1).is_err());
    }

    #[test]
    fn spawnable_is_clamped() {
        let ladder = RadiusLadder::new(vec![1.0, 2.0, 3.0], 10).unwrap();
        assert_eq!(ladder.spawnable(), 3);
        let ladder = RadiusLadder::new(vec![1.0, 2.0, 3.0], 0).unwrap();
        assert_eq!(ladder.spawnable(), 1);
    }

    #[test]
    fn first_pick_is_smallest_then_within_spawnable() {
        let ladder = RadiusLadder::default();
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(ladder.pick_spawn_tier(0, &mut rng), 0);
        let mut seen = [false; 6];
        for n in 1..500 {
            let tier = ladder.pick_spawn_tier(n, &mut rng);
            assert!(tier < 6, "tier {tier} not spawnable");
            seen[tier] = true;
        }
        assert!(seen.iter().all(|s| *s), "expected every spawnable tier: {seen:?}");
    }

    #[test]
    fn radius_lookup_past_the_top_is_none() {
        let ladder = RadiusLadder::default();
        assert_eq!(ladder.radius(2), Some(54.0));
        assert_eq!(ladder.radius(11), None);
    }

    #[test]
    fn invalid_config_falls_back() {
        let cfg = LadderConfig { radii: vec![], spawnable: 3 };
        assert_eq!(RadiusLadder::from_config(&cfg), RadiusLadder::default());
    }
}
