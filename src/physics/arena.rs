use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Boundary, BoundaryKind};
use crate::core::config::GameConfig;
use crate::core::field::PlayField;

/// Logical center and full size of each arena piece: floor along the bottom edge,
/// walls just outside the left and right edges.
pub fn arena_layout(field: &PlayField, ground_height: f32, wall_thickness: f32) -> [(BoundaryKind, Vec2, Vec2); 3] {
    let (w, h, t) = (field.width, field.height, wall_thickness);
    [
        (
            BoundaryKind::Floor,
            Vec2::new(w * 0.5, h - ground_height * 0.5),
            Vec2::new(w, ground_height),
        ),
        (
            BoundaryKind::LeftWall,
            Vec2::new(-t * 0.5, h * 0.5),
            Vec2::new(t, h),
        ),
        (
            BoundaryKind::RightWall,
            Vec2::new(w + t * 0.5, h * 0.5),
            Vec2::new(t, h),
        ),
    ]
}

/// Startup: three fixed bodies bounding the play field.
pub fn spawn_arena(mut commands: Commands, cfg: Res<GameConfig>, field: Res<PlayField>) {
    for (kind, center, size) in arena_layout(&field, cfg.field.ground_height, cfg.field.wall_thickness) {
        commands.spawn((
            Name::new(format!("{kind:?}")),
            Boundary { kind, size },
            RigidBody::Fixed,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            Transform::from_translation(field.to_world(center).extend(0.0)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_and_walls_hug_the_field() {
        let field = PlayField::new(750.0, 1334.0);
        let [floor, left, right] = arena_layout(&field, 120.0, 10.0);
        assert_eq!(floor.0, BoundaryKind::Floor);
        assert_eq!(floor.1, Vec2::new(375.0, 1274.0));
        assert_eq!(floor.2, Vec2::new(750.0, 120.0));
        assert_eq!(left.1, Vec2::new(-5.0, 667.0));
        assert_eq!(right.1, Vec2::new(755.0, 667.0));
        assert_eq!(right.2, Vec2::new(10.0, 1334.0));
    }
}
