//! Sprites for circles and the floor. Tiers with a configured texture get a sprite sized
//! to the circle; the rest fall back to a flat colored disc.

use bevy::prelude::*;

use crate::core::components::{Boundary, BoundaryKind, Circle};
use crate::core::config::{parse_hex_color, GameConfig};
use crate::core::ladder::RadiusLadder;
use crate::gameplay::spawn::prepare_spawning;

#[derive(Debug, Clone)]
pub enum TierVisual {
    Texture(Handle<Image>),
    Flat {
        mesh: Handle<Mesh>,
        material: Handle<ColorMaterial>,
    },
}

/// Per-tier look, index-aligned with the ladder.
#[derive(Resource, Debug, Default)]
pub struct CircleVisuals(pub Vec<TierVisual>);

pub struct VisualsPlugin;

impl Plugin for VisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_circle_visuals.after(prepare_spawning))
            .add_systems(Update, (dress_new_circles, dress_boundaries));
    }
}

/// Evenly spread hues so neighbouring tiers are easy to tell apart.
pub fn tier_color(tier: usize) -> Color {
    Color::hsl((tier as f32 * 37.0) % 360.0, 0.65, 0.55)
}

fn load_circle_visuals(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    ladder: Res<RadiusLadder>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let textures = &cfg.visuals.textures;
    let visuals = (0..ladder.len())
        .map(|tier| match textures.get(tier) {
            Some(path) => TierVisual::Texture(asset_server.load(path.clone())),
            None => {
                let radius = ladder.radius(tier).unwrap_or(1.0);
                TierVisual::Flat {
                    mesh: meshes.add(bevy::math::primitives::Circle::new(radius)),
                    material: materials.add(tier_color(tier)),
                }
            }
        })
        .collect::<Vec<_>>();
    let flat = visuals
        .iter()
        .filter(|v| matches!(v, TierVisual::Flat { .. }))
        .count();
    if flat > 0 {
        info!(target: "visuals", "{flat} of {} tiers render without a texture", visuals.len());
    }
    commands.insert_resource(CircleVisuals(visuals));
}

pub fn dress_new_circles(
    mut commands: Commands,
    visuals: Option<Res<CircleVisuals>>,
    q: Query<(Entity, &Circle), Added<Circle>>,
) {
    let Some(visuals) = visuals else {
        return;
    };
    for (entity, circle) in &q {
        match visuals.0.get(circle.tier) {
            Some(TierVisual::Texture(image)) => {
                commands.entity(entity).insert(Sprite {
                    image: image.clone(),
                    custom_size: Some(Vec2::splat(circle.radius * 2.0)),
                    ..default()
                });
            }
            Some(TierVisual::Flat { mesh, material }) => {
                commands
                    .entity(entity)
                    .insert((Mesh2d(mesh.clone()), MeshMaterial2d(material.clone())));
            }
            None => warn!(target: "visuals", "no visual for tier {}", circle.tier),
        }
    }
}

fn dress_boundaries(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    q: Query<(Entity, &Boundary), Added<Boundary>>,
) {
    for (entity, boundary) in &q {
        if boundary.kind != BoundaryKind::Floor {
            continue;
        }
        let color = parse_hex_color(&cfg.visuals.ground_color).unwrap_or(Color::BLACK);
        commands.entity(entity).insert(Sprite {
            color,
            custom_size: Some(boundary.size),
            ..default()
        });
    }
}
