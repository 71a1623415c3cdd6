use bevy::{hierarchy::HierarchyPlugin, prelude::{default, App, Bundle, Entity, GlobalTransform, MinimalPlugins, Transform, TransformBundle, Vec2}, transform::TransformPlugin, utils::HashMap};
use bevy_rapier2d::prelude::{ActiveEvents, Collider, LockedAxes, NoUserData, RapierConfiguration, RapierPhysicsPlugin, RigidBody, TimestepMode, Velocity};
use kc_common::components::{climb::ClimbSession, ground_detector::GroundDetector, interaction::FrameInteractions, player::Player};
use kc_util::constants::{GRAVITY, PIXELS_PER_METER};

use crate::{physics::{ShapeQueries, SignedDistance}, settings::MovementSettings};

/// World-space transform with its global pose already set, so colliders are
/// where they should be before any propagation runs.
pub fn placed(x: f32, y: f32) -> TransformBundle {
    let local = Transform::from_xyz(x, y, 0.0);

    TransformBundle {
        local,
        global: GlobalTransform::from(local),
    }
}

/// Headless app stepping Rapier at a fixed 60 Hz.
pub fn rapier_app() -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, TransformPlugin, HierarchyPlugin))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER))
        .insert_resource(RapierConfiguration {
            gravity: Vec2::new(0.0, -GRAVITY),
            timestep_mode: TimestepMode::Fixed { dt: 1.0 / 60.0, substeps: 1 },
            ..default()
        })
        .init_resource::<MovementSettings>();

    app
}

/// A 32x128 player body like the one the game spawns, at world `(x, y)`.
pub fn player_body(x: f32, y: f32) -> impl Bundle {
    (
        placed(x, y),
        RigidBody::Dynamic,
        Velocity::zero(),
        Collider::cuboid(16.0, 64.0),
        LockedAxes::ROTATION_LOCKED,
        ActiveEvents::COLLISION_EVENTS,
        Player::default(),
        GroundDetector::default(),
        ClimbSession::default(),
        FrameInteractions::default(),
    )
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Aabb {
        Aabb { center, half }
    }

    fn contains(&self, point: Vec2) -> bool {
        let offset = (point - self.center).abs();
        offset.x <= self.half.x && offset.y <= self.half.y
    }
}

/// Axis-aligned boxes in screen space standing in for Rapier colliders.
#[derive(Debug, Default)]
pub struct BoxWorld {
    pub character_half: Vec2,
    pub boxes: HashMap<Entity, Aabb>,
}

impl BoxWorld {
    pub fn new(character_half: Vec2) -> BoxWorld {
        BoxWorld {
            character_half,
            boxes: HashMap::new(),
        }
    }

    pub fn with_box(mut self, entity: Entity, center: Vec2, half: Vec2) -> BoxWorld {
        self.boxes.insert(entity, Aabb::new(center, half));
        self
    }

    // Per-axis gap between the character at `at` and `other`; negative when overlapping.
    fn gaps(&self, at: Vec2, other: &Aabb) -> Vec2 {
        (other.center - at).abs() - (other.half + self.character_half)
    }
}

impl ShapeQueries for BoxWorld {
    fn intersects(&self, at: Vec2, other: Entity) -> bool {
        match self.boxes.get(&other) {
            Some(other) => {
                let gaps = self.gaps(at, other);
                gaps.x <= 0.0 && gaps.y <= 0.0
            },
            None => false,
        }
    }

    fn signed_distance(&self, surface: Entity, at: Vec2) -> Option<SignedDistance> {
        let surface = self.boxes.get(&surface)?;
        let gaps = self.gaps(at, surface);
        let direction = (at - surface.center).signum();

        let (distance, axis) = if gaps.x <= 0.0 && gaps.y <= 0.0 {
            // Overlapping: the least penetrating axis separates them.
            if gaps.x > gaps.y {
                (gaps.x, Vec2::new(direction.x, 0.0))
            } else {
                (gaps.y, Vec2::new(0.0, direction.y))
            }
        } else {
            let outside = gaps.max(Vec2::ZERO) * direction;
            (outside.length(), outside.normalize_or_zero())
        };

        Some(SignedDistance {
            distance,
            witness_a: surface.center,
            witness_b: at,
            axis,
        })
    }

    fn contains_point(&self, shape: Entity, point: Vec2) -> bool {
        self.boxes.get(&shape).is_some_and(|shape| shape.contains(point))
    }
}
