use bevy::{prelude::{default, Color, Commands, Resource, SpriteBundle, Transform, Vec2}, sprite::{Anchor, Sprite}};
use bevy_rapier2d::prelude::{Collider, RigidBody, Sensor};
use kc_common::components::{buildable::Buildable, checkpoint::Checkpoint, climbable::Climbable, tool::Tool};
use kc_movement::building::structure_collider;
use kc_util::constants::{BUILD_STEP, CLIMB_GRIP_OFFSET};

// Reaches a little above the platform at (560, 400) so the climber steps off onto it.
const LADDER_BOTTOM: Vec2 = Vec2::new(380.0, 0.0);
const LADDER_HEIGHT: f32 = 432.0;

/// World-space extent of the loaded level, used to keep the camera inside it.
#[derive(Resource, Debug, Clone)]
pub struct LevelBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for LevelBounds {
    fn default() -> Self {
        LevelBounds {
            min: Vec2::new(-1200.0, -64.0),
            max: Vec2::new(1200.0, 1400.0),
        }
    }
}

fn block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) {
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(center.extend(0.0)),
            ..default()
        },
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
    ));
}

fn grip() -> Climbable {
    Climbable {
        grip_offset: CLIMB_GRIP_OFFSET,
    }
}

fn ladder(commands: &mut Commands, bottom: Vec2, height: f32) {
    let size = Vec2::new(48.0, height);

    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.75, 0.55, 0.3),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation((bottom + Vec2::new(0.0, height / 2.0)).extend(-1.0)),
            ..default()
        },
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        Sensor,
        grip(),
    ));
}

fn checkpoint(commands: &mut Commands, position: Vec2) {
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.6, 0.6, 0.6),
                custom_size: Some(Vec2::new(16.0, 96.0)),
                ..default()
            },
            transform: Transform::from_translation((position + Vec2::new(0.0, 48.0)).extend(-1.0)),
            ..default()
        },
        Collider::cuboid(8.0, 48.0),
        Sensor,
        Checkpoint::default(),
    ));
}

/// Knitted structure grown by a pair of needles standing next to it.
fn tool_with_structure(commands: &mut Commands, tool_position: Vec2, structure_base: Vec2, buildable: Buildable) {
    let structure = commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.85, 0.3, 0.35),
                custom_size: Some(Vec2::new(buildable.width, buildable.height())),
                anchor: Anchor::BottomCenter,
                ..default()
            },
            transform: Transform::from_translation(structure_base.extend(-1.0)),
            ..default()
        },
        structure_collider(&buildable),
        Sensor,
        grip(),
        buildable,
    )).id();

    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.2, 0.3, 0.8),
                custom_size: Some(Vec2::new(32.0, 64.0)),
                ..default()
            },
            transform: Transform::from_translation((tool_position + Vec2::new(0.0, 32.0)).extend(-1.0)),
            ..default()
        },
        Collider::cuboid(48.0, 64.0),
        Sensor,
        Tool::bound_to(structure),
    ));
}

pub fn spawn_level(mut commands: Commands) {
    let bounds = LevelBounds::default();
    let ground = Color::rgb(0.25, 0.25, 0.3);

    block(&mut commands, Vec2::new(0.0, -32.0), Vec2::new(bounds.max.x - bounds.min.x, 64.0), ground);
    block(&mut commands, Vec2::new(bounds.min.x + 32.0, 700.0), Vec2::new(64.0, 1400.0), ground);
    block(&mut commands, Vec2::new(bounds.max.x - 32.0, 700.0), Vec2::new(64.0, 1400.0), ground);

    block(&mut commands, Vec2::new(560.0, 400.0), Vec2::new(320.0, 32.0), ground);
    block(&mut commands, Vec2::new(-640.0, 560.0), Vec2::new(320.0, 32.0), ground);

    ladder(&mut commands, LADDER_BOTTOM, LADDER_HEIGHT);

    tool_with_structure(
        &mut commands,
        Vec2::new(-280.0, 0.0),
        Vec2::new(-440.0, 0.0),
        Buildable::new(96.0, 0.0, 640.0, 64.0, BUILD_STEP),
    );

    checkpoint(&mut commands, Vec2::new(-80.0, 0.0));
    checkpoint(&mut commands, Vec2::new(600.0, 416.0));

    commands.insert_resource(bounds);
}
