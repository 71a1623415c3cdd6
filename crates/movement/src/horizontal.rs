use bevy::prelude::{Entity, Vec2};
use kc_common::components::{ground_detector::GroundDetector, player::Facing};
use kc_core::animation::AnimationState;

use crate::{body::CharacterBody, physics::ShapeQueries};

fn can_move(ground: &GroundDetector, blocking_shape: Option<Entity>, queries: &impl ShapeQueries, at: Vec2) -> bool {
    if ground.is_on_ground() {
        return true;
    }

    match blocking_shape {
        Some(shape) => !queries.intersects(at, shape),
        None => true,
    }
}

/// A remembered wall only blocks air control while the character still touches it.
pub fn can_move_left(ground: &GroundDetector, queries: &impl ShapeQueries, at: Vec2) -> bool {
    can_move(ground, ground.left_blocking_shape, queries, at)
}

pub fn can_move_right(ground: &GroundDetector, queries: &impl ShapeQueries, at: Vec2) -> bool {
    can_move(ground, ground.right_blocking_shape, queries, at)
}

pub fn walk(
    body: &mut CharacterBody,
    facing: &mut Facing,
    animation: &mut AnimationState,
    direction: Facing,
    speed: f32,
) {
    let vx = match direction {
        Facing::Left => -speed,
        Facing::Right => speed,
    };

    body.set_velocity(Vec2::new(vx, body.velocity().y));
    *facing = direction;
    *animation = AnimationState::Walk;
}
