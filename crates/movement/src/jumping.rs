use bevy::prelude::Vec2;
use kc_common::components::{climb::ClimbSession, ground_detector::GroundDetector};

use crate::{body::CharacterBody, physics::ShapeQueries};

/// Contacts only ever set the ground flag, so it is re-checked against the
/// remembered shape every frame. Returns the updated flag.
pub fn revalidate_ground(ground: &mut GroundDetector, queries: &impl ShapeQueries, at: Vec2) -> bool {
    let still_on_ground = ground
        .remembered_ground()
        .is_some_and(|shape| queries.intersects(at, shape));

    if !still_on_ground {
        ground.leave_ground();
    }

    still_on_ground
}

pub fn can_jump(ground: &GroundDetector, climb: &ClimbSession) -> bool {
    climb.is_climbing || ground.is_on_ground()
}

pub fn jump_up(body: &mut CharacterBody, ground: &mut GroundDetector, climb: &mut ClimbSession, jump_speed: f32) {
    ground.leave_ground();
    climb.stop();
    body.set_as_dynamic();
    body.set_velocity(Vec2::new(body.velocity().x, -jump_speed));
}
