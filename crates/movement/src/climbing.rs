use bevy::prelude::Vec2;
use kc_common::components::{climb::ClimbSession, climbable::ClimbableRef};

use crate::{body::CharacterBody, input::ControlInput, physics::ShapeQueries, settings::MovementSettings};

pub fn is_climbable_at(climbable: &ClimbableRef, queries: &impl ShapeQueries, at: Vec2) -> bool {
    queries.contains_point(climbable.surface, at + Vec2::new(0.0, climbable.grip_offset))
}

/// Unnormalised screen-space direction; opposite keys cancel and the build combo
/// hands the vertical keys to the tool.
pub fn climb_direction(input: &ControlInput, build_combo: bool) -> Vec2 {
    let mut dir = Vec2::ZERO;

    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up && !build_combo {
        dir.y -= 1.0;
    }
    if input.down && !build_combo {
        dir.y += 1.0;
    }

    dir
}

/// Moves a climbing character by a direct position override.
pub fn climb(
    body: &mut CharacterBody,
    session: &mut ClimbSession,
    climbable: Option<&ClimbableRef>,
    dir: Vec2,
    queries: &impl ShapeQueries,
    settings: &MovementSettings,
) {
    body.set_mode(settings.climb_body_mode);

    if let (Some(direction), Some(climbable)) = (dir.try_normalize(), climbable) {
        let pos = body.position();
        let next_pos = pos + direction * settings.climb_speed;
        body.teleport(next_pos);

        // Past the top of the climbable: undo the step.
        if let Some(signed) = queries.signed_distance(climbable.surface, next_pos) {
            if !is_climbable_at(climbable, queries, next_pos)
                && signed.axis.y < 0.0
                && signed.axis.x * signed.distance < settings.climb_dist_epsilon
            {
                body.teleport(pos);
            }
        }
    }

    // Float error and gravity make a still climber slide; pin idle axes.
    let mut current_pos = body.position();
    if let Some(last_climb_position) = session.last_climb_position {
        if dir.x == 0.0 {
            current_pos.x = last_climb_position.x;
        }
        if dir.y == 0.0 {
            current_pos.y = last_climb_position.y;
        }
        body.teleport(current_pos);
    }

    session.last_climb_position = Some(current_pos);
}
