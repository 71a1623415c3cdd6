use bevy::prelude::{Entity, Query, Res, Transform, Vec2, With};
use bevy_rapier2d::prelude::{Collider, QueryFilter, RapierContext};
use kc_common::components::{buildable::Buildable, climbable::{Climbable, ClimbableRef}, interaction::FrameInteractions, player::Player, tool::Tool};

use crate::{body::to_screen, climbing::is_climbable_at, physics::{ColliderQueries, ShapeQueries}, settings::MovementSettings};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interactable {
    Climbable(ClimbableRef),
    Buildable,
}

/// Handles one overlap. Can run several times a frame; a later climbable that
/// passes its span check replaces an earlier one.
pub fn register_overlap(
    interactions: &mut FrameInteractions,
    interactable: Interactable,
    queries: &impl ShapeQueries,
    at: Vec2,
) {
    match interactable {
        Interactable::Climbable(climbable) => {
            if is_climbable_at(&climbable, queries, at) {
                interactions.allow_climbing(climbable);
            }
        },
        Interactable::Buildable => interactions.allow_building(),
    }
}

pub fn detect_interactables(
    mut q_player: Query<(Entity, &Transform, &Collider, &mut FrameInteractions), With<Player>>,
    q_climbables: Query<&Climbable>,
    q_buildables: Query<(), With<Buildable>>,
    q_tools: Query<&Tool>,
    rapier_context: Res<RapierContext>,
    shapes: ColliderQueries,
    settings: Res<MovementSettings>,
) {
    for (player, transform, collider, mut interactions) in q_player.iter_mut() {
        let Some(queries) = shapes.for_character(player, settings.contact_tolerance) else {
            continue;
        };

        let shape_pos = transform.translation.truncate();
        let filter = QueryFilter::new().exclude_collider(player);
        let mut overlaps = Vec::new();

        rapier_context.intersections_with_shape(shape_pos, 0.0, collider, filter, |entity| {
            overlaps.push(entity);
            true
        });

        let at = to_screen(shape_pos);
        for other in overlaps {
            if let Ok(climbable) = q_climbables.get(other) {
                register_overlap(&mut interactions, Interactable::Climbable(ClimbableRef::new(other, climbable)), &queries, at);
            }

            let bound_tool = q_tools.get(other).is_ok_and(|tool| tool.buildable.is_some());
            if q_buildables.contains(other) || bound_tool {
                register_overlap(&mut interactions, Interactable::Buildable, &queries, at);
            }
        }
    }
}
