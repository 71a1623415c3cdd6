use bevy::{log::{debug, info}, prelude::{Changed, Component, Entity, Input, KeyCode, Query, Res, TextureAtlasSprite, Transform, Vec2}, reflect::Reflect};
use bevy_rapier2d::prelude::{RigidBody, Velocity};
use kc_common::components::{checkpoint::CheckpointManager, climb::ClimbSession, ground_detector::{GroundDetector, WithPrevious}, interaction::FrameInteractions, player::{Facing, Player}};
use kc_core::animation::{AnimationState, Animator};

use crate::{
    body::{to_screen, CharacterBody},
    climbing::{climb, climb_direction},
    horizontal::{can_move_left, can_move_right, walk},
    input::{ControlInput, KeyBindings},
    jumping::{can_jump, jump_up, revalidate_ground},
    physics::{ColliderQueries, ShapeQueries},
    settings::MovementSettings,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LocomotionState {
    #[default] Idle,
    Walking,
    Jumping,
    Climbing,
}

#[derive(Component, Debug, Default)]
pub struct LocomotionStatus {
    pub state: WithPrevious<LocomotionState>,
}

/// Mutable per-character state touched by one locomotion update.
pub struct Character<'a> {
    pub body: &'a mut CharacterBody,
    pub ground: &'a mut GroundDetector,
    pub climb: &'a mut ClimbSession,
    pub interactions: &'a mut FrameInteractions,
    pub facing: &'a mut Facing,
    pub animation: &'a mut AnimationState,
}

/// Everything the update reads but does not own.
pub struct FrameContext<'a, Q: ShapeQueries> {
    pub input: ControlInput,
    /// Screen-space checkpoint position, if one was reached.
    pub reset_position: Option<Vec2>,
    pub queries: &'a Q,
    pub settings: &'a MovementSettings,
}

pub fn update_locomotion<Q: ShapeQueries>(character: Character<'_>, frame: &FrameContext<'_, Q>) -> LocomotionState {
    let Character { body, ground, climb: session, interactions, facing, animation } = character;
    let FrameContext { input, reset_position, queries, settings } = frame;

    body.set_rotation(0.0);

    let was_on_ground = ground.is_on_ground();
    let on_ground = revalidate_ground(ground, *queries, body.position());
    if on_ground != was_on_ground {
        debug!("Switching on_ground to {}", on_ground);
    }

    if input.reset {
        if let Some(position) = reset_position {
            body.teleport(*position);
        }
    }

    let build_combo = input.build_combo(interactions.can_build);

    if input.jump && can_jump(ground, session) {
        jump_up(body, ground, session, settings.jump_speed);
    } else if session.is_climbing {
        let dir = climb_direction(input, build_combo);
        climb(body, session, interactions.climbable.as_ref(), dir, *queries, settings);
    } else {
        body.set_as_dynamic();

        if input.left && can_move_left(ground, *queries, body.position()) {
            walk(body, facing, animation, Facing::Left, settings.walk_speed);
        }
        if input.right && can_move_right(ground, *queries, body.position()) {
            walk(body, facing, animation, Facing::Right, settings.walk_speed);
        }

        if (input.up || input.down) && !build_combo && interactions.can_climb {
            session.begin();
            let dir = climb_direction(input, build_combo);
            climb(body, session, interactions.climbable.as_ref(), dir, *queries, settings);
        }
    }

    let standing = body.velocity().x.abs() < settings.standing_speed_threshold;
    if !ground.is_on_ground() {
        *animation = AnimationState::Jump;
    } else if standing {
        *animation = AnimationState::Stand;
    }

    if session.is_climbing {
        body.set_velocity(Vec2::new(body.velocity().x, 0.0));
    }

    // Overlap detection has to re-arm these before the next update.
    if !interactions.can_climb {
        session.stop();
    }
    interactions.reset();

    if session.is_climbing {
        LocomotionState::Climbing
    } else if !ground.is_on_ground() {
        LocomotionState::Jumping
    } else if standing {
        LocomotionState::Idle
    } else {
        LocomotionState::Walking
    }
}

pub fn locomotion_controls(
    mut q_player: Query<(
        Entity,
        &mut Transform,
        &mut Velocity,
        &mut RigidBody,
        &mut Player,
        &mut GroundDetector,
        &mut ClimbSession,
        &mut FrameInteractions,
        &mut Animator,
        &mut LocomotionStatus,
    )>,
    shapes: ColliderQueries,
    keyboard_input: Res<Input<KeyCode>>,
    bindings: Res<KeyBindings>,
    checkpoints: Res<CheckpointManager>,
    settings: Res<MovementSettings>,
) {
    let input = ControlInput::from_keyboard(&keyboard_input, &bindings);

    for (
        entity,
        mut transform,
        mut velocity,
        mut rigid_body,
        mut player,
        mut ground,
        mut session,
        mut interactions,
        mut animator,
        mut status,
    ) in q_player.iter_mut() {
        let Some(queries) = shapes.for_character(entity, settings.contact_tolerance) else {
            continue;
        };

        let mut body = CharacterBody::from_components(&transform, &velocity, &rigid_body);
        let frame = FrameContext {
            input,
            reset_position: checkpoints.reset_position().map(to_screen),
            queries: &queries,
            settings: &settings,
        };

        let state = update_locomotion(Character {
            body: &mut body,
            ground: &mut ground,
            climb: &mut session,
            interactions: &mut interactions,
            facing: &mut player.facing,
            animation: &mut animator.current_animation,
        }, &frame);

        body.write_back(&mut transform, &mut velocity, &mut rigid_body);

        status.state.update_value(state);
        if !status.state.is_same_as_previous() {
            info!("Locomotion {:?} -> {:?}", status.state.previous.unwrap_or_default(), state);
        }
    }
}

pub fn sync_facing(
    mut q_player: Query<(&Player, &mut TextureAtlasSprite), Changed<Player>>,
) {
    for (player, mut sprite) in q_player.iter_mut() {
        let flip_x = player.facing == Facing::Left;
        if sprite.flip_x != flip_x {
            sprite.flip_x = flip_x;
        }
    }
}
