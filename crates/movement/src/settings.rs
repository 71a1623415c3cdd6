use bevy::{prelude::{Resource, ReflectResource}, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};
use kc_util::constants::{PLAYER_WALK_SPEED, PLAYER_JUMP_SPEED, PLAYER_CLIMB_SPEED, CLIMB_DIST_EPSILON, STANDING_SPEED_THRESHOLD, CONTACT_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::body::BodyMode;

/// How a wall contact on the left side is recognised.
///
/// `MirrorRight` repeats the right-wall test (`nx > 0`), so the left branch is
/// never reached and only right walls block air control. `NegativeNormal` is
/// the mirrored test; it stays opt-in until the changed feel is signed off.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum LeftBlockRule {
    #[default] MirrorRight,
    NegativeNormal,
}

impl LeftBlockRule {
    pub fn blocks_left(self, normal_x: f32) -> bool {
        match self {
            LeftBlockRule::MirrorRight => normal_x > 0.0,
            LeftBlockRule::NegativeNormal => normal_x < 0.0,
        }
    }
}

/// Runtime tuning of the controller, editable from the world inspector.
#[derive(Resource, Debug, Clone, PartialEq, Reflect, InspectorOptions, Serialize, Deserialize)]
#[reflect(Resource, InspectorOptions)]
#[serde(default)]
pub struct MovementSettings {
    #[inspector(min = 0.0)]
    pub walk_speed: f32,
    #[inspector(min = 0.0)]
    pub jump_speed: f32,
    /// Pixels per tick.
    #[inspector(min = 0.0)]
    pub climb_speed: f32,
    pub climb_dist_epsilon: f32,
    #[inspector(min = 0.0)]
    pub standing_speed_threshold: f32,
    #[inspector(min = 0.0)]
    pub contact_tolerance: f32,
    pub left_block_rule: LeftBlockRule,
    pub climb_body_mode: BodyMode,
}

impl Default for MovementSettings {
    fn default() -> Self {
        MovementSettings {
            walk_speed: PLAYER_WALK_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            climb_speed: PLAYER_CLIMB_SPEED,
            climb_dist_epsilon: CLIMB_DIST_EPSILON,
            standing_speed_threshold: STANDING_SPEED_THRESHOLD,
            contact_tolerance: CONTACT_TOLERANCE,
            left_block_rule: LeftBlockRule::default(),
            climb_body_mode: BodyMode::default(),
        }
    }
}
