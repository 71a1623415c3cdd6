use bevy::prelude::{Plugin, App};
use components::{player::Player, checkpoint::{Checkpoint, CheckpointManager}, climb::ClimbSession, climbable::Climbable, buildable::Buildable, tool::Tool, interaction::FrameInteractions, ground_detector::GroundDetector};

pub mod components;

#[derive(Debug, Default)]
pub struct CommonPlugin {}

impl Plugin for CommonPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<CheckpointManager>()
            .register_type::<Checkpoint>()
            .register_type::<Player>()
            .register_type::<GroundDetector>()
            .register_type::<ClimbSession>()
            .register_type::<FrameInteractions>()
            .register_type::<Climbable>()
            .register_type::<Buildable>()
            .register_type::<Tool>();
    }
}
