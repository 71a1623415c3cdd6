use bevy::prelude::{Plugin, App, Update, IntoSystemConfigs};
use building::{tool_controls, apply_buildable_extent};
use interaction::detect_interactables;
use kc_core::animation::AnimationSet;
use locomotion::{locomotion_controls, sync_facing, LocomotionState};
use physics::classify_contacts;
use settings::{MovementSettings, LeftBlockRule};
use body::BodyMode;
use input::KeyBindings;

pub mod body;
pub mod building;
pub mod climbing;
pub mod horizontal;
pub mod input;
pub mod interaction;
pub mod jumping;
pub mod locomotion;
pub mod physics;
pub mod settings;

#[cfg(test)]
mod test_support;

#[derive(Debug, Default)]
pub struct MovementPlugin {}

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<KeyBindings>()
            .init_resource::<MovementSettings>()
            .register_type::<MovementSettings>()
            .register_type::<LeftBlockRule>()
            .register_type::<BodyMode>()
            .register_type::<LocomotionState>()
            .add_systems(Update, (
                classify_contacts,
                detect_interactables,
                locomotion_controls,
                sync_facing,
                tool_controls,
                apply_buildable_extent,
            ).chain().before(AnimationSet));
    }
}
