use bevy::{prelude::{Plugin, App, KeyCode}, input::common_conditions::input_toggle_active};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use camera::CameraPlugin;
use animation::AnimationPlugin;

use self::physics::PhysicsPlugin;

pub mod animation;
pub mod camera;
pub mod physics;

#[derive(Debug, Default)]
pub struct CorePlugin {}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .add_plugins(
                WorldInspectorPlugin::default().run_if(input_toggle_active(false, KeyCode::Grave)),
            )
            .add_plugins(AnimationPlugin {})
            .add_plugins(CameraPlugin {})
            .add_plugins(PhysicsPlugin {});
    }
}
