use bevy::prelude::{Plugin, App, Vec2, default};
use bevy_rapier2d::{prelude::{RapierPhysicsPlugin, NoUserData, RapierConfiguration}, render::RapierDebugRenderPlugin};
use kc_util::constants::{PIXELS_PER_METER, GRAVITY};

#[derive(Debug, Default)]
pub struct PhysicsPlugin {}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app
        .insert_resource(RapierConfiguration {
            gravity: Vec2::new(0.0, -GRAVITY),
            ..default()
        })
        .add_plugins(RapierDebugRenderPlugin::default())
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER));
    }
}
