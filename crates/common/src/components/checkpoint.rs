use bevy::{prelude::{Component, Resource, Vec2}, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};

#[derive(Component, InspectorOptions, Default, Reflect)]
#[reflect(InspectorOptions)]
pub struct Checkpoint {
    pub is_active: bool,
}

/// Remembers where the player returns to on reset, in world coordinates.
#[derive(Resource, Debug, Default)]
pub struct CheckpointManager {
    last_position: Option<Vec2>,
}

impl CheckpointManager {
    pub fn save(&mut self, position: Vec2) {
        self.last_position = Some(position);
    }

    pub fn reset_position(&self) -> Option<Vec2> {
        self.last_position
    }
}
