use bevy::{prelude::{Component, Entity}, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};

/// A trigger the player stands in to build the structure it is bound to.
#[derive(Debug, Default, Clone, Component, InspectorOptions, Reflect)]
#[reflect(InspectorOptions)]
pub struct Tool {
    pub buildable: Option<Entity>,
}

impl Tool {
    pub fn bound_to(buildable: Entity) -> Tool {
        Tool { buildable: Some(buildable) }
    }
}
