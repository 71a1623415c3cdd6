use bevy::{prelude::Component, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Facing {
    Left,
    #[default] Right,
}

#[derive(Component, InspectorOptions, Default, Reflect)]
#[reflect(InspectorOptions)]
pub struct Player {
    pub facing: Facing,
}
