use bevy::{prelude::{Component, Entity}, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};

/// Marks a collider the player can climb.
#[derive(Debug, Default, Clone, Copy, Component, InspectorOptions, Reflect)]
#[reflect(InspectorOptions)]
pub struct Climbable {
    /// Screen-space offset from the character centre to the point that must stay
    /// inside the climbable collider. Negative values grip above the centre.
    pub grip_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ClimbableRef {
    pub surface: Entity,
    pub grip_offset: f32,
}

impl ClimbableRef {
    pub fn new(surface: Entity, climbable: &Climbable) -> ClimbableRef {
        ClimbableRef {
            surface,
            grip_offset: climbable.grip_offset,
        }
    }
}
