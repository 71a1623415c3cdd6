use bevy::{prelude::{Component, Vec2}, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};

#[derive(Debug, Default, Component, InspectorOptions, Reflect)]
#[reflect(InspectorOptions)]
pub struct ClimbSession {
    pub is_climbing: bool,
    pub last_climb_position: Option<Vec2>,
}

impl ClimbSession {
    pub fn begin(&mut self) {
        self.is_climbing = true;
    }

    pub fn stop(&mut self) {
        self.is_climbing = false;
        self.last_climb_position = None;
    }
}
