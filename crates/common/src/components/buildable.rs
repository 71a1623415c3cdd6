use bevy::{prelude::Component, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};

/// A structure that a tool can grow or shrink between two height bounds.
#[derive(Debug, Clone, Component, InspectorOptions, Reflect)]
#[reflect(InspectorOptions)]
pub struct Buildable {
    pub width: f32,
    pub step: f32,
    height: f32,
    min_height: f32,
    max_height: f32,
}

impl Buildable {
    pub fn new(width: f32, min_height: f32, max_height: f32, initial_height: f32, step: f32) -> Buildable {
        let max_height = max_height.max(min_height);

        Buildable {
            width,
            step,
            height: bounded(initial_height, min_height, max_height),
            min_height,
            max_height,
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    #[cfg(test)]
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    #[cfg(test)]
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Returns whether the height changed; at the top bound this does nothing.
    pub fn grow(&mut self) -> bool {
        self.set_height(self.height + self.step)
    }

    pub fn shrink(&mut self) -> bool {
        self.set_height(self.height - self.step)
    }

    fn set_height(&mut self, height: f32) -> bool {
        let clamped = bounded(height, self.min_height, self.max_height);
        let changed = clamped != self.height;
        self.height = clamped;
        changed
    }
}

// A NaN bound is ignored instead of panicking like `f32::clamp`.
fn bounded(height: f32, min_height: f32, max_height: f32) -> f32 {
    height.max(min_height).min(max_height)
}
