use bevy::{prelude::{Component, Entity}, reflect::Reflect};
use bevy_inspector_egui::{InspectorOptions, prelude::ReflectInspectorOptions};

/// Sticky ground and wall contact memory of a character.
///
/// Contacts only ever set these fields. They are cleared by a jump or when the
/// per-frame geometric re-validation no longer finds the character touching
/// its remembered ground.
#[derive(Debug, Default, Component, InspectorOptions, Reflect)]
#[reflect(InspectorOptions)]
pub struct GroundDetector {
    on_ground: bool,
    ground_shape: Option<Entity>,
    pub left_blocking_shape: Option<Entity>,
    pub right_blocking_shape: Option<Entity>,
}

impl GroundDetector {
    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn ground_shape(&self) -> Option<Entity> {
        self.ground_shape
    }

    pub fn land_on(&mut self, shape: Entity) {
        self.on_ground = true;
        self.ground_shape = Some(shape);
    }

    pub fn leave_ground(&mut self) {
        self.on_ground = false;
        self.ground_shape = None;
    }

    /// The shape to re-check against, only while the character believes it is grounded.
    pub fn remembered_ground(&self) -> Option<Entity> {
        if self.on_ground { self.ground_shape } else { None }
    }
}

#[derive(Debug, Default)]
pub struct WithPrevious<T> {
    pub current: T,
    pub previous: Option<T>
}

impl<T> WithPrevious<T> {
    pub fn new(initial_value: T) -> WithPrevious<T> {
        WithPrevious {
            current: initial_value,
            previous: None,
        }
    }

    pub fn update_value(&mut self, new_value: T)
    where T: Clone, {
        self.previous = Some(self.current.clone());
        self.current = new_value;
    }

    pub fn is_same_as_previous(&self) -> bool
    where T: PartialEq {
        match &self.previous {
            Some(previous) => previous == &self.current,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_remembers_the_ground_shape() {
        let mut detector = GroundDetector::default();
        detector.land_on(Entity::from_raw(3));

        assert!(detector.is_on_ground());
        assert_eq!(detector.ground_shape(), Some(Entity::from_raw(3)));
        assert_eq!(detector.remembered_ground(), Some(Entity::from_raw(3)));
    }

    #[test]
    fn leaving_the_ground_forgets_the_shape() {
        let mut detector = GroundDetector::default();
        detector.land_on(Entity::from_raw(3));
        detector.leave_ground();

        assert!(!detector.is_on_ground());
        assert_eq!(detector.ground_shape(), None);
    }

    #[test]
    fn blocking_shapes_survive_leaving_the_ground() {
        let mut detector = GroundDetector::default();
        detector.right_blocking_shape = Some(Entity::from_raw(9));
        detector.leave_ground();

        assert_eq!(detector.right_blocking_shape, Some(Entity::from_raw(9)));
    }

    #[test]
    fn with_previous_tracks_changes() {
        let mut value = WithPrevious::new(false);
        assert!(!value.is_same_as_previous());

        value.update_value(true);
        assert!(!value.is_same_as_previous());

        value.update_value(true);
        assert!(value.is_same_as_previous());
    }
}
