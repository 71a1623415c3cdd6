use bevy::{prelude::Component, reflect::Reflect};

use super::climbable::ClimbableRef;

/// Per-frame scratch filled by overlap detection and cleared by the locomotion update.
#[derive(Debug, Default, Component, Reflect)]
pub struct FrameInteractions {
    pub can_climb: bool,
    pub can_build: bool,
    pub climbable: Option<ClimbableRef>,
}

impl FrameInteractions {
    pub fn allow_climbing(&mut self, climbable: ClimbableRef) {
        self.can_climb = true;
        self.climbable = Some(climbable);
    }

    pub fn allow_building(&mut self) {
        self.can_build = true;
    }

    /// Drops this frame's flags. The climbable reference is kept; it is only read
    /// while a climb is in progress, which needs a fresh detection anyway.
    pub fn reset(&mut self) {
        self.can_climb = false;
        self.can_build = false;
    }
}
