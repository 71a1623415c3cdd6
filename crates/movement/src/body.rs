//! The controller's view of the character's rigid body.
//!
//! The controller works in screen space (+y points down). Bevy and Rapier are
//! y-up, so values cross the ECS boundary through [`to_screen`] / [`to_world`].

use bevy::{prelude::{Transform, Vec2, Quat}, reflect::Reflect};
use bevy_rapier2d::prelude::{RigidBody, Velocity};
use serde::{Deserialize, Serialize};

pub fn to_screen(world: Vec2) -> Vec2 {
    Vec2::new(world.x, -world.y)
}

pub fn to_world(screen: Vec2) -> Vec2 {
    Vec2::new(screen.x, -screen.y)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum BodyMode {
    #[default] Dynamic,
    Kinematic,
}

impl BodyMode {
    fn rigid_body(self) -> RigidBody {
        match self {
            BodyMode::Dynamic => RigidBody::Dynamic,
            BodyMode::Kinematic => RigidBody::KinematicPositionBased,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterBody {
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    mode: BodyMode,
    teleported: bool,
}

impl CharacterBody {
    pub fn new(position: Vec2, velocity: Vec2) -> CharacterBody {
        CharacterBody {
            position,
            velocity,
            rotation: 0.0,
            mode: BodyMode::Dynamic,
            teleported: false,
        }
    }

    pub fn from_components(transform: &Transform, velocity: &Velocity, rigid_body: &RigidBody) -> CharacterBody {
        let mode = match rigid_body {
            RigidBody::Dynamic => BodyMode::Dynamic,
            _ => BodyMode::Kinematic,
        };
        let (_, _, angle) = transform.rotation.to_euler(bevy::prelude::EulerRot::XYZ);

        CharacterBody {
            position: to_screen(transform.translation.truncate()),
            velocity: to_screen(velocity.linvel),
            rotation: -angle,
            mode,
            teleported: false,
        }
    }

    /// Writes the frame's result back, touching only what the update changed so
    /// Rapier does not resync untouched bodies.
    pub fn write_back(&self, transform: &mut Transform, velocity: &mut Velocity, rigid_body: &mut RigidBody) {
        if self.teleported {
            let world = to_world(self.position);
            transform.translation.x = world.x;
            transform.translation.y = world.y;
        }

        let rotation = Quat::from_rotation_z(-self.rotation);
        if transform.rotation != rotation {
            transform.rotation = rotation;
            velocity.angvel = 0.0;
        }

        velocity.linvel = to_world(self.velocity);

        let mode = self.mode.rigid_body();
        if *rigid_body != mode {
            *rigid_body = mode;
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn mode(&self) -> BodyMode {
        self.mode
    }

    pub fn teleported(&self) -> bool {
        self.teleported
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    pub fn set_mode(&mut self, mode: BodyMode) {
        self.mode = mode;
    }

    pub fn set_as_dynamic(&mut self) {
        self.mode = BodyMode::Dynamic;
    }

    /// Kinematic override: places the body without going through the solver.
    ///
    /// Nothing sweeps the path between the old and new position, so a step
    /// larger than a wall's thickness tunnels through it.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.teleported = true;
    }
}
