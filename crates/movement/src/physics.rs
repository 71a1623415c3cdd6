use bevy::{ecs::system::SystemParam, log::debug, prelude::{Entity, EulerRot, EventReader, GlobalTransform, Query, Res, Vec2, With}};
use bevy_rapier2d::{parry::{math::{Isometry, Point, Real, Vector}, query::{self, PointQuery}}, prelude::{Collider, CollisionEvent, RapierContext}};
use kc_common::components::{climb::ClimbSession, ground_detector::GroundDetector, player::Player};

use crate::{body::{to_screen, to_world}, settings::{LeftBlockRule, MovementSettings}};

// Signed distances are only used near the character; beyond this the surface is "far".
const SIGNED_DISTANCE_RANGE: Real = 10_000.0;

/// Result of a signed-distance query, in screen space.
///
/// `axis` points from the first shape toward the second and `distance` is
/// negative while the shapes overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedDistance {
    pub distance: f32,
    pub witness_a: Vec2,
    pub witness_b: Vec2,
    pub axis: Vec2,
}

/// Geometric questions the controller asks about the character's shape.
///
/// Positions are screen space. `at` is where the character's centre is
/// considered to be, which may differ from where the physics step left it.
pub trait ShapeQueries {
    fn intersects(&self, at: Vec2, other: Entity) -> bool;

    fn signed_distance(&self, surface: Entity, at: Vec2) -> Option<SignedDistance>;

    fn contains_point(&self, shape: Entity, point: Vec2) -> bool;
}

#[derive(SystemParam)]
pub struct ColliderQueries<'w, 's> {
    colliders: Query<'w, 's, (&'static Collider, &'static GlobalTransform)>,
}

impl<'w, 's> ColliderQueries<'w, 's> {
    pub fn for_character(&self, character: Entity, tolerance: f32) -> Option<CharacterQueries<'_, 'w, 's>> {
        let (shape, _) = self.colliders.get(character).ok()?;

        Some(CharacterQueries {
            colliders: &self.colliders,
            shape,
            tolerance,
        })
    }
}

pub struct CharacterQueries<'a, 'w, 's> {
    colliders: &'a Query<'w, 's, (&'static Collider, &'static GlobalTransform)>,
    shape: &'a Collider,
    tolerance: f32,
}

fn isometry(translation: Vec2, angle: f32) -> Isometry<Real> {
    Isometry::new(Vector::new(translation.x, translation.y), angle)
}

fn pose(transform: &GlobalTransform) -> Isometry<Real> {
    let (_, rotation, translation) = transform.to_scale_rotation_translation();
    let (_, _, angle) = rotation.to_euler(EulerRot::XYZ);
    isometry(translation.truncate(), angle)
}

impl<'a, 'w, 's> CharacterQueries<'a, 'w, 's> {
    fn character_pose(&self, at: Vec2) -> Isometry<Real> {
        isometry(to_world(at), 0.0)
    }
}

impl<'a, 'w, 's> ShapeQueries for CharacterQueries<'a, 'w, 's> {
    fn intersects(&self, at: Vec2, other: Entity) -> bool {
        let Ok((other_shape, other_transform)) = self.colliders.get(other) else {
            return false;
        };

        match query::distance(&self.character_pose(at), &*self.shape.raw, &pose(other_transform), &*other_shape.raw) {
            Ok(distance) => distance <= self.tolerance,
            Err(..) => false,
        }
    }

    fn signed_distance(&self, surface: Entity, at: Vec2) -> Option<SignedDistance> {
        let (surface_shape, surface_transform) = self.colliders.get(surface).ok()?;

        let contact = query::contact(
            &pose(surface_transform),
            &*surface_shape.raw,
            &self.character_pose(at),
            &*self.shape.raw,
            SIGNED_DISTANCE_RANGE,
        ).ok()??;

        Some(SignedDistance {
            distance: contact.dist,
            witness_a: to_screen(Vec2::new(contact.point1.x, contact.point1.y)),
            witness_b: to_screen(Vec2::new(contact.point2.x, contact.point2.y)),
            axis: to_screen(Vec2::new(contact.normal1.x, contact.normal1.y)),
        })
    }

    fn contains_point(&self, shape: Entity, point: Vec2) -> bool {
        let Ok((collider, transform)) = self.colliders.get(shape) else {
            return false;
        };

        let world = to_world(point);
        collider.raw.contains_point(&pose(transform), &Point::new(world.x, world.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Ground,
    RightBlocked,
    LeftBlocked,
    Ignored,
}

/// Sorts one contact into ground or wall memory. `normal` is in screen space and
/// points from the character toward `other`. Contacts never clear anything.
pub fn classify_contact(
    ground: &mut GroundDetector,
    is_climbing: bool,
    normal: Vec2,
    other: Entity,
    left_block_rule: LeftBlockRule,
) -> ContactKind {
    if normal.y > 0.0 && normal.y > normal.x {
        ground.land_on(other);
        return ContactKind::Ground;
    }

    if ground.is_on_ground() || is_climbing {
        return ContactKind::Ignored;
    }

    if normal.x > 0.0 {
        ground.right_blocking_shape = Some(other);
        ContactKind::RightBlocked
    } else if left_block_rule.blocks_left(normal.x) {
        ground.left_blocking_shape = Some(other);
        ContactKind::LeftBlocked
    } else {
        ContactKind::Ignored
    }
}

pub fn classify_contacts(
    mut collision_events: EventReader<CollisionEvent>,
    mut q_player: Query<(Entity, &mut GroundDetector, &ClimbSession), With<Player>>,
    rapier_context: Res<RapierContext>,
    settings: Res<MovementSettings>,
) {
    for event in collision_events.iter() {
        let CollisionEvent::Started(collider1, collider2, _) = *event else {
            continue;
        };

        for (player, mut ground, climb) in q_player.iter_mut() {
            let other = if collider1 == player {
                collider2
            } else if collider2 == player {
                collider1
            } else {
                continue;
            };

            // Sensor pairs have no contact manifold.
            let Some(contact_pair) = rapier_context.contact_pair(collider1, collider2) else {
                continue;
            };
            let Some(manifold) = contact_pair.manifold(0) else {
                continue;
            };

            let mut normal = manifold.normal();
            if contact_pair.collider1() != player {
                normal = -normal;
            }

            let kind = classify_contact(&mut ground, climb.is_climbing, to_screen(normal), other, settings.left_block_rule);
            if kind == ContactKind::Ground {
                debug!("Setting on_ground to true");
            }
        }
    }
}
