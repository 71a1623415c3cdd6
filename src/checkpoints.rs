use bevy::{log::info, prelude::{Color, Entity, Query, Res, ResMut, Sprite, Transform, Vec2, With, Changed}};
use bevy_rapier2d::prelude::{Collider, QueryFilter, QueryFilterFlags, RapierContext};
use kc_common::components::{checkpoint::{Checkpoint, CheckpointManager}, player::Player};

fn half_height(collider: &Collider) -> f32 {
    collider.as_cuboid().map_or(0.0, |cuboid| cuboid.half_extents().y)
}

/// Where a player with `player_collider` stands on the floor under a checkpoint.
pub fn standing_position(checkpoint: Vec2, checkpoint_collider: &Collider, player_collider: &Collider) -> Vec2 {
    checkpoint - Vec2::new(0.0, half_height(checkpoint_collider) - half_height(player_collider))
}

pub fn activate_checkpoints(
    q_player: Query<(Entity, &Transform, &Collider), With<Player>>,
    mut q_checkpoints: Query<(Entity, &mut Checkpoint, &Transform, &Collider)>,
    rapier_context: Res<RapierContext>,
    mut checkpoint_manager: ResMut<CheckpointManager>,
) {
    for (player, transform, collider) in q_player.iter() {
        let filter = QueryFilter {
            flags: QueryFilterFlags::EXCLUDE_SOLIDS,
            ..QueryFilter::new().exclude_collider(player)
        };

        let mut touched = None;
        rapier_context.intersections_with_shape(transform.translation.truncate(), 0.0, collider, filter, |entity| {
            if q_checkpoints.get(entity).is_ok_and(|(_, checkpoint, _, _)| !checkpoint.is_active) {
                touched = Some(entity);
                return false;
            }
            true
        });

        let Some(touched) = touched else {
            continue;
        };

        for (entity, mut checkpoint, checkpoint_transform, checkpoint_collider) in q_checkpoints.iter_mut() {
            checkpoint.is_active = entity == touched;

            if checkpoint.is_active {
                let position = standing_position(checkpoint_transform.translation.truncate(), checkpoint_collider, collider);
                checkpoint_manager.save(position);
                info!("Checkpoint activated at {}", position);
            }
        }
    }
}

pub fn checkpoint_sprites_handle(
    mut q_checkpoints: Query<(&mut Sprite, &Checkpoint), Changed<Checkpoint>>,
) {
    for (mut sprite, checkpoint) in q_checkpoints.iter_mut() {
        sprite.color = if checkpoint.is_active {
            Color::rgb(0.3, 0.8, 0.4)
        } else {
            Color::rgb(0.6, 0.6, 0.6)
        };
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::{hierarchy::HierarchyPlugin, prelude::{default, App, GlobalTransform, MinimalPlugins, TransformBundle, Update}, transform::TransformPlugin};
    use bevy_rapier2d::prelude::{GravityScale, NoUserData, RapierConfiguration, RapierPhysicsPlugin, RigidBody, Sensor, TimestepMode};
    use kc_util::constants::{PIXELS_PER_METER, PLAYER_HEIGHT, PLAYER_WIDTH};

    use super::*;

    fn placed(x: f32, y: f32) -> TransformBundle {
        let local = Transform::from_xyz(x, y, 0.0);
        TransformBundle { local, global: GlobalTransform::from(local) }
    }

    fn player_collider() -> Collider {
        Collider::cuboid(PLAYER_WIDTH / 4.0, PLAYER_HEIGHT / 2.0)
    }

    fn checkpoint_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransformPlugin, HierarchyPlugin))
            .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER))
            .insert_resource(RapierConfiguration {
                gravity: Vec2::ZERO,
                timestep_mode: TimestepMode::Fixed { dt: 1.0 / 60.0, substeps: 1 },
                ..default()
            })
            .init_resource::<CheckpointManager>()
            .add_systems(Update, activate_checkpoints);
        app
    }

    fn spawn_checkpoint(app: &mut App, x: f32, is_active: bool) -> Entity {
        // Same shape as the level's checkpoints: 96 px tall, base on the floor at y = 0.
        app.world.spawn((placed(x, 48.0), Collider::cuboid(8.0, 48.0), Sensor, Checkpoint { is_active })).id()
    }

    #[test]
    fn the_player_stands_on_the_checkpoint_floor() {
        let position = standing_position(Vec2::new(600.0, 464.0), &Collider::cuboid(8.0, 48.0), &player_collider());

        assert_relative_eq!(position.x, 600.0);
        assert_relative_eq!(position.y, 416.0 + PLAYER_HEIGHT / 2.0);
    }

    #[test]
    fn touching_a_checkpoint_activates_it_and_saves_where_to_stand() {
        let mut app = checkpoint_app();
        let old = spawn_checkpoint(&mut app, -400.0, true);
        let touched = spawn_checkpoint(&mut app, 10.0, false);
        app.world.spawn((placed(0.0, PLAYER_HEIGHT / 2.0), RigidBody::Dynamic, GravityScale(0.0), player_collider(), Player::default()));

        for _ in 0..3 {
            app.update();
        }

        let saved = app.world.resource::<CheckpointManager>().reset_position();
        assert_eq!(saved, Some(Vec2::new(10.0, PLAYER_HEIGHT / 2.0)));
        assert!(app.world.get::<Checkpoint>(touched).is_some_and(|checkpoint| checkpoint.is_active));
        assert!(app.world.get::<Checkpoint>(old).is_some_and(|checkpoint| !checkpoint.is_active));
    }

    #[test]
    fn an_out_of_reach_checkpoint_saves_nothing() {
        let mut app = checkpoint_app();
        let far = spawn_checkpoint(&mut app, 300.0, false);
        app.world.spawn((placed(0.0, PLAYER_HEIGHT / 2.0), RigidBody::Dynamic, GravityScale(0.0), player_collider(), Player::default()));

        for _ in 0..3 {
            app.update();
        }

        assert_eq!(app.world.resource::<CheckpointManager>().reset_position(), None);
        assert!(app.world.get::<Checkpoint>(far).is_some_and(|checkpoint| !checkpoint.is_active));
    }
}
