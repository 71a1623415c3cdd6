use bevy::{prelude::{App, default, Commands, ResMut, Assets, Res, AssetServer, Vec2, Transform, Startup, Query, With, Update, IntoSystemConfigs, Without, Camera, ImagePlugin}, DefaultPlugins, window::{WindowPlugin, Window, WindowResolution, PresentMode}, sprite::{TextureAtlas, SpriteSheetBundle, TextureAtlasSprite}, utils::HashMap, ecs::schedule::ExecutorKind};
use bevy::prelude::PluginGroup;

use bevy_framepace::{FramepacePlugin, FramepaceSettings, Limiter};
use bevy_rapier2d::prelude::{RigidBody, Collider, Velocity, LockedAxes, ActiveEvents, ColliderMassProperties};
use checkpoints::{activate_checkpoints, checkpoint_sprites_handle};
use kc_common::{CommonPlugin, components::{player::Player, ground_detector::GroundDetector, climb::ClimbSession, interaction::FrameInteractions}};
use kc_core::{CorePlugin, animation::{Animation, AnimationState, Animator, AnimationSet}, camera::CameraSettings};
use kc_movement::{MovementPlugin, locomotion::LocomotionStatus};
use kc_util::constants::{WINDOW_TITLE, INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT, SIMULATION_FPS, PLAYER_WIDTH, PLAYER_HEIGHT, PLAYER_MASS, PLAYER_CAMERA_MARGIN_X, PLAYER_CAMERA_MARGIN_Y, ANIMATION_TICKS_PER_FRAME};
use level::{spawn_level, LevelBounds};
use settings::{load_movement_settings, save_movement_settings};

pub mod checkpoints;
pub mod level;
pub mod settings;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
              title: WINDOW_TITLE.to_string(),
              resizable: true,
              resolution: WindowResolution::new(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT),
              present_mode: PresentMode::AutoVsync,
              ..default()
            }),
            ..default()
        }).set(ImagePlugin::default_nearest()))
        .add_plugins(FramepacePlugin)
        .add_plugins(CommonPlugin {})
        .add_plugins(CorePlugin {})
        .add_plugins(MovementPlugin {})
        .insert_resource(FramepaceSettings {
            limiter: Limiter::from_framerate(SIMULATION_FPS)
        })
        .init_resource::<LevelBounds>()
        .edit_schedule(Update, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });

    load_movement_settings(&mut app);

    app
        .add_systems(Startup, (spawn_level, spawn_player))
        .add_systems(Update, (
            activate_checkpoints,
            checkpoint_sprites_handle,
            follow_player_with_camera,
        ).chain().after(AnimationSet))
        .add_systems(Update, save_movement_settings);

    app.run();
}

fn spawn_player(
    mut commands: Commands,
    mut texture_atlases: ResMut<Assets<TextureAtlas>>,
    asset_server: Res<AssetServer>,
) {
    let texture_handle = asset_server.load("sprites/player.png");
    let texture_atlas = TextureAtlas::from_grid(
        texture_handle,
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        8,
        1,
        None,
        None,
    );

    let texture_atlas_handle = texture_atlases.add(texture_atlas);

    let mut animations = HashMap::new();

    animations.insert(AnimationState::Stand, Animation {
        frames: vec![0],
        looping: true,
        ticks_per_frame: ANIMATION_TICKS_PER_FRAME,
    });

    animations.insert(AnimationState::Walk, Animation {
        frames: (1..6).collect(),
        looping: true,
        ticks_per_frame: ANIMATION_TICKS_PER_FRAME,
    });

    animations.insert(AnimationState::Jump, Animation {
        frames: vec![6, 7],
        looping: false,
        ticks_per_frame: ANIMATION_TICKS_PER_FRAME,
    });

    commands.spawn((
        SpriteSheetBundle {
            texture_atlas: texture_atlas_handle,
            sprite: TextureAtlasSprite::new(0),
            transform: Transform::from_xyz(-80.0, PLAYER_HEIGHT / 2.0 + 4.0, 1.0),
            ..default()
        },
        RigidBody::Dynamic,
        Velocity::zero(),
        Collider::cuboid(PLAYER_WIDTH / 4.0, PLAYER_HEIGHT / 2.0),
        ColliderMassProperties::Mass(PLAYER_MASS),
        LockedAxes::ROTATION_LOCKED,
        ActiveEvents::COLLISION_EVENTS,
        Player::default(),
        GroundDetector::default(),
        ClimbSession::default(),
        FrameInteractions::default(),
        LocomotionStatus::default(),
        Animator::new(animations),
    ));
}

pub fn follow_player_with_camera(
    q_player: Query<&Transform, (With<Player>, Without<Camera>)>,
    mut q_camera: Query<&mut Transform, With<Camera>>,
    camera_settings: Res<CameraSettings>,
    level_bounds: Res<LevelBounds>,
) {
    let Ok(player) = q_player.get_single() else {
        return;
    };

    let Ok(mut camera) = q_camera.get_single_mut() else {
        return;
    };

    let half_view = Vec2::new(camera_settings.view_width, camera_settings.view_height) / 2.0;
    let x_margin = camera_settings.view_width * ((PLAYER_CAMERA_MARGIN_X as f32 / 2.0) / 100.0);
    let y_margin = camera_settings.view_height * ((PLAYER_CAMERA_MARGIN_Y as f32 / 2.0) / 100.0);

    let left_edge = camera.translation.x - x_margin;
    let right_edge = camera.translation.x + x_margin;

    let top_edge = camera.translation.y + y_margin;
    let bottom_edge = camera.translation.y - y_margin;

    let mut new_pos_x = camera.translation.x;

    if player.translation.x < left_edge {
        new_pos_x = camera.translation.x - (left_edge - player.translation.x);
    }

    if player.translation.x > right_edge {
        new_pos_x = camera.translation.x + player.translation.x - right_edge;
    }

    let mut new_pos_y = camera.translation.y;

    if player.translation.y > top_edge {
        new_pos_y = camera.translation.y + (player.translation.y - top_edge);
    }

    if player.translation.y < bottom_edge {
        new_pos_y = camera.translation.y - (bottom_edge - player.translation.y);
    }

    // A level smaller than the view keeps the camera centred on it.
    let min = level_bounds.min + half_view;
    let max = (level_bounds.max - half_view).max(min);

    camera.translation.x = new_pos_x.clamp(min.x, max.x);
    camera.translation.y = new_pos_y.clamp(min.y, max.y);
}
