use bevy::{prelude::*, window::PrimaryWindow};

#[derive(Component, Debug, Default)]
pub struct MainCamera {}

fn spawn_camera(
    mut commands: Commands,
) {
    commands.spawn((
        Camera2dBundle::default(),
        MainCamera {},
    ));
}

pub fn auto_scale_sys(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut query: Query<&mut OrthographicProjection, With<MainCamera>>,
    settings: Res<CameraSettings>,
) {
    let Ok(window) = window_query.get_single() else {
        return;
    };

    for mut projection in query.iter_mut() {
        let scale = (settings.view_height / window.height()).max(settings.view_width / window.width());
        if projection.scale != scale {
            projection.scale = scale;
        }
    }
}

/// World units that must stay visible whatever the window size.
#[derive(Resource, Debug, Clone)]
pub struct CameraSettings {
    pub view_width: f32,
    pub view_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            view_width: 1536.0,
            view_height: 1024.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct CameraPlugin {}

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(ClearColor(Color::rgb(1.0, 1.0, 1.0)))
            .init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, auto_scale_sys);
    }
}
