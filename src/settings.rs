use std::path::PathBuf;

use bevy::{log::{info, warn}, prelude::{App, DetectChanges, Res, ResMut}};
use bevy_persistent::{Persistent, StorageFormat};
use kc_movement::settings::MovementSettings;

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("knit-climber").join("movement.json"))
}

/// Reads movement tuning from disk, creating the file with defaults on first run.
/// Any failure leaves the defaults installed by the movement plugin in place.
pub fn load_movement_settings(app: &mut App) {
    let Some(path) = settings_path() else {
        warn!("No config directory found, using default movement settings");
        return;
    };

    let persistent = Persistent::<MovementSettings>::builder()
        .name("movement settings")
        .format(StorageFormat::Json)
        .path(path.clone())
        .default(MovementSettings::default())
        .build();

    match persistent {
        Ok(persistent) => {
            info!("Movement settings loaded from {}", path.display());
            app.insert_resource(MovementSettings::clone(&persistent));
            app.insert_resource(persistent);
        },
        Err(error) => warn!("Could not load movement settings from {}: {}, using defaults", path.display(), error),
    }
}

/// Writes inspector edits back to the settings file.
pub fn save_movement_settings(
    settings: Res<MovementSettings>,
    persistent: Option<ResMut<Persistent<MovementSettings>>>,
) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }

    let Some(mut persistent) = persistent else {
        return;
    };

    if let Err(error) = persistent.set(settings.clone()) {
        warn!("Could not save movement settings: {}", error);
    }
}
