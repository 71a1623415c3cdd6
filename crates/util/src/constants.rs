pub const WINDOW_TITLE: &str = "Knit Climber";
pub const INITIAL_WINDOW_WIDTH: f32 = 1024.0;
pub const INITIAL_WINDOW_HEIGHT: f32 = 768.0;

pub const SIMULATION_FPS: f64 = 60.0;
pub const PIXELS_PER_METER: f32 = 64.0;
pub const GRAVITY: f32 = 1400.0;

pub const PLAYER_WIDTH: f32 = 64.0;
pub const PLAYER_HEIGHT: f32 = 128.0;
pub const PLAYER_MASS: f32 = 4.0;

pub const PLAYER_WALK_SPEED: f32 = 240.0;
pub const PLAYER_JUMP_SPEED: f32 = 560.0;
// Climbing moves the body directly, so this is pixels per tick.
pub const PLAYER_CLIMB_SPEED: f32 = 2.0;
pub const CLIMB_DIST_EPSILON: f32 = 0.05;
pub const STANDING_SPEED_THRESHOLD: f32 = 1.0;
pub const CONTACT_TOLERANCE: f32 = 0.5;
// Level climbables are gripped just above the soles, so a climb ends standing on the top.
pub const CLIMB_GRIP_OFFSET: f32 = PLAYER_HEIGHT / 2.0 - 8.0;

pub const BUILD_STEP: f32 = 2.0;
pub const BUILDABLE_MIN_THICKNESS: f32 = 1.0;

// 100ms per frame at 60 ticks per second.
pub const ANIMATION_TICKS_PER_FRAME: u32 = 6;

pub const PLAYER_CAMERA_MARGIN_X: usize = 10; // 10% of the width from the center
pub const PLAYER_CAMERA_MARGIN_Y: usize = 10; // 10% of the height from the center
