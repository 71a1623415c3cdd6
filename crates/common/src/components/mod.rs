pub mod buildable;
pub mod checkpoint;
pub mod climb;
pub mod climbable;
pub mod ground_detector;
pub mod interaction;
pub mod player;
pub mod tool;
