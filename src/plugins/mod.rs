pub mod boat;
pub mod camera_rig;
pub mod core;
pub mod debug_ui;
pub mod effects;
pub mod input;
