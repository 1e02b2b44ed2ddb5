pub mod boat;
pub mod camera;
pub mod effects;
