pub mod boat;
pub mod camera;
pub mod particles;

pub use boat::*;
pub use camera::*;
pub use particles::*;
