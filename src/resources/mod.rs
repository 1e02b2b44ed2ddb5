pub mod boat_config;

pub use boat_config::*;
