use bevy::prelude::*;

use crate::events::CameraModeChangedEvent;
use crate::plugins::core::SimSet;
use crate::systems::camera::{
    cycle_camera_mode, first_person_look, toggle_dev_orbit, update_camera_rig, update_dev_orbit,
};

pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CameraModeChangedEvent>().add_systems(
            Update,
            (
                toggle_dev_orbit,
                cycle_camera_mode,
                first_person_look,
                update_camera_rig,
                update_dev_orbit,
            )
                .chain()
                .in_set(SimSet::Camera),
        );
    }
}
