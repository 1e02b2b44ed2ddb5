use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::components::boat::{BoatKinematics, PlayerBoat};
use crate::components::camera::{CameraMode, CameraRig, DevOrbit, MainCamera};
use crate::events::CameraModeChangedEvent;
use crate::plugins::input::PlayerAction;

/// First-person pitch clamp (~72 degrees) to avoid flipping over the pole.
const PITCH_LIMIT: f32 = 1.25;

const MOUSE_SENSITIVITY: f32 = 0.002;
const ORBIT_SENSITIVITY: f32 = 0.005;
const ORBIT_ZOOM_SPEED: f32 = 1.5;
const ORBIT_DISTANCE_RANGE: (f32, f32) = (10.0, 400.0);

/// Computes the camera transform for a rig mode from the boat's position and
/// heading. Pure so mode behavior can be tested without a world.
pub fn place_camera(transform: &mut Transform, rig: &CameraRig, boat_position: Vec3, heading: f32) {
    let yaw = Quat::from_rotation_y(heading);
    match rig.mode {
        CameraMode::Follow => {
            transform.translation = boat_position + yaw * CameraMode::Follow.offset();
            let ahead = boat_position + yaw * Vec3::new(0.0, 0.0, 10.0);
            transform.look_at(ahead, Vec3::Y);
        }
        CameraMode::FirstPerson => {
            transform.translation = boat_position + yaw * CameraMode::FirstPerson.offset();
            let look_yaw = heading + rig.look_yaw;
            let pitch = rig.look_pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            let direction = Vec3::new(
                look_yaw.sin() * pitch.cos(),
                pitch.sin(),
                look_yaw.cos() * pitch.cos(),
            );
            transform.look_to(direction, Vec3::Y);
        }
        CameraMode::Overhead => {
            transform.translation = boat_position + CameraMode::Overhead.offset();
            // Straight down; use the boat's forward as the up reference so
            // the framing turns with the boat.
            transform.look_at(boat_position, yaw * Vec3::Z);
        }
    }
}

/// Cycles Follow -> FirstPerson -> Overhead on the camera action and
/// repositions immediately, with no transition animation.
pub fn cycle_camera_mode(
    mut cameras: Query<(&ActionState<PlayerAction>, &mut CameraRig, &mut Transform), With<MainCamera>>,
    boats: Query<(&Transform, &BoatKinematics), (With<PlayerBoat>, Without<MainCamera>)>,
    mut changes: EventWriter<CameraModeChangedEvent>,
) {
    let Ok((action_state, mut rig, mut transform)) = cameras.get_single_mut() else {
        return;
    };
    if !action_state.just_pressed(&PlayerAction::CycleCamera) {
        return;
    }
    rig.mode = rig.mode.next();
    rig.look_yaw = 0.0;
    rig.look_pitch = 0.0;
    info!("Camera mode: {:?}", rig.mode);
    changes.send(CameraModeChangedEvent { mode: rig.mode });

    if let Ok((boat_transform, kin)) = boats.get_single() {
        place_camera(&mut transform, &rig, boat_transform.translation, kin.heading);
    }
}

/// Accumulates mouse look in first-person mode. Other modes (and the dev
/// orbit) ignore mouse motion here.
pub fn first_person_look(
    mut motion: EventReader<MouseMotion>,
    mut cameras: Query<(&mut CameraRig, &DevOrbit), With<MainCamera>>,
) {
    let Ok((mut rig, orbit)) = cameras.get_single_mut() else {
        motion.clear();
        return;
    };
    if rig.mode != CameraMode::FirstPerson || orbit.active {
        motion.clear();
        return;
    }
    for event in motion.read() {
        rig.look_yaw -= event.delta.x * MOUSE_SENSITIVITY;
        rig.look_pitch =
            (rig.look_pitch - event.delta.y * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// Applies the rig every frame unless the dev orbit owns the camera.
pub fn update_camera_rig(
    mut cameras: Query<(&mut Transform, &CameraRig, &DevOrbit), With<MainCamera>>,
    boats: Query<(&Transform, &BoatKinematics), (With<PlayerBoat>, Without<MainCamera>)>,
) {
    let Ok((mut transform, rig, orbit)) = cameras.get_single_mut() else {
        return;
    };
    if orbit.active {
        return;
    }
    let Ok((boat_transform, kin)) = boats.get_single() else {
        return;
    };
    place_camera(&mut transform, rig, boat_transform.translation, kin.heading);
}

/// Toggles the free orbit camera. On enable, the orbit adopts the current
/// camera offset around the boat so there is no visual jump; the target is
/// frozen there while the boat sails on.
pub fn toggle_dev_orbit(
    mut cameras: Query<(&ActionState<PlayerAction>, &mut DevOrbit, &Transform), With<MainCamera>>,
    boats: Query<&Transform, (With<PlayerBoat>, Without<MainCamera>)>,
) {
    let Ok((action_state, mut orbit, transform)) = cameras.get_single_mut() else {
        return;
    };
    if !action_state.just_pressed(&PlayerAction::ToggleDevCamera) {
        return;
    }
    orbit.active = !orbit.active;
    info!(
        "Dev orbit camera {}",
        if orbit.active { "enabled" } else { "disabled" }
    );
    if !orbit.active {
        return;
    }

    orbit.target = boats
        .get_single()
        .map(|t| t.translation)
        .unwrap_or(Vec3::ZERO);
    let offset = transform.translation - orbit.target;
    let distance = offset.length();
    orbit.distance = distance.clamp(ORBIT_DISTANCE_RANGE.0, ORBIT_DISTANCE_RANGE.1);
    if distance > 1e-3 {
        orbit.yaw = offset.x.atan2(offset.z);
        orbit.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
    }
}

/// Free orbit controls: drag to rotate, scroll to zoom. Owns the camera
/// exclusively while active.
pub fn update_dev_orbit(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut cameras: Query<(&ActionState<PlayerAction>, &mut DevOrbit, &mut Transform), With<MainCamera>>,
) {
    let Ok((action_state, mut orbit, mut transform)) = cameras.get_single_mut() else {
        return;
    };
    if !orbit.active {
        motion.clear();
        return;
    }

    if buttons.pressed(MouseButton::Left) {
        for event in motion.read() {
            orbit.yaw -= event.delta.x * ORBIT_SENSITIVITY;
            orbit.pitch = (orbit.pitch + event.delta.y * ORBIT_SENSITIVITY).clamp(-0.2, 1.45);
        }
    } else {
        motion.clear();
    }

    let zoom = action_state.value(&PlayerAction::CameraZoom);
    if zoom != 0.0 {
        orbit.distance = (orbit.distance * (1.0 - zoom * ORBIT_ZOOM_SPEED * time.delta_secs()))
            .clamp(ORBIT_DISTANCE_RANGE.0, ORBIT_DISTANCE_RANGE.1);
    }

    let direction = Vec3::new(
        orbit.yaw.sin() * orbit.pitch.cos(),
        orbit.pitch.sin(),
        orbit.yaw.cos() * orbit.pitch.cos(),
    );
    transform.translation = orbit.target + direction * orbit.distance;
    transform.look_at(orbit.target, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_cycle_closes_after_three_steps() {
        let start = CameraMode::Follow;
        let cycled = start.next().next().next();
        assert_eq!(cycled, start);
        // Cycle closure: the offset after a full cycle equals the original.
        assert_eq!(cycled.offset(), start.offset());
    }

    #[test]
    fn follow_camera_sits_behind_the_boat() {
        let rig = CameraRig::default();
        let mut transform = Transform::default();
        let boat_position = Vec3::new(10.0, 2.0, 30.0);
        place_camera(&mut transform, &rig, boat_position, 0.0);
        // Heading 0 points along +Z, so "behind" is -Z.
        assert!((transform.translation - (boat_position + Vec3::new(0.0, 8.0, -25.0))).length() < 1e-4);
        // The camera faces forward, toward the look-ahead point.
        assert!(transform.forward().z > 0.0);
    }

    #[test]
    fn follow_offset_rotates_with_heading() {
        let rig = CameraRig::default();
        let mut transform = Transform::default();
        let heading = std::f32::consts::FRAC_PI_2;
        place_camera(&mut transform, &rig, Vec3::ZERO, heading);
        // At heading pi/2 the boat points +X, so the camera sits at -X.
        assert!(transform.translation.x < -20.0);
        assert!(transform.translation.z.abs() < 1.0);
    }

    #[test]
    fn first_person_pitch_is_clamped() {
        let rig = CameraRig {
            mode: CameraMode::FirstPerson,
            look_yaw: 0.0,
            look_pitch: 10.0,
        };
        let mut transform = Transform::default();
        place_camera(&mut transform, &rig, Vec3::ZERO, 0.0);
        let forward = transform.forward();
        assert!(forward.y <= PITCH_LIMIT.sin() + 1e-4);
    }

    #[test]
    fn overhead_camera_looks_straight_down() {
        let rig = CameraRig {
            mode: CameraMode::Overhead,
            ..default()
        };
        let mut transform = Transform::default();
        let boat_position = Vec3::new(-4.0, 1.0, 9.0);
        place_camera(&mut transform, &rig, boat_position, 0.7);
        assert!(transform.translation.y > boat_position.y + 20.0);
        assert!(transform.forward().y < -0.99);
    }
}
