//! Camera movement: continuous arrow-key stepping plus discrete drag
//! panning, always re-aimed at the room's fixed focus point. Position is
//! deliberately unclamped; the camera may pass through geometry.

use crate::controller::input::InputState;
use crate::model::camera::{Camera, LOOK_TARGET};

pub struct CameraRig {
    /// World units added per frame per held arrow key.
    pub move_step: f32,
    /// World units per pixel of pointer drag.
    pub drag_scale: f32,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            move_step: 0.01,
            drag_scale: 0.01,
        }
    }

    /// Per-frame keyboard movement. Held keys contribute additively and
    /// independently; the look target is re-applied every frame.
    pub fn step_keys(&self, camera: &mut Camera, input: &InputState) {
        if input.is_key_pressed("ArrowUp") {
            camera.eye.z -= self.move_step;
        }
        if input.is_key_pressed("ArrowDown") {
            camera.eye.z += self.move_step;
        }
        if input.is_key_pressed("ArrowLeft") {
            camera.eye.x -= self.move_step;
        }
        if input.is_key_pressed("ArrowRight") {
            camera.eye.x += self.move_step;
        }
        camera.look_at(LOOK_TARGET);
    }

    /// Apply one drag-move delta (in pixels).
    pub fn drag(&self, camera: &mut Camera, dx: f32, dy: f32) {
        camera.eye.x -= dx * self.drag_scale;
        camera.eye.z -= dy * self.drag_scale;
        camera.look_at(LOOK_TARGET);
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_moves_linearly() {
        let rig = CameraRig::new();
        let mut camera = Camera::new(100, 100);
        let mut input = InputState::new();
        let z0 = camera.eye.z;

        input.key_down("ArrowUp");
        for _ in 0..25 {
            rig.step_keys(&mut camera, &input);
        }
        assert!(
            (z0 - camera.eye.z - 25.0 * 0.01).abs() < 1e-5,
            "25 frames of ArrowUp move -Z by exactly 25 steps"
        );
    }

    #[test]
    fn test_released_keys_leave_position_unchanged() {
        let rig = CameraRig::new();
        let mut camera = Camera::new(100, 100);
        let input = InputState::new();
        let eye = camera.eye;

        for _ in 0..10 {
            rig.step_keys(&mut camera, &input);
        }
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn test_simultaneous_keys_are_additive() {
        let rig = CameraRig::new();
        let mut camera = Camera::new(100, 100);
        let mut input = InputState::new();
        let eye = camera.eye;

        input.key_down("ArrowUp");
        input.key_down("ArrowLeft");
        rig.step_keys(&mut camera, &input);
        assert!((camera.eye.z - (eye.z - 0.01)).abs() < 1e-6);
        assert!((camera.eye.x - (eye.x - 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let rig = CameraRig::new();
        let mut camera = Camera::new(100, 100);
        let mut input = InputState::new();
        let eye = camera.eye;

        input.key_down("ArrowLeft");
        input.key_down("ArrowRight");
        rig.step_keys(&mut camera, &input);
        assert!((camera.eye.x - eye.x).abs() < 1e-6);
    }

    #[test]
    fn test_drag_pans_and_reaims() {
        let rig = CameraRig::new();
        let mut camera = Camera::new(100, 100);
        camera.look_at(glam::Vec3::new(9.0, 9.0, 9.0));
        let eye = camera.eye;

        rig.drag(&mut camera, 30.0, -20.0);
        assert!((camera.eye.x - (eye.x - 0.3)).abs() < 1e-5);
        assert!((camera.eye.z - (eye.z + 0.2)).abs() < 1e-5);
        assert_eq!(camera.target, LOOK_TARGET, "every move re-aims at the focus point");
    }
}
