//! The per-frame orchestrator. Owns the whole interaction core and
//! exposes the handful of entry points the host shell (winit or the DOM)
//! calls: key events, pointer events, the frame tick, and the
//! animate-lights switch. Holds no GPU state, so it runs headless in
//! tests.

use glam::Vec3;
use tracing::debug;

use crate::controller::animation::DrawerAnimator;
use crate::controller::camera_rig::CameraRig;
use crate::controller::input::{InputEvent, InputState};
use crate::controller::interaction::{InteractiveKind, Interactions};
use crate::controller::picker;
use crate::model::camera::Camera;
use crate::model::{room, Scene};

/// Radians added to the light orbit per frame.
pub const LIGHT_ANGLE_STEP: f32 = 0.01;
pub const LIGHT_ORBIT_RADIUS: f32 = 10.0;
pub const LIGHT_BASE_HEIGHT: f32 = 10.0;
pub const LIGHT_BOB_AMPLITUDE: f32 = 4.0;

pub struct FrameLoopContext {
    pub camera: Camera,
    pub scene: Scene,
    pub input: InputState,
    pub rig: CameraRig,
    pub drawers: DrawerAnimator,
    pub interactions: Interactions,
    pub animate_lights: bool,
    pub light_angle: f32,
    viewport: (f32, f32),
}

impl FrameLoopContext {
    pub fn new(width: u32, height: u32) -> Self {
        let (scene, objects) = room::build();
        let drawer_count = objects
            .iter()
            .filter(|o| matches!(o.kind, InteractiveKind::Drawer { .. }))
            .count();
        Self {
            camera: Camera::new(width, height),
            scene,
            input: InputState::new(),
            rig: CameraRig::new(),
            drawers: DrawerAnimator::new(drawer_count),
            interactions: Interactions::new(objects),
            animate_lights: true,
            light_angle: 0.0,
            viewport: (width as f32, height as f32),
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width as f32, height as f32);
        self.camera.set_aspect(width, height);
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.input.key_down(&key),
            InputEvent::KeyUp(key) => self.input.key_up(&key),
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y),
            InputEvent::PointerDrag { x, y } => self.pointer_drag(x, y),
            InputEvent::FocusLost => self.input.clear_keys(),
        }
    }

    /// Pointer press: anchor drag deltas, then pick and toggle.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.set_pointer(x, y);
        let (w, h) = self.viewport;
        if let Some(id) = picker::pick(x, y, w, h, &self.camera, &self.scene, &self.interactions.objects)
        {
            debug!(id, "pointer hit");
            self.interactions
                .on_pick(id, &mut self.drawers, &mut self.scene);
        }
    }

    pub fn pointer_drag(&mut self, x: f32, y: f32) {
        let (dx, dy) = self.input.drag_delta(x, y);
        self.rig.drag(&mut self.camera, dx, dy);
    }

    pub fn set_animate_lights(&mut self, on: bool) {
        self.animate_lights = on;
    }

    /// One tick: camera keys, drawer slides, light orbit. The caller
    /// renders the scene right after.
    pub fn frame(&mut self) {
        self.rig.step_keys(&mut self.camera, &self.input);

        self.drawers.step_all();
        for slot in 0..self.drawers.len() {
            if let Some(offset) = self.drawers.offset(slot) {
                self.scene.set_drawer_offset(slot, offset);
            }
        }

        if self.animate_lights {
            self.light_angle += LIGHT_ANGLE_STEP;
            let a = self.light_angle;
            self.scene.main_light_pos = Vec3::new(
                a.cos() * LIGHT_ORBIT_RADIUS,
                LIGHT_BASE_HEIGHT + (2.0 * a).sin() * LIGHT_BOB_AMPLITUDE,
                a.sin() * LIGHT_ORBIT_RADIUS,
            );
        }
    }
}
