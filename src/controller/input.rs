use std::collections::HashSet;

/// Platform-independent input events fed in by the host shell
/// (winit on native, DOM listeners on the web).
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    /// Pointer press or touch start: anchors drag deltas and triggers a pick.
    PointerDown { x: f32, y: f32 },
    /// Pointer drag move: pans the camera by the delta since the last position.
    PointerDrag { x: f32, y: f32 },
    FocusLost,
}

/// Current key-pressed set plus the last known pointer position.
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    pub last_pointer: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            last_pointer: None,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.pressed_keys.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed_keys.remove(key);
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.last_pointer = Some((x, y));
    }

    /// Delta since the last stored position; stores the new position.
    /// The first move after an un-anchored pointer yields no delta.
    pub fn drag_delta(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = match self.last_pointer {
            Some((lx, ly)) => (x - lx, y - ly),
            None => (0.0, 0.0),
        };
        self.last_pointer = Some((x, y));
        delta
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_tracking() {
        let mut input = InputState::new();
        assert!(!input.is_key_pressed("ArrowUp"));

        input.key_down("ArrowUp");
        input.key_down("ArrowLeft");
        assert!(input.is_key_pressed("ArrowUp"));
        assert!(input.is_key_pressed("ArrowLeft"));

        input.key_up("ArrowUp");
        assert!(!input.is_key_pressed("ArrowUp"));
        assert!(input.is_key_pressed("ArrowLeft"));

        input.clear_keys();
        assert!(!input.is_key_pressed("ArrowLeft"));
    }

    #[test]
    fn test_drag_delta_accumulates_from_anchor() {
        let mut input = InputState::new();
        input.set_pointer(10.0, 10.0);
        assert_eq!(input.drag_delta(15.0, 12.0), (5.0, 2.0));
        assert_eq!(input.drag_delta(15.0, 12.0), (0.0, 0.0));
        assert_eq!(input.drag_delta(10.0, 20.0), (-5.0, 8.0));
    }

    #[test]
    fn test_first_drag_without_anchor_is_zero() {
        let mut input = InputState::new();
        assert_eq!(input.drag_delta(40.0, 40.0), (0.0, 0.0));
        assert_eq!(input.last_pointer, Some((40.0, 40.0)));
    }
}
