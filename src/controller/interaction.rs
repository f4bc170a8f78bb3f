//! Discrete interaction state: which drawers are open and whether the
//! wall light is on, flipped by successful picks.

use tracing::{debug, info};

use crate::controller::animation::{DrawerAnimator, CLOSED_OFFSET, OPEN_OFFSET};
use crate::model::node::NodeId;
use crate::model::scene::Scene;

/// Spot intensity while the wall light is on.
pub const WALL_LIGHT_INTENSITY: f32 = 1.5;
/// Switch-plate emissive while the light is on (0xaaaaaa in the shader's space).
pub const SWITCH_EMISSIVE_ON: [f32; 3] = [0.667, 0.667, 0.667];
pub const SWITCH_EMISSIVE_OFF: [f32; 3] = [0.0, 0.0, 0.0];

#[derive(Debug, Clone, Copy)]
pub enum InteractiveKind {
    Drawer { slot: usize, is_open: bool },
    LightSwitch { switch_node: NodeId },
}

/// A pickable object: stable id, kind-specific state, and the scene
/// nodes its hit test runs against (non-owning references).
#[derive(Debug, Clone)]
pub struct InteractiveObject {
    pub id: usize,
    pub kind: InteractiveKind,
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy)]
pub struct LightState {
    pub is_on: bool,
    pub intensity: f32,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            is_on: false,
            intensity: 0.0,
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the pick registry and all discrete toggle state. Repeated picks
/// simply re-flip; there is deliberately no debouncing.
pub struct Interactions {
    pub objects: Vec<InteractiveObject>,
    pub light: LightState,
}

impl Interactions {
    pub fn new(objects: Vec<InteractiveObject>) -> Self {
        Self {
            objects,
            light: LightState::new(),
        }
    }

    /// React to a successful pick. Unknown ids are ignored.
    pub fn on_pick(&mut self, id: usize, drawers: &mut DrawerAnimator, scene: &mut Scene) {
        let kind = match self.objects.iter().find(|o| o.id == id) {
            Some(obj) => obj.kind,
            None => return,
        };
        match kind {
            InteractiveKind::Drawer { slot, .. } => self.toggle_drawer(slot, drawers),
            InteractiveKind::LightSwitch { .. } => self.toggle_light(scene),
        }
    }

    /// Flip a drawer and retarget its slide. Out-of-range slots are a no-op.
    pub fn toggle_drawer(&mut self, slot: usize, drawers: &mut DrawerAnimator) {
        let Some(obj) = self.objects.iter_mut().find(
            |o| matches!(o.kind, InteractiveKind::Drawer { slot: s, .. } if s == slot),
        ) else {
            debug!(slot, "ignoring toggle for unknown drawer");
            return;
        };
        if let InteractiveKind::Drawer { is_open, .. } = &mut obj.kind {
            *is_open = !*is_open;
            let target = if *is_open { OPEN_OFFSET } else { CLOSED_OFFSET };
            drawers.retarget(slot, target);
            debug!(slot, open = *is_open, "drawer toggled");
        }
    }

    /// Flip the wall light and mirror the state onto the switch plate.
    pub fn toggle_light(&mut self, scene: &mut Scene) {
        let Some(switch_node) = self.objects.iter().find_map(|o| match o.kind {
            InteractiveKind::LightSwitch { switch_node } => Some(switch_node),
            _ => None,
        }) else {
            return;
        };
        self.light.is_on = !self.light.is_on;
        self.light.intensity = if self.light.is_on {
            WALL_LIGHT_INTENSITY
        } else {
            0.0
        };
        scene.set_emissive(
            switch_node,
            if self.light.is_on {
                SWITCH_EMISSIVE_ON
            } else {
                SWITCH_EMISSIVE_OFF
            },
        );
        info!(on = self.light.is_on, "wall light toggled");
    }

    pub fn drawer_is_open(&self, slot: usize) -> Option<bool> {
        self.objects.iter().find_map(|o| match o.kind {
            InteractiveKind::Drawer { slot: s, is_open } if s == slot => Some(is_open),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::room;

    fn setup() -> (Scene, Interactions, DrawerAnimator) {
        let (scene, objects) = room::build();
        let animator = DrawerAnimator::new(room::DRAWER_COUNT);
        (scene, Interactions::new(objects), animator)
    }

    #[test]
    fn test_pick_parity() {
        let (mut scene, mut inter, mut drawers) = setup();
        for n in 1..=7 {
            inter.on_pick(1, &mut drawers, &mut scene);
            assert_eq!(
                inter.drawer_is_open(1),
                Some(n % 2 == 1),
                "open iff pick count is odd"
            );
        }
    }

    #[test]
    fn test_toggle_round_trip_restores_target() {
        let (mut scene, mut inter, mut drawers) = setup();
        let before = drawers.get(0).map(|d| d.target());

        inter.on_pick(0, &mut drawers, &mut scene);
        assert_eq!(drawers.get(0).map(|d| d.target()), Some(OPEN_OFFSET));

        inter.on_pick(0, &mut drawers, &mut scene);
        assert_eq!(inter.drawer_is_open(0), Some(false));
        assert_eq!(drawers.get(0).map(|d| d.target()), before);
    }

    #[test]
    fn test_out_of_range_drawer_is_ignored() {
        let (_, mut inter, mut drawers) = setup();
        inter.toggle_drawer(99, &mut drawers);
        for slot in 0..room::DRAWER_COUNT {
            assert_eq!(inter.drawer_is_open(slot), Some(false));
            assert_eq!(drawers.get(slot).map(|d| d.target()), Some(CLOSED_OFFSET));
        }
    }

    #[test]
    fn test_light_toggle_drives_intensity_and_emissive() {
        let (mut scene, mut inter, mut drawers) = setup();
        let switch_id = inter
            .objects
            .iter()
            .find_map(|o| match o.kind {
                InteractiveKind::LightSwitch { switch_node } => Some(switch_node),
                _ => None,
            })
            .expect("switch registered");
        let light_id = inter.objects.last().map(|o| o.id).expect("non-empty registry");

        inter.on_pick(light_id, &mut drawers, &mut scene);
        assert!(inter.light.is_on);
        assert_eq!(inter.light.intensity, WALL_LIGHT_INTENSITY);
        assert_eq!(scene.node(switch_id).material.emissive, SWITCH_EMISSIVE_ON);

        inter.on_pick(light_id, &mut drawers, &mut scene);
        assert!(!inter.light.is_on);
        assert_eq!(inter.light.intensity, 0.0, "intensity is 0 iff the light is off");
        assert_eq!(scene.node(switch_id).material.emissive, SWITCH_EMISSIVE_OFF);
    }

    #[test]
    fn test_unknown_pick_id_is_ignored() {
        let (mut scene, mut inter, mut drawers) = setup();
        inter.on_pick(42, &mut drawers, &mut scene);
        assert!(!inter.light.is_on);
        for slot in 0..room::DRAWER_COUNT {
            assert_eq!(inter.drawer_is_open(slot), Some(false));
        }
    }
}
