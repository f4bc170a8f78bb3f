use glam::Vec3;

use crate::model::node::{NodeId, SceneNode};

/// Retained scene: every drawable node plus the light rig. Node geometry
/// is fixed after construction; per-frame mutation is limited to drawer
/// translations, the switch emissive, and the animated main light.
pub struct Scene {
    pub nodes: Vec<SceneNode>,

    /// Animated key light (orbits when light animation is on).
    pub main_light_pos: Vec3,
    pub main_light_intensity: f32,
    pub ambient: f32,

    /// Warm point light sitting in the floor lamp's shade.
    pub lamp_light_pos: Vec3,
    pub lamp_light_intensity: f32,

    /// Wall spot; its intensity is owned by the interaction layer.
    pub wall_light_pos: Vec3,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            main_light_pos: Vec3::new(8.0, 4.0, 8.0),
            main_light_intensity: 0.8,
            ambient: 0.4,
            lamp_light_pos: Vec3::new(-3.0, 2.1, -3.0),
            lamp_light_intensity: 0.5,
            wall_light_pos: Vec3::new(9.5, 2.5, -4.0),
        }
    }

    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id]
    }

    /// Slide every node of a drawer group to the given Z offset.
    pub fn set_drawer_offset(&mut self, slot: usize, z: f32) {
        for node in self.nodes.iter_mut().filter(|n| n.drawer == Some(slot)) {
            node.translation.z = z;
        }
    }

    pub fn set_emissive(&mut self, id: NodeId, emissive: [f32; 3]) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.material.emissive = emissive;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
