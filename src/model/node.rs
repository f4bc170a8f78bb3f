use glam::Vec3;

use crate::model::camera::Ray;
use crate::model::texture::TextureKind;
use crate::utils::Mesh;

pub type NodeId = usize;

/// Axis-aligned bounding box used for pointer hit tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let (min, max) = mesh.bounds();
        Self { min, max }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Nearest positive distance along `ray` (slab method). When the ray
    /// starts inside the box the exit distance is returned.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let inv = ray.dir.recip();
        let t0 = (self.min - ray.origin) * inv;
        let t1 = (self.max - ray.origin) * inv;
        let near = t0.min(t1).max_element();
        let far = t0.max(t1).min_element();
        if near > far || far < 0.0 {
            return None;
        }
        Some(if near > 0.0 { near } else { far })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub base_color: [f32; 4],
    pub texture: Option<TextureKind>,
    pub emissive: [f32; 3],
    pub shininess: f32,
    /// Skips lighting entirely (used by the painting).
    pub unlit: bool,
}

impl Material {
    /// Plain lit color from a 0xRRGGBB value.
    pub fn colored(hex: u32) -> Self {
        Self {
            base_color: rgb(hex),
            texture: None,
            emissive: [0.0; 3],
            shininess: 30.0,
            unlit: false,
        }
    }

    pub fn textured(kind: TextureKind) -> Self {
        Self {
            base_color: [1.0; 4],
            texture: Some(kind),
            emissive: [0.0; 3],
            shininess: 30.0,
            unlit: false,
        }
    }

    pub fn unlit_textured(kind: TextureKind) -> Self {
        Self {
            unlit: true,
            ..Self::textured(kind)
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = emissive;
        self
    }
}

/// 0xRRGGBB to linear-ish RGBA.
pub fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// One drawable thing in the room. Rotations are baked into the mesh at
/// build time so the node transform is translation-only; drawers animate
/// by rewriting the translation's Z component.
pub struct SceneNode {
    pub label: &'static str,
    pub mesh: Mesh,
    pub translation: Vec3,
    pub material: Material,
    /// Local-space bounds; add `translation` for world space.
    pub bounds: Aabb,
    /// Drawer slot this node slides with, if any.
    pub drawer: Option<usize>,
}

impl SceneNode {
    pub fn new(label: &'static str, mesh: Mesh, material: Material) -> Self {
        let bounds = Aabb::from_mesh(&mesh);
        Self {
            label,
            mesh,
            translation: Vec3::ZERO,
            material,
            bounds,
            drawer: None,
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn in_drawer(mut self, slot: usize) -> Self {
        self.drawer = Some(slot);
        self
    }

    pub fn world_bounds(&self) -> Aabb {
        self.bounds.translated(self.translation)
    }

    /// Nearest positive hit distance against this node's world bounds.
    pub fn hit(&self, ray: &Ray) -> Option<f32> {
        self.world_bounds().intersect(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{box_mesh, WHITE};

    fn unit_box_at(pos: Vec3) -> SceneNode {
        SceneNode::new("box", box_mesh(1.0, 1.0, 1.0, WHITE), Material::colored(0xffffff)).at(pos)
    }

    #[test]
    fn test_ray_hits_box_head_on() {
        let node = unit_box_at(Vec3::ZERO);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::new(0.0, 0.0, -1.0),
        };
        let dist = node.hit(&ray).expect("should hit");
        assert!((dist - 4.5).abs() < 1e-5, "entry face is at z=0.5, got {dist}");
    }

    #[test]
    fn test_ray_misses_offset_box() {
        let node = unit_box_at(Vec3::new(3.0, 0.0, 0.0));
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::new(0.0, 0.0, -1.0),
        };
        assert!(node.hit(&ray).is_none());
    }

    #[test]
    fn test_ray_behind_box_misses() {
        let node = unit_box_at(Vec3::ZERO);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::new(0.0, 0.0, 1.0),
        };
        assert!(node.hit(&ray).is_none(), "box is behind the ray origin");
    }

    #[test]
    fn test_ray_from_inside_returns_exit() {
        let aabb = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::new(0.0, 0.0, -1.0),
        };
        let dist = aabb.intersect(&ray).expect("inside always hits");
        assert!((dist - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_ray_distance() {
        let aabb = Aabb {
            min: Vec3::new(-0.5, -0.5, -0.5),
            max: Vec3::new(0.5, 0.5, 0.5),
        };
        let origin = Vec3::new(2.0, 2.0, 2.0);
        let ray = Ray {
            origin,
            dir: (Vec3::ZERO - origin).normalize(),
        };
        let dist = aabb.intersect(&ray).expect("aimed at center");
        let expected = (origin - Vec3::splat(0.5)).length();
        assert!((dist - expected).abs() < 1e-4);
    }
}
