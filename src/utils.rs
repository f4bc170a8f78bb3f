use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    /// Apply a transform to positions and (rotation-only to) normals.
    pub fn transform_by(mut self, m: Mat4) -> Self {
        for v in &mut self.vertices {
            let p = m.transform_point3(Vec3::from(v.pos));
            v.pos = p.to_array();
            let n = m.transform_vector3(Vec3::from(v.normal));
            v.normal = n.normalize_or_zero().to_array();
        }
        self
    }

    /// Min/max corners over all vertex positions.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in &self.vertices {
            let p = Vec3::from(v.pos);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Axis-aligned box centered at the origin, 24 vertices (4 per face).
pub fn box_mesh(width: f32, height: f32, depth: f32, color: [f32; 4]) -> Mesh {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);

    // (normal, four corners in CCW order seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [[-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd]],
        ),
        (
            [0.0, 0.0, -1.0],
            [[hw, -hh, -hd], [-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd]],
        ),
    ];
    let uvs: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut mesh = Mesh::empty();
    for (normal, corners) in faces {
        let base = mesh.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            mesh.vertices.push(Vertex {
                pos: *corner,
                normal,
                color,
                uv: *uv,
            });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Flat rectangle in the XY plane facing +Z, centered at the origin.
pub fn plane_mesh(width: f32, height: f32, color: [f32; 4]) -> Mesh {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex {
            pos: [-hw, -hh, 0.0],
            normal,
            color,
            uv: [0.0, 1.0],
        },
        Vertex {
            pos: [hw, -hh, 0.0],
            normal,
            color,
            uv: [1.0, 1.0],
        },
        Vertex {
            pos: [hw, hh, 0.0],
            normal,
            color,
            uv: [1.0, 0.0],
        },
        Vertex {
            pos: [-hw, hh, 0.0],
            normal,
            color,
            uv: [0.0, 0.0],
        },
    ];
    Mesh {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Capped cylinder along the Y axis, centered at the origin. Different
/// top/bottom radii give the tapered pots and lamp bases.
pub fn cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    color: [f32; 4],
) -> Mesh {
    let hh = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let mut mesh = Mesh::empty();

    // Lateral surface
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * std::f32::consts::TAU;
        let a1 = (i + 1) as f32 / segments as f32 * std::f32::consts::TAU;
        let base = mesh.vertices.len() as u32;
        for (angle, column) in [(a0, i as f32), (a1, (i + 1) as f32)] {
            let (sin, cos) = angle.sin_cos();
            let normal = Vec3::new(cos, slope, sin).normalize().to_array();
            let u = column / segments as f32;
            mesh.vertices.push(Vertex {
                pos: [cos * radius_bottom, -hh, sin * radius_bottom],
                normal,
                color,
                uv: [u, 1.0],
            });
            mesh.vertices.push(Vertex {
                pos: [cos * radius_top, hh, sin * radius_top],
                normal,
                color,
                uv: [u, 0.0],
            });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 2, base + 3, base, base + 3, base + 1]);
    }

    // Caps
    for (y, radius, normal_y) in [(-hh, radius_bottom, -1.0), (hh, radius_top, 1.0)] {
        if radius <= 0.0 {
            continue;
        }
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex {
            pos: [0.0, y, 0.0],
            normal: [0.0, normal_y, 0.0],
            color,
            uv: [0.5, 0.5],
        });
        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            mesh.vertices.push(Vertex {
                pos: [cos * radius, y, sin * radius],
                normal: [0.0, normal_y, 0.0],
                color,
                uv: [0.5 + cos * 0.5, 0.5 + sin * 0.5],
            });
        }
        for i in 0..segments {
            let (a, b) = (center + 1 + i, center + 2 + i);
            if normal_y > 0.0 {
                mesh.indices.extend_from_slice(&[center, b, a]);
            } else {
                mesh.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }
    mesh
}

/// Cone along the Y axis (a cylinder with a zero top radius).
pub fn cone_mesh(radius: f32, height: f32, segments: u32, color: [f32; 4]) -> Mesh {
    cylinder_mesh(0.0, radius, height, segments, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_mesh_shape() {
        let mesh = box_mesh(2.0, 4.0, 6.0, WHITE);
        assert_eq!(mesh.vertices.len(), 24, "4 vertices per face");
        assert_eq!(mesh.indices.len(), 36, "2 triangles per face");

        let (min, max) = mesh.bounds();
        assert!((min - Vec3::new(-1.0, -2.0, -3.0)).length() < 1e-6);
        assert!((max - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_plane_mesh_faces_positive_z() {
        let mesh = plane_mesh(2.0, 2.0, WHITE);
        assert_eq!(mesh.vertices.len(), 4);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_transform_moves_bounds() {
        let mesh = box_mesh(1.0, 1.0, 1.0, WHITE)
            .transform_by(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        let (min, max) = mesh.bounds();
        assert!((min.x - 9.5).abs() < 1e-6);
        assert!((max.x - 10.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_reorients_normals() {
        let mesh = plane_mesh(2.0, 2.0, WHITE)
            .transform_by(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            assert!((n - Vec3::Y).length() < 1e-5, "plane should now face up, got {n:?}");
        }
    }

    #[test]
    fn test_cylinder_mesh_bounds() {
        let mesh = cylinder_mesh(0.3, 0.2, 0.4, 8, WHITE);
        assert!(!mesh.is_empty());
        let (min, max) = mesh.bounds();
        assert!((max.y - 0.2).abs() < 1e-6);
        assert!((min.y + 0.2).abs() < 1e-6);
        assert!(max.x <= 0.3 + 1e-6);
    }
}
