//! Pointer picking: viewport pixel → camera ray → nearest interactive
//! object. Pure; mutates nothing.

use crate::controller::interaction::InteractiveObject;
use crate::model::camera::Camera;
use crate::model::scene::Scene;

/// Distances closer together than this count as a tie; ties keep the
/// earlier candidate.
const DISTANCE_TOLERANCE: f32 = 1e-6;

/// Returns the id of the nearest candidate hit by the ray through
/// `(px, py)`, or `None` when nothing intersects. Candidates are tested
/// in the order given. A degenerate viewport yields no hit.
pub fn pick(
    px: f32,
    py: f32,
    width: f32,
    height: f32,
    camera: &Camera,
    scene: &Scene,
    candidates: &[InteractiveObject],
) -> Option<usize> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let ray = camera.picking_ray(px, py, width, height);

    let mut best: Option<(usize, f32)> = None;
    for obj in candidates {
        let nearest = obj
            .nodes
            .iter()
            .filter_map(|&id| scene.node(id).hit(&ray))
            .reduce(f32::min);
        let Some(dist) = nearest else { continue };
        match best {
            None => best = Some((obj.id, dist)),
            Some((_, best_dist)) if dist + DISTANCE_TOLERANCE < best_dist => {
                best = Some((obj.id, dist))
            }
            _ => {}
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::interaction::InteractiveKind;
    use crate::model::node::{Material, SceneNode};
    use crate::utils::{box_mesh, WHITE};
    use glam::Vec3;

    fn camera_on_z() -> Camera {
        let mut cam = Camera::new(100, 100);
        cam.eye = Vec3::new(0.0, 0.0, 5.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    fn add_box(scene: &mut Scene, pos: Vec3, size: f32) -> usize {
        scene.add(
            SceneNode::new("box", box_mesh(size, size, size, WHITE), Material::colored(0xffffff))
                .at(pos),
        )
    }

    fn object(id: usize, nodes: Vec<usize>) -> InteractiveObject {
        InteractiveObject {
            id,
            kind: InteractiveKind::Drawer {
                slot: id,
                is_open: false,
            },
            nodes,
        }
    }

    #[test]
    fn test_center_pick_hits_centered_box() {
        let mut scene = Scene::new();
        let node = add_box(&mut scene, Vec3::ZERO, 1.0);
        let candidates = vec![object(3, vec![node])];

        let hit = pick(50.0, 50.0, 100.0, 100.0, &camera_on_z(), &scene, &candidates);
        assert_eq!(hit, Some(3));
    }

    #[test]
    fn test_empty_space_and_empty_candidates() {
        let mut scene = Scene::new();
        let node = add_box(&mut scene, Vec3::new(50.0, 0.0, 0.0), 1.0);
        let candidates = vec![object(0, vec![node])];

        let cam = camera_on_z();
        assert_eq!(pick(50.0, 50.0, 100.0, 100.0, &cam, &scene, &candidates), None);
        assert_eq!(pick(50.0, 50.0, 100.0, 100.0, &cam, &scene, &[]), None);
    }

    #[test]
    fn test_nearer_candidate_wins_regardless_of_order() {
        let mut scene = Scene::new();
        let near = add_box(&mut scene, Vec3::ZERO, 1.0);
        let far = add_box(&mut scene, Vec3::new(0.0, 0.0, -3.0), 2.0);
        let cam = camera_on_z();

        let far_first = vec![object(10, vec![far]), object(20, vec![near])];
        assert_eq!(pick(50.0, 50.0, 100.0, 100.0, &cam, &scene, &far_first), Some(20));

        let near_first = vec![object(20, vec![near]), object(10, vec![far])];
        assert_eq!(pick(50.0, 50.0, 100.0, 100.0, &cam, &scene, &near_first), Some(20));
    }

    #[test]
    fn test_tie_keeps_earlier_candidate() {
        let mut scene = Scene::new();
        let a = add_box(&mut scene, Vec3::ZERO, 1.0);
        let b = add_box(&mut scene, Vec3::ZERO, 1.0);
        let candidates = vec![object(7, vec![a]), object(8, vec![b])];

        let hit = pick(50.0, 50.0, 100.0, 100.0, &camera_on_z(), &scene, &candidates);
        assert_eq!(hit, Some(7), "equal distances resolve to the earlier candidate");
    }

    #[test]
    fn test_nearest_node_within_one_object() {
        let mut scene = Scene::new();
        let front = add_box(&mut scene, Vec3::new(0.0, 0.0, 1.0), 0.5);
        let back = add_box(&mut scene, Vec3::new(0.0, 0.0, -1.0), 0.5);
        let candidates = vec![object(1, vec![back, front])];

        let hit = pick(50.0, 50.0, 100.0, 100.0, &camera_on_z(), &scene, &candidates);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_degenerate_viewport_yields_no_hit() {
        let mut scene = Scene::new();
        let node = add_box(&mut scene, Vec3::ZERO, 1.0);
        let candidates = vec![object(0, vec![node])];
        assert_eq!(pick(0.0, 0.0, 0.0, 0.0, &camera_on_z(), &scene, &candidates), None);
    }
}
