//! Static room construction: walls, wardrobe with drawers, wall light,
//! and the decorative props, plus the registry of pickable objects.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::controller::animation::CLOSED_OFFSET;
use crate::controller::interaction::{InteractiveKind, InteractiveObject};
use crate::model::node::{Material, NodeId, SceneNode};
use crate::model::scene::Scene;
use crate::model::texture::TextureKind;
use crate::utils::{box_mesh, cone_mesh, cylinder_mesh, plane_mesh, WHITE};

pub const DRAWER_COUNT: usize = 4;
const DRAWER_HEIGHT: f32 = 0.7;
const DRAWER_Y: [f32; DRAWER_COUNT] = [0.5, 1.3, 2.1, 2.9];

/// Build the whole scene and the pick-candidate registry. Candidate
/// order is drawers bottom-to-top, then the light switch.
pub fn build() -> (Scene, Vec<InteractiveObject>) {
    let mut scene = Scene::new();

    build_room(&mut scene);
    let mut objects = build_wardrobe(&mut scene);
    let switch_node = build_wall_light(&mut scene);
    build_decorations(&mut scene);

    objects.push(InteractiveObject {
        id: objects.len(),
        kind: InteractiveKind::LightSwitch { switch_node },
        nodes: vec![switch_node],
    });

    (scene, objects)
}

fn build_room(scene: &mut Scene) {
    scene.add(SceneNode::new(
        "floor",
        plane_mesh(20.0, 20.0, WHITE).transform_by(Mat4::from_rotation_x(-FRAC_PI_2)),
        Material::textured(TextureKind::Marble).with_shininess(100.0),
    ));

    let wall = Material::textured(TextureKind::Wall);
    scene.add(
        SceneNode::new("back_wall", plane_mesh(20.0, 10.0, WHITE), wall)
            .at(Vec3::new(0.0, 5.0, -10.0)),
    );
    scene.add(
        SceneNode::new(
            "left_wall",
            plane_mesh(20.0, 10.0, WHITE).transform_by(Mat4::from_rotation_y(FRAC_PI_2)),
            wall,
        )
        .at(Vec3::new(-10.0, 5.0, 0.0)),
    );
    scene.add(
        SceneNode::new(
            "right_wall",
            plane_mesh(20.0, 10.0, WHITE).transform_by(Mat4::from_rotation_y(-FRAC_PI_2)),
            wall,
        )
        .at(Vec3::new(10.0, 5.0, 0.0)),
    );

    // Framed "window" on the left wall
    scene.add(
        SceneNode::new(
            "painting",
            plane_mesh(8.0, 5.0, WHITE).transform_by(Mat4::from_rotation_y(FRAC_PI_2)),
            Material::unlit_textured(TextureKind::WindowView),
        )
        .at(Vec3::new(-9.5, 4.0, 0.0)),
    );
}

fn build_wardrobe(scene: &mut Scene) -> Vec<InteractiveObject> {
    scene.add(
        SceneNode::new(
            "wardrobe_body",
            box_mesh(3.0, 4.0, 1.5, WHITE),
            Material::textured(TextureKind::Wood).with_shininess(32.0),
        )
        .at(Vec3::new(0.0, 2.0, 0.0)),
    );

    DRAWER_Y
        .iter()
        .enumerate()
        .map(|(slot, &y)| {
            let nodes = build_drawer(scene, slot, y);
            InteractiveObject {
                id: slot,
                kind: InteractiveKind::Drawer {
                    slot,
                    is_open: false,
                },
                nodes,
            }
        })
        .collect()
}

/// One drawer group: tray (bottom, sides, back), front panel, handle.
/// Part offsets are baked into the meshes; the shared node translation
/// carries the animated Z offset, starting closed.
fn build_drawer(scene: &mut Scene, slot: usize, y: f32) -> Vec<NodeId> {
    let rest = Vec3::new(0.0, 0.0, CLOSED_OFFSET);
    let wood = Material::textured(TextureKind::Wood);
    let side = 0.1;

    let parts: [(&'static str, crate::utils::Mesh, Material); 6] = [
        (
            "drawer_bottom",
            box_mesh(2.8, 0.1, 1.3, WHITE)
                .transform_by(Mat4::from_translation(Vec3::new(0.0, y - DRAWER_HEIGHT / 2.0, 0.0))),
            wood,
        ),
        (
            "drawer_left",
            box_mesh(side, DRAWER_HEIGHT, 1.3, WHITE)
                .transform_by(Mat4::from_translation(Vec3::new(-1.4 + side / 2.0, y, 0.0))),
            wood,
        ),
        (
            "drawer_right",
            box_mesh(side, DRAWER_HEIGHT, 1.3, WHITE)
                .transform_by(Mat4::from_translation(Vec3::new(1.4 - side / 2.0, y, 0.0))),
            wood,
        ),
        (
            "drawer_back",
            box_mesh(2.8 - side * 2.0, DRAWER_HEIGHT, side, WHITE)
                .transform_by(Mat4::from_translation(Vec3::new(0.0, y, -0.65 + side / 2.0))),
            wood,
        ),
        (
            "drawer_panel",
            box_mesh(2.9, DRAWER_HEIGHT + 0.05, 0.1, WHITE)
                .transform_by(Mat4::from_translation(Vec3::new(0.0, y, 0.6))),
            wood.with_shininess(50.0),
        ),
        (
            "drawer_handle",
            cylinder_mesh(0.05, 0.05, 0.4, 12, WHITE).transform_by(
                Mat4::from_translation(Vec3::new(0.0, y, 0.66)) * Mat4::from_rotation_z(FRAC_PI_2),
            ),
            Material::colored(0x888888),
        ),
    ];

    parts
        .into_iter()
        .map(|(label, mesh, material)| {
            scene.add(SceneNode::new(label, mesh, material).at(rest).in_drawer(slot))
        })
        .collect()
}

/// Fixture bar plus the pickable switch plate; returns the switch node.
fn build_wall_light(scene: &mut Scene) -> NodeId {
    scene.add(
        SceneNode::new(
            "wall_light_fixture",
            box_mesh(10.0, 0.2, 0.2, WHITE).transform_by(Mat4::from_rotation_y(-FRAC_PI_2)),
            Material::colored(0xcccccc),
        )
        .at(Vec3::new(9.9, 2.5, -2.0)),
    );

    scene.add(
        SceneNode::new(
            "wall_light_switch",
            box_mesh(0.5, 0.5, 0.1, WHITE).transform_by(Mat4::from_rotation_y(-FRAC_PI_2)),
            Material::colored(0x444444),
        )
        .at(Vec3::new(9.9, 1.5, -2.0)),
    )
}

fn build_decorations(scene: &mut Scene) {
    // Plant
    scene.add(
        SceneNode::new(
            "plant_pot",
            cylinder_mesh(0.3, 0.2, 0.4, 8, WHITE),
            Material::colored(0x8b4513),
        )
        .at(Vec3::new(3.0, 0.2, 3.0)),
    );
    scene.add(
        SceneNode::new("plant", cone_mesh(0.4, 1.0, 6, WHITE), Material::colored(0x228b22))
            .at(Vec3::new(3.0, 0.9, 3.0)),
    );

    // Picture frame on the back wall
    scene.add(
        SceneNode::new(
            "picture_frame",
            box_mesh(1.5, 2.0, 0.1, WHITE),
            Material::colored(0x654321),
        )
        .at(Vec3::new(0.0, 3.0, -9.9)),
    );

    // Rug, just above the floor to avoid z-fighting
    scene.add(
        SceneNode::new(
            "rug",
            plane_mesh(4.0, 3.0, WHITE).transform_by(Mat4::from_rotation_x(-FRAC_PI_2)),
            Material::textured(TextureKind::Rug),
        )
        .at(Vec3::new(0.0, 0.01, 2.0)),
    );

    // Floor lamp
    let metal = Material::colored(0x444444);
    scene.add(
        SceneNode::new("lamp_base", cylinder_mesh(0.2, 0.3, 0.2, 8, WHITE), metal)
            .at(Vec3::new(-3.0, 0.1, -3.0)),
    );
    scene.add(
        SceneNode::new("lamp_pole", cylinder_mesh(0.02, 0.02, 2.0, 8, WHITE), metal)
            .at(Vec3::new(-3.0, 1.1, -3.0)),
    );
    scene.add(
        SceneNode::new(
            "lamp_shade",
            cone_mesh(0.5, 0.6, 6, WHITE),
            Material::colored(0xffffdd).with_emissive([0.2, 0.2, 0.107]),
        )
        .at(Vec3::new(-3.0, 2.1, -3.0)),
    );

    // Desk with a laptop
    scene.add(
        SceneNode::new("desk", box_mesh(4.0, 1.5, 2.0, WHITE), Material::colored(0x654321))
            .at(Vec3::new(-5.0, 0.75, -8.0)),
    );
    scene.add(
        SceneNode::new("laptop", box_mesh(1.0, 0.1, 0.8, WHITE), Material::colored(0x222222))
            .at(Vec3::new(-5.0, 1.55, -8.0)),
    );

    // Bookshelf and books
    scene.add(
        SceneNode::new(
            "bookshelf",
            box_mesh(3.0, 4.0, 1.0, WHITE),
            Material::textured(TextureKind::Wood),
        )
        .at(Vec3::new(8.0, 2.0, -9.5)),
    );
    for (label, size, color, pos) in [
        ("book_teal", (0.2, 0.8, 0.6), 0x2a9d8f, Vec3::new(6.8, 2.5, -9.0)),
        ("book_yellow", (0.3, 1.0, 0.7), 0xe9c46a, Vec3::new(7.2, 2.6, -9.0)),
        ("book_orange", (0.4, 0.9, 0.5), 0xf4a261, Vec3::new(7.7, 2.55, -9.0)),
    ] {
        scene.add(
            SceneNode::new(label, box_mesh(size.0, size.1, size.2, WHITE), Material::colored(color))
                .at(pos),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_drawers_then_switch() {
        let (_, objects) = build();
        assert_eq!(objects.len(), DRAWER_COUNT + 1);
        for (i, obj) in objects.iter().take(DRAWER_COUNT).enumerate() {
            assert_eq!(obj.id, i);
            match obj.kind {
                InteractiveKind::Drawer { slot, is_open } => {
                    assert_eq!(slot, i);
                    assert!(!is_open, "drawers start closed");
                }
                _ => panic!("expected drawer at index {i}"),
            }
        }
        assert!(matches!(
            objects[DRAWER_COUNT].kind,
            InteractiveKind::LightSwitch { .. }
        ));
    }

    #[test]
    fn test_drawer_nodes_start_at_rest_offset() {
        let (scene, objects) = build();
        for obj in &objects {
            if let InteractiveKind::Drawer { slot, .. } = obj.kind {
                assert!(!obj.nodes.is_empty());
                for &id in &obj.nodes {
                    let node = scene.node(id);
                    assert_eq!(node.drawer, Some(slot));
                    assert!((node.translation.z - CLOSED_OFFSET).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_switch_node_is_registered() {
        let (scene, objects) = build();
        let switch = objects
            .iter()
            .find_map(|o| match o.kind {
                InteractiveKind::LightSwitch { switch_node } => Some(switch_node),
                _ => None,
            })
            .expect("switch present");
        let node = scene.node(switch);
        assert_eq!(node.label, "wall_light_switch");
        assert_eq!(node.material.emissive, [0.0; 3], "light starts off");
    }

    #[test]
    fn test_room_extents() {
        let (scene, _) = build();
        let floor = scene
            .nodes
            .iter()
            .find(|n| n.label == "floor")
            .expect("floor present");
        let bounds = floor.world_bounds();
        assert!((bounds.max.x - 10.0).abs() < 1e-4);
        assert!((bounds.min.z + 10.0).abs() < 1e-4);
        assert!(bounds.max.y.abs() < 1e-4, "floor lies in the XZ plane");
    }
}
