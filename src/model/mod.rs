// MODEL: scene data, camera, procedural textures
pub mod camera;
pub mod node;
pub mod room;
pub mod scene;
pub mod texture;

pub use camera::{Camera, Ray};
pub use node::{Aabb, Material, NodeId, SceneNode};
pub use scene::Scene;
pub use texture::TextureKind;
