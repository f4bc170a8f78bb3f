// CONTROLLER: input, picking, interaction, animation, frame loop
pub mod animation;
pub mod camera_rig;
pub mod frame_loop;
pub mod input;
pub mod interaction;
pub mod picker;

pub use animation::{DrawerAnimation, DrawerAnimator, DrawerMotion};
pub use camera_rig::CameraRig;
pub use frame_loop::FrameLoopContext;
pub use input::{InputEvent, InputState};
pub use interaction::{InteractiveKind, InteractiveObject, Interactions, LightState};
