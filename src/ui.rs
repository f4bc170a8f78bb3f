use egui::Context;

use crate::controller::frame_loop::FrameLoopContext;
use crate::controller::interaction::InteractiveKind;

/// Draw the overlay panels into an already-running egui context.
pub fn draw_panels(ctx: &Context, core: &mut FrameLoopContext, fps: f32) {
    egui::Window::new("Room")
        .default_pos([8.0, 8.0])
        .default_size([180.0, 160.0])
        .show(ctx, |ui| {
            let mut animate = core.animate_lights;
            if ui.checkbox(&mut animate, "Animate lights").changed() {
                core.set_animate_lights(animate);
            }
            ui.label(
                egui::RichText::new(format!(
                    "Wall light: {}",
                    if core.interactions.light.is_on { "on" } else { "off" }
                ))
                .small(),
            );
            for obj in &core.interactions.objects {
                if let InteractiveKind::Drawer { slot, is_open } = obj.kind {
                    let offset = core.drawers.offset(slot).unwrap_or(0.0);
                    ui.label(
                        egui::RichText::new(format!(
                            "Drawer {slot}: {} ({offset:.2})",
                            if is_open { "open" } else { "closed" }
                        ))
                        .small(),
                    );
                }
            }
            let eye = core.camera.eye;
            ui.label(
                egui::RichText::new(format!("Camera: {:.2}, {:.2}, {:.2}", eye.x, eye.y, eye.z))
                    .small(),
            );
            ui.label(egui::RichText::new(format!("FPS: {fps:.0}")).small());
        });

    egui::Window::new("Controls")
        .default_pos([8.0, 200.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("Arrow keys - move the camera").small());
            ui.label(egui::RichText::new("Click a drawer or the wall switch to toggle it").small());
            ui.label(egui::RichText::new("Touch-drag - pan the camera").small());
        });
}

/// WASM path: assemble raw input by hand and run the context. The native
/// shell goes through egui-winit instead.
#[allow(clippy::too_many_arguments)]
pub fn build_ui(
    egui_ctx: &Context,
    core: &mut FrameLoopContext,
    width: u32,
    height: u32,
    dpr: f32,
    now_ms: f64,
    events: Vec<egui::Event>,
    fps: f32,
) -> egui::FullOutput {
    let mut raw_input = egui::RawInput::default();
    raw_input.time = Some(now_ms / 1000.0);
    raw_input.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::new(0.0, 0.0),
        egui::vec2(width as f32 / dpr, height as f32 / dpr),
    ));
    raw_input.events = events;
    egui_ctx.set_pixels_per_point(dpr);
    egui_ctx.run(raw_input, |ctx| draw_panels(ctx, core, fps))
}
