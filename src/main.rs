use std::sync::Arc;
use std::time::Instant;

use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

// Import from the library crate
use roomview::{
    controller::{FrameLoopContext, InputEvent},
    logging, ui,
    view::{render, render::RenderState, GpuContext},
};

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    window: Arc<Window>,

    // Rendering state
    depth_view: wgpu::TextureView,
    render_state: RenderState,

    // egui
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,

    // Interaction core
    core: FrameLoopContext,
    pointer_held: bool,
    cursor_pos: (f32, f32),

    // Frame timing
    last_frame_time: Instant,
    fps: f32,
    frame_count: u32,
    fps_timer: f32,
}

fn arrow_key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::ArrowUp => Some("ArrowUp"),
        KeyCode::ArrowDown => Some("ArrowDown"),
        KeyCode::ArrowLeft => Some("ArrowLeft"),
        KeyCode::ArrowRight => Some("ArrowRight"),
        _ => None,
    }
}

impl App {
    async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let gpu = GpuContext::new_native(window.clone(), size.width, size.height).await;

        let depth_format = wgpu::TextureFormat::Depth32Float;
        let (_depth_texture, depth_view) =
            render::create_depth_texture(gpu.device.as_ref(), size.width, size.height);

        let core = FrameLoopContext::new(size.width, size.height);
        let resources = render::create_scene_resources(
            gpu.device.as_ref(),
            gpu.queue.as_ref(),
            gpu.format,
            depth_format,
            &core.scene,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            gpu.device.as_ref(),
            gpu.format,
            egui_wgpu::RendererOptions::default(),
        );

        let render_state = RenderState {
            format: gpu.format,
            alpha_mode: gpu.config.alpha_mode,
            width: size.width,
            height: size.height,
            resources,
            egui_renderer,
            egui_primitives: None,
            egui_full_output: None,
            egui_dpr: window.scale_factor() as f32,
        };

        Self {
            surface: gpu.surface,
            device: gpu.device,
            queue: gpu.queue,
            config: gpu.config,
            window,
            depth_view,
            render_state,
            egui_state,
            egui_ctx,
            core,
            pointer_held: false,
            cursor_pos: (0.0, 0.0),
            last_frame_time: Instant::now(),
            fps: 0.0,
            frame_count: 0,
            fps_timer: 0.0,
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        // First let egui process the event
        let egui_captured = self
            .egui_state
            .on_window_event(self.window.as_ref(), event)
            .consumed;
        if egui_captured {
            return true;
        }

        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state,
                    physical_key,
                    ..
                },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    if let Some(key) = arrow_key_name(*code) {
                        match state {
                            ElementState::Pressed => self
                                .core
                                .handle_event(InputEvent::KeyDown(key.to_string())),
                            ElementState::Released => {
                                self.core.handle_event(InputEvent::KeyUp(key.to_string()))
                            }
                        }
                        return true;
                    }
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } if *button == MouseButton::Left => {
                match state {
                    ElementState::Pressed => {
                        self.pointer_held = true;
                        let (x, y) = self.cursor_pos;
                        self.core.handle_event(InputEvent::PointerDown { x, y });
                    }
                    ElementState::Released => self.pointer_held = false,
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_pos = (position.x as f32, position.y as f32);
                if self.pointer_held {
                    let (x, y) = self.cursor_pos;
                    self.core.handle_event(InputEvent::PointerDrag { x, y });
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.core.handle_event(InputEvent::FocusLost);
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let (_depth_texture, depth_view) =
                render::create_depth_texture(self.device.as_ref(), new_size.width, new_size.height);
            self.depth_view = depth_view;

            self.core.set_viewport(new_size.width, new_size.height);
            self.render_state.width = new_size.width;
            self.render_state.height = new_size.height;
        }
    }

    fn update(&mut self, dt: f32) {
        self.frame_count += 1;
        self.fps_timer += dt;
        if self.fps_timer >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer;
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }

        self.core.frame();
        self.render_state.update_uniforms(self.queue.as_ref(), &self.core);
    }

    fn render(&mut self) {
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let fps = self.fps;
        let mut output = self
            .egui_ctx
            .run(raw_input, |ctx| ui::draw_panels(ctx, &mut self.core, fps));
        self.egui_state
            .handle_platform_output(&self.window, std::mem::take(&mut output.platform_output));

        let dpr = self.window.scale_factor() as f32;
        let primitives = self
            .egui_ctx
            .tessellate(std::mem::take(&mut output.shapes), dpr);
        self.render_state.egui_primitives = Some(primitives);
        self.render_state.egui_full_output = Some(output);
        self.render_state.egui_dpr = dpr;

        self.render_state.draw_frame(
            self.device.as_ref(),
            self.queue.as_ref(),
            &self.surface,
            &self.depth_view,
        );
    }
}

fn main() {
    logging::init();

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("roomview")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = event_loop.create_window(window_attributes).unwrap();
    let window = Arc::new(window);

    let mut app = pollster::block_on(App::new(window.clone()));

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            let now = Instant::now();
                            let dt = (now - app.last_frame_time).as_secs_f32();
                            app.last_frame_time = now;

                            app.update(dt);
                            app.render();
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        })
        .unwrap();
}
