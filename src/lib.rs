// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod ui;
pub mod utils;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

// WASM shell: canvas setup, DOM event listeners, and the
// requestAnimationFrame-driven redraw loop.
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{
    Document, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window,
};

#[cfg(target_arch = "wasm32")]
use controller::{FrameLoopContext, InputEvent};
#[cfg(target_arch = "wasm32")]
use view::{render, GpuContext, RenderState};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    logging::init();
    let (window, document, canvas) = init_canvas()?;
    setup_app(&window, &document, &canvas).await
}

/// Main application setup for WASM
#[cfg(target_arch = "wasm32")]
async fn setup_app(
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
) -> Result<(), JsValue> {
    let gpu = GpuContext::new(canvas, canvas.width(), canvas.height())
        .await
        .map_err(|e| js_error(format!("GPU init failed: {e:?}")))?;

    let width = gpu.config.width;
    let height = gpu.config.height;

    let core = Rc::new(RefCell::new(FrameLoopContext::new(width, height)));
    let egui_events: Rc<RefCell<Vec<egui::Event>>> = Rc::new(RefCell::new(Vec::new()));

    let egui_ctx = egui::Context::default();
    let egui_renderer = egui_wgpu::Renderer::new(
        gpu.device.as_ref(),
        gpu.format,
        egui_wgpu::RendererOptions::default(),
    );

    let depth_format = wgpu::TextureFormat::Depth32Float;
    let (_depth_tex, depth_view) = render::create_depth_texture(gpu.device.as_ref(), width, height);
    let depth_view_cell: Rc<RefCell<wgpu::TextureView>> = Rc::new(RefCell::new(depth_view));

    let resources = render::create_scene_resources(
        gpu.device.as_ref(),
        gpu.queue.as_ref(),
        gpu.format,
        depth_format,
        &core.borrow().scene,
    );

    let mut render_state = RenderState {
        format: gpu.format,
        alpha_mode: gpu.config.alpha_mode,
        width,
        height,
        resources,
        egui_renderer,
        egui_primitives: None,
        egui_full_output: None,
        egui_dpr: 1.0,
    };

    setup_input_listeners(
        document,
        window,
        canvas,
        core.clone(),
        egui_events.clone(),
        egui_ctx.clone(),
    )?;
    setup_animation_button(document, core.clone())?;

    let last_time = Rc::new(RefCell::new(
        window.performance().map(|p| p.now()).unwrap_or(0.0),
    ));

    // Continuous redraw using requestAnimationFrame
    let scheduler = FrameScheduler::new(window.clone(), {
        let window = window.clone();
        let canvas = canvas.clone();
        let core = core.clone();
        let egui_events = egui_events.clone();
        let egui_ctx = egui_ctx.clone();
        let last_time = last_time.clone();
        let depth_view_cell = depth_view_cell.clone();
        let mut fps = 0.0f32;

        move || {
            let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
            let mut last = last_time.borrow_mut();
            let dt = ((now - *last) / 1000.0).clamp(0.0, 0.1) as f32;
            *last = now;
            drop(last);
            if dt > 0.0 {
                fps = fps * 0.9 + (1.0 / dt) * 0.1;
            }

            handle_resize(&window, &canvas, &gpu, &core, &mut render_state, &depth_view_cell);

            core.borrow_mut().frame();

            let dpr = window.device_pixel_ratio() as f32;
            let events: Vec<egui::Event> = egui_events.borrow_mut().drain(..).collect();
            let mut full_output = ui::build_ui(
                &egui_ctx,
                &mut core.borrow_mut(),
                render_state.width,
                render_state.height,
                dpr,
                now,
                events,
                fps,
            );
            let primitives = egui_ctx.tessellate(std::mem::take(&mut full_output.shapes), dpr);
            render_state.egui_primitives = Some(primitives);
            render_state.egui_full_output = Some(full_output);
            render_state.egui_dpr = dpr;

            render_state.update_uniforms(gpu.queue.as_ref(), &core.borrow());
            let dv = depth_view_cell.borrow();
            render_state.draw_frame(gpu.device.as_ref(), gpu.queue.as_ref(), &gpu.surface, &dv);
        }
    });
    scheduler.start();

    Ok(())
}

/// Reconfigure surface, depth buffer, and viewport when the browser
/// window changes size.
#[cfg(target_arch = "wasm32")]
fn handle_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    gpu: &GpuContext,
    core: &Rc<RefCell<FrameLoopContext>>,
    render_state: &mut RenderState,
    depth_view_cell: &Rc<RefCell<wgpu::TextureView>>,
) {
    if let (Ok(w), Ok(h)) = (window.inner_width(), window.inner_height()) {
        let nw = w.as_f64().unwrap_or(800.0) as u32;
        let nh = h.as_f64().unwrap_or(600.0) as u32;
        if (nw != render_state.width || nh != render_state.height) && nw > 0 && nh > 0 {
            canvas.set_width(nw);
            canvas.set_height(nh);
            core.borrow_mut().set_viewport(nw, nh);
            render_state.width = nw;
            render_state.height = nh;

            let config = wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format: render_state.format,
                width: nw,
                height: nh,
                present_mode: wgpu::PresentMode::Fifo,
                alpha_mode: render_state.alpha_mode,
                view_formats: vec![],
                desired_maximum_frame_latency: 2,
            };
            gpu.surface.configure(gpu.device.as_ref(), &config);

            let (_tex, view) = render::create_depth_texture(gpu.device.as_ref(), nw, nh);
            *depth_view_cell.borrow_mut() = view;
        }
    }
}

/// Wire keyboard, pointer, and touch listeners to the core.
#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    document: &Document,
    window: &Window,
    canvas: &HtmlCanvasElement,
    core: Rc<RefCell<FrameLoopContext>>,
    egui_events: Rc<RefCell<Vec<egui::Event>>>,
    egui_ctx: egui::Context,
) -> Result<(), JsValue> {
    // Keyboard down
    {
        let core = core.clone();
        let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let key = e.key();
            if matches!(
                key.as_str(),
                "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
            ) {
                e.prevent_default();
            }
            core.borrow_mut().handle_event(InputEvent::KeyDown(key));
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Keyboard up
    {
        let core = core.clone();
        let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            core.borrow_mut().handle_event(InputEvent::KeyUp(e.key()));
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        keyup.forget();
    }

    // Focus loss - release all keys
    {
        let core = core.clone();
        let blur = Closure::wrap(Box::new(move |_e: Event| {
            core.borrow_mut().handle_event(InputEvent::FocusLost);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        blur.forget();
    }

    // Visibility change - release all keys
    {
        let core = core.clone();
        let visibility = Closure::wrap(Box::new(move |_e: Event| {
            core.borrow_mut().handle_event(InputEvent::FocusLost);
        }) as Box<dyn FnMut(Event)>);
        document
            .add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
        visibility.forget();
    }

    // Click picks, unless the overlay wants the pointer
    {
        let core = core.clone();
        let egui_events = egui_events.clone();
        let egui_ctx_click = egui_ctx.clone();
        let click = Closure::wrap(Box::new(move |e: MouseEvent| {
            let (x, y) = (e.client_x() as f32, e.client_y() as f32);
            let pos = egui::pos2(x, y);
            let mut queued = egui_events.borrow_mut();
            queued.push(egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::default(),
            });
            queued.push(egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::default(),
            });
            drop(queued);
            if !egui_ctx_click.is_pointer_over_area() {
                core.borrow_mut().handle_event(InputEvent::PointerDown { x, y });
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }

    // Mouse move feeds the overlay's hover state
    {
        let egui_events = egui_events.clone();
        let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
            let px = e.client_x() as f32;
            let py = e.client_y() as f32;
            egui_events
                .borrow_mut()
                .push(egui::Event::PointerMoved(egui::pos2(px, py)));
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
        mm.forget();
    }

    // Touch start picks and anchors the drag
    {
        let core = core.clone();
        let touchstart = Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            if let Some(touch) = e.touches().get(0) {
                core.borrow_mut().handle_event(InputEvent::PointerDown {
                    x: touch.client_x() as f32,
                    y: touch.client_y() as f32,
                });
            }
        }) as Box<dyn FnMut(TouchEvent)>);
        canvas.add_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref())?;
        touchstart.forget();
    }

    // Touch move pans the camera
    {
        let core = core.clone();
        let touchmove = Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            if let Some(touch) = e.touches().get(0) {
                core.borrow_mut().handle_event(InputEvent::PointerDrag {
                    x: touch.client_x() as f32,
                    y: touch.client_y() as f32,
                });
            }
        }) as Box<dyn FnMut(TouchEvent)>);
        canvas.add_event_listener_with_callback("touchmove", touchmove.as_ref().unchecked_ref())?;
        touchmove.forget();
    }

    Ok(())
}

/// DOM button mirroring the overlay's animate-lights toggle.
#[cfg(target_arch = "wasm32")]
fn setup_animation_button(
    document: &Document,
    core: Rc<RefCell<FrameLoopContext>>,
) -> Result<(), JsValue> {
    let body = document.body().ok_or(js_error("no body on document"))?;
    let button = document.create_element("button")?;
    button.set_text_content(Some("Toggle light animation"));
    button.set_attribute(
        "style",
        "position:absolute;top:10px;right:10px;z-index:10",
    )?;
    body.append_child(&button)?;

    let click = Closure::wrap(Box::new(move |_e: Event| {
        let on = !core.borrow().animate_lights;
        core.borrow_mut().set_animate_lights(on);
    }) as Box<dyn FnMut(Event)>);
    button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn init_canvas() -> Result<(Window, Document, HtmlCanvasElement), JsValue> {
    let window = web_sys::window().ok_or(js_error("no global `window`"))?;
    let document = window.document().ok_or(js_error("no document on window"))?;
    let body = document.body().ok_or(js_error("no body on document"))?;
    let canvas_el = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| js_error("failed to create canvas"))?;
    let width = window.inner_width()?.as_f64().unwrap_or(800.0) as u32;
    let height = window.inner_height()?.as_f64().unwrap_or(600.0) as u32;
    canvas_el.set_width(width);
    canvas_el.set_height(height);
    body.append_child(&canvas_el)?;
    Ok((window, document, canvas_el))
}

#[cfg(target_arch = "wasm32")]
fn js_error<E: Into<String>>(msg: E) -> JsValue {
    JsValue::from_str(&msg.into())
}

/// Self-rescheduling requestAnimationFrame driver.
#[cfg(target_arch = "wasm32")]
struct FrameScheduler {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
    window: Window,
}

#[cfg(target_arch = "wasm32")]
impl FrameScheduler {
    fn new(window: Window, f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
            window,
        }
    }

    fn start(self) {
        let inner = self.inner.clone();
        let window = self.window.clone();

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            inner.borrow_mut().as_mut()();

            // Recursively schedule next frame
            let cb_ref = callback_clone.borrow();
            window
                .request_animation_frame(cb_ref.as_ref().unwrap().as_ref().unchecked_ref())
                .expect("RAF failed");
        }) as Box<dyn FnMut()>));

        self.window
            .request_animation_frame(callback.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .expect("RAF start failed");

        // Leak the closure to keep it alive
        std::mem::forget(callback);
    }
}
