mod signals;
mod surface;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use morph_core::context::{fade_opacity, ViewingContext};
use morph_core::engine::{Engine, FrameOutcome};
use morph_core::raster::SoftwareRaster;
use morph_core::{EngineConfig, EngineError, ShapeKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent};

use crate::surface::CanvasTarget;

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("no entropy source ({e}); seeding from the clock");
            now_ms() as u64
        }
    }
}

/// State shared between the handle and the browser callbacks.
struct Shared {
    engine: Engine,
    raster: SoftwareRaster,
    target: CanvasTarget,
    scroll_progress: f32,
}

impl Shared {
    fn frame(&mut self, now: f64) -> FrameOutcome {
        let outcome = self.engine.frame(now, &mut self.raster);
        if let FrameOutcome::Rendered(_) = outcome {
            let css = self.engine.profile().canvas_size;
            if let Err(e) = self.target.blit(&self.raster, css) {
                log::error!("putImageData failed: {:?}", e);
            }
        }
        outcome
    }

    /// Pointer position relative to the canvas centre, CSS pixels.
    fn pointer(&self, ev: &MouseEvent) -> Vec2 {
        let rect = self.target.canvas().get_bounding_client_rect();
        Vec2::new(
            (ev.client_x() as f64 - rect.left() - rect.width() * 0.5) as f32,
            (ev.client_y() as f64 - rect.top() - rect.height() * 0.5) as f32,
        )
    }

    fn apply_fade(&self) {
        let opacity = fade_opacity(self.engine.context(), self.scroll_progress);
        self.target.set_opacity(opacity);
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

/// Browser handle for one animated canvas.
#[wasm_bindgen]
pub struct ParticleEngine {
    shared: Rc<RefCell<Shared>>,
    tick: Tick,
    handle: Rc<Cell<Option<i32>>>,
    /// Host asked for animation; hidden sections pause without clearing it.
    wanted: bool,
    listeners: Vec<Listener>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleEngine {
    /// `config_json` is optional; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<ParticleEngine, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let config = match config_json.as_deref() {
            Some(json) => EngineConfig::from_json(json).map_err(to_js)?,
            None => EngineConfig::default(),
        };

        let engine = Engine::new(config, signals::probe(&window), seed());
        let px = engine.surface_px();
        let raster = SoftwareRaster::new(px, px, engine.pixel_ratio());
        log::info!(
            "particle engine on {:?} tier, {} particles",
            engine.profile().tier,
            engine.profile().particle_count
        );

        let shared = Rc::new(RefCell::new(Shared {
            engine,
            raster,
            target: CanvasTarget::new(canvas),
            scroll_progress: 0.0,
        }));

        let mut this = ParticleEngine {
            shared,
            tick: Rc::new(RefCell::new(None)),
            handle: Rc::new(Cell::new(None)),
            wanted: false,
            listeners: Vec::new(),
            on_resize: None,
        };
        this.wire_tick();
        this.wire_pointer()?;
        this.wire_resize(&window)?;
        Ok(this)
    }

    /// Start animating. Fails without a 2D context; while the section is
    /// hidden the request is remembered and honoured by `set_section`.
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.wanted = true;
        {
            let mut shared = self.shared.borrow_mut();
            let available = shared.target.is_available();
            shared.engine.start(available).map_err(to_js)?;
        }
        if self.shared.borrow().engine.is_running() {
            self.schedule();
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.wanted = false;
        self.shared.borrow_mut().engine.stop();
        self.cancel();
    }

    /// Stop everything and detach from the page. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.wanted = false;
        self.shared.borrow_mut().engine.teardown();
        self.cancel();
        for l in self.listeners.drain(..) {
            l.target
                .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref())
                .ok();
        }
        if let (Some(window), Some(closure)) = (web_sys::window(), self.on_resize.take()) {
            window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .ok();
        }
        // Drops the closure and with it the closure's own reference cycle.
        self.tick.borrow_mut().take();
    }

    /// Section index from the host's scroll tracking.
    pub fn set_section(&mut self, index: i32) -> Result<(), JsValue> {
        let context = ViewingContext::from_section(index);
        {
            let mut shared = self.shared.borrow_mut();
            shared.engine.set_viewing_context(context, now_ms());
            shared.apply_fade();
        }
        if !context.is_visible() {
            self.cancel();
        } else if self.wanted && !self.shared.borrow().engine.is_running() {
            let mut shared = self.shared.borrow_mut();
            let available = shared.target.is_available();
            shared.engine.start(available).map_err(to_js)?;
            let running = shared.engine.is_running();
            drop(shared);
            if running {
                self.schedule();
            }
        }
        Ok(())
    }

    /// Scroll position in viewport heights; drives the fade-out.
    pub fn set_scroll_progress(&mut self, progress: f32) {
        let mut shared = self.shared.borrow_mut();
        shared.scroll_progress = progress;
        shared.apply_fade();
    }

    /// Morph to a named shape right away. Unknown names become the sphere.
    pub fn set_shape(&mut self, name: &str) -> bool {
        self.shared.borrow_mut().engine.retarget(ShapeKind::from_name(name))
    }

    pub fn tier(&self) -> String {
        format!("{:?}", self.shared.borrow().engine.profile().tier)
    }

    pub fn particle_count(&self) -> usize {
        self.shared.borrow().engine.store().len()
    }
}

impl ParticleEngine {
    fn wire_tick(&mut self) {
        let shared = self.shared.clone();
        let tick = self.tick.clone();
        let handle = self.handle.clone();
        *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle.set(None);
            if let FrameOutcome::Stopped = shared.borrow_mut().frame(now_ms()) {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(cb) = tick.borrow().as_ref() {
                handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut()>));
    }

    fn schedule(&self) {
        if self.handle.get().is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(cb) = self.tick.borrow().as_ref() {
            self.handle
                .set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }
    }

    fn cancel(&self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.cancel_animation_frame(id).ok();
        }
    }

    fn wire_pointer(&mut self) -> Result<(), JsValue> {
        let target: EventTarget = self.shared.borrow().target.canvas().clone().into();

        let shared = self.shared.clone();
        let on_move = Closure::wrap(Box::new(move |ev: MouseEvent| {
            let mut s = shared.borrow_mut();
            let position = s.pointer(&ev);
            s.engine.pointer_move(position, now_ms());
        }) as Box<dyn FnMut(MouseEvent)>);

        let shared = self.shared.clone();
        let on_leave = Closure::wrap(Box::new(move |_ev: MouseEvent| {
            shared.borrow_mut().engine.pointer_leave();
        }) as Box<dyn FnMut(MouseEvent)>);

        for (event, closure) in [("mousemove", on_move), ("mouseleave", on_leave)] {
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
            self.listeners.push(Listener {
                target: target.clone(),
                event,
                closure,
            });
        }
        Ok(())
    }

    fn wire_resize(&mut self, window: &web_sys::Window) -> Result<(), JsValue> {
        let shared = self.shared.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(w) = web_sys::window() {
                shared.borrow_mut().engine.resize(signals::probe(&w));
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        self.on_resize = Some(closure);
        Ok(())
    }
}

impl Drop for ParticleEngine {
    fn drop(&mut self) {
        self.destroy();
    }
}
