//! Browser host: canvas surface, interval timers, scoped listeners
//!
//! `start_dodge` / `start_platformer` are the JS-facing entry points. Each
//! returns a [`GameHandle`]; calling `stop()` on it (or dropping it) cancels
//! the session's timers and removes every listener it installed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    Window,
};

use crate::games::{DodgeGame, PlatformerGame};
use crate::render::Surface;
use crate::session::{Game, InputEvent, Scheduler, Session, TimerId};
use crate::settings::Settings;
use crate::sim::Color;

use super::{key_from_dom, new_seed};

static LOGGER: Once = Once::new();

/// Install the panic hook and console logger (once per page)
pub fn init_logging() {
    LOGGER.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }
    });
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Read a LocalStorage item
pub fn storage_get(key: &str) -> Option<String> {
    web_sys::window()?.local_storage().ok()??.get_item(key).ok()?
}

/// Write a LocalStorage item (failures are logged and ignored)
pub fn storage_set(key: &str, value: &str) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();
    if let Some(storage) = storage {
        if storage.set_item(key, value).is_err() {
            log::warn!("Could not write {} to LocalStorage", key);
        }
    }
}

/// A 2D canvas context as a [`Surface`]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_font("15px Arial");
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn fill(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}

/// `setInterval`-backed scheduler
///
/// Keeps each callback closure alive until its interval is cleared.
#[derive(Default)]
pub struct IntervalScheduler {
    next_id: u32,
    intervals: HashMap<TimerId, (i32, Closure<dyn FnMut()>)>,
}

impl Scheduler for IntervalScheduler {
    fn every(&mut self, interval_ms: u32, task: Box<dyn FnMut()>) -> Option<TimerId> {
        let closure = Closure::wrap(task);
        let handle = window().and_then(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms as i32,
            )
        });
        let handle = match handle {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("setInterval failed: {:?}", e);
                return None;
            }
        };

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.intervals.insert(id, (handle, closure));
        Some(id)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some((handle, _closure)) = self.intervals.remove(&id) {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(handle);
            }
        }
    }
}

type WebSession<G> = Session<G, CanvasSurface, IntervalScheduler>;

/// Event listeners that are removed when the set is dropped
#[derive(Default)]
struct Listeners {
    entries: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    fn add(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.entries.push((target.clone(), kind, closure));
        Ok(())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (target, kind, closure) in self.entries.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

trait ActiveGame {
    fn stop(&mut self);
}

struct Running<G: Game + 'static> {
    session: Rc<RefCell<WebSession<G>>>,
    listeners: Option<Listeners>,
}

impl<G: Game + 'static> ActiveGame for Running<G> {
    fn stop(&mut self) {
        // Detach input first so nothing reaches a stopped game
        self.listeners.take();
        self.session.borrow_mut().stop();
    }
}

/// Handle returned to JS for a running game
#[wasm_bindgen]
pub struct GameHandle {
    inner: Box<dyn ActiveGame>,
}

#[wasm_bindgen]
impl GameHandle {
    /// Cancel the tick driver and detach input handlers
    pub fn stop(&mut self) {
        self.inner.stop();
        log::info!("Game stopped");
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

/// Size the canvas to its container's width and a fixed height; returns the width
fn fit_canvas(canvas: &HtmlCanvasElement, height: f32) -> f32 {
    let width = match canvas.parent_element() {
        Some(parent) => parent.get_bounding_client_rect().width() as f32,
        None => canvas.client_width() as f32,
    };
    let width = width.max(1.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    width
}

/// Pointer position relative to the canvas
fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        (event.client_x() as f64 - rect.left()) as f32,
        (event.client_y() as f64 - rect.top()) as f32,
    )
}

/// Start Dodge on `canvas`
#[wasm_bindgen]
pub fn start_dodge(canvas: HtmlCanvasElement) -> Result<GameHandle, JsValue> {
    init_logging();
    let settings = Settings::load();
    let width = fit_canvas(&canvas, settings.dodge.field_height);
    let seed = new_seed();

    let game = DodgeGame::new(seed, width, &settings);
    let surface = CanvasSurface::new(&canvas)?;
    let session = Rc::new(RefCell::new(Session::new(
        game,
        surface,
        IntervalScheduler::default(),
    )));

    let window = window()?;
    let target: &EventTarget = window.as_ref();
    let mut listeners = Listeners::default();
    {
        let session = Rc::clone(&session);
        let canvas = canvas.clone();
        listeners.add(target, "mousedown", move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let point = canvas_point(&canvas, mouse);
            if session.borrow().dispatch(InputEvent::PointerDown(point)) {
                // Keep the drag from selecting page text
                event.prevent_default();
                event.stop_propagation();
            }
        })?;
    }
    {
        let session = Rc::clone(&session);
        listeners.add(target, "mouseup", move |_event: Event| {
            session.borrow().dispatch(InputEvent::PointerUp);
        })?;
    }
    {
        let session = Rc::clone(&session);
        let canvas = canvas.clone();
        listeners.add(target, "mousemove", move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let point = canvas_point(&canvas, mouse);
                session.borrow().dispatch(InputEvent::PointerMove(point));
            }
        })?;
    }
    {
        let session = Rc::clone(&session);
        listeners.add(target, "blur", move |_event: Event| {
            session.borrow().dispatch(InputEvent::FocusLost);
        })?;
    }

    session.borrow_mut().start();
    if !session.borrow().is_running() {
        return Err(JsValue::from_str("could not schedule the game loop"));
    }
    log::info!("Dodge started ({}px wide, seed {})", width, seed);

    Ok(GameHandle {
        inner: Box::new(Running {
            session,
            listeners: Some(listeners),
        }),
    })
}

/// Start the platformer on `canvas`
#[wasm_bindgen]
pub fn start_platformer(canvas: HtmlCanvasElement) -> Result<GameHandle, JsValue> {
    init_logging();
    let settings = Settings::load();
    let height = settings.platformer.field_height;
    let width = fit_canvas(&canvas, height);
    let seed = new_seed();

    let game = PlatformerGame::new(seed, width, &settings);
    let surface = CanvasSurface::new(&canvas)?;
    let session = Rc::new(RefCell::new(Session::new(
        game,
        surface,
        IntervalScheduler::default(),
    )));

    let window = window()?;
    let target: &EventTarget = window.as_ref();
    let mut listeners = Listeners::default();
    {
        let session = Rc::clone(&session);
        listeners.add(target, "keydown", move |event: Event| {
            let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|k| key_from_dom(&k.key()))
            else {
                return;
            };
            if session.borrow().dispatch(InputEvent::KeyDown(key)) {
                event.prevent_default();
            }
        })?;
    }
    {
        let session = Rc::clone(&session);
        listeners.add(target, "keyup", move |event: Event| {
            if let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|k| key_from_dom(&k.key()))
            {
                session.borrow().dispatch(InputEvent::KeyUp(key));
            }
        })?;
    }
    {
        let session = Rc::clone(&session);
        listeners.add(target, "blur", move |_event: Event| {
            session.borrow().dispatch(InputEvent::FocusLost);
        })?;
    }
    {
        let session = Rc::clone(&session);
        let canvas = canvas.clone();
        listeners.add(target, "resize", move |_event: Event| {
            let width = fit_canvas(&canvas, height);
            log::info!("Canvas resized to {}px, restarting loop", width);
            session.borrow_mut().resize(width);
        })?;
    }

    session.borrow_mut().start();
    if !session.borrow().is_running() {
        return Err(JsValue::from_str("could not schedule the game loop"));
    }
    log::info!("Platformer started ({}px wide, seed {})", width, seed);

    Ok(GameHandle {
        inner: Box::new(Running {
            session,
            listeners: Some(listeners),
        }),
    })
}
