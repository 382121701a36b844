//! Browser runner
//!
//! requestAnimationFrame drives a fixed-step loop over a `#canvas` element.
//! Shapes go through WebGPU; text is mirrored into a DOM overlay above the
//! canvas. Mouse/touch move the paddle, Space restarts, Escape quits.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

use super::overlay::{label_css, overlay_css};
use super::{FramePacer, clock_seed};
use crate::app::{self, Cabinet, FrameStatus};
use crate::audio::{Mixer, WebAudio};
use crate::consts::{HEIGHT, WIDTH};
use crate::error::PlatformError;
use crate::renderer::{Label, RenderState};
use crate::settings::Settings;
use crate::sim::Controls;

const CANVAS_ID: &str = "canvas";
const OVERLAY_ID: &str = "overlay";

/// Everything the animation frame and input closures share
struct Runner {
    cabinet: Box<dyn Cabinet<RenderState, WebAudio>>,
    pacer: FramePacer,
    controls: Controls,
    canvas: HtmlCanvasElement,
    overlay: Option<Element>,
    /// Labels currently in the DOM
    shown: Vec<Label>,
}

impl Runner {
    /// Canvas-relative CSS pixels to playfield coordinates
    fn to_playfield(&self, x: f32, y: f32) -> Vec2 {
        let w = self.canvas.client_width().max(1) as f32;
        let h = self.canvas.client_height().max(1) as f32;
        Vec2::new(x * WIDTH / w, y * HEIGHT / h)
    }

    /// Run the steps owed at `time`; false once the session has quit
    fn update(&mut self, time: f64) -> bool {
        let steps = self.pacer.advance(time);
        for _ in 0..steps {
            let status = self.cabinet.tick(&self.controls);
            // One-shot keys apply to a single step
            self.controls.restart = false;
            if status == FrameStatus::Quit {
                return false;
            }
        }

        if steps > 0 {
            self.cabinet.draw();
            self.sync_labels();
        }
        true
    }

    /// Rebuild the text overlay when the frame's labels changed
    fn sync_labels(&mut self) {
        let Some(overlay) = &self.overlay else { return };
        let labels = self.cabinet.renderer().labels();
        if labels == self.shown.as_slice() {
            return;
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        overlay.set_text_content(None);
        let scale = self.canvas.client_height() as f32 / HEIGHT;

        for label in labels {
            let Ok(el) = document.create_element("div") else {
                continue;
            };
            if let Err(e) = el.set_attribute("style", &label_css(label, scale)) {
                log::debug!("Label style rejected: {:?}", e);
            }
            el.set_text_content(Some(&label.text));
            if let Err(e) = overlay.append_child(&el) {
                log::debug!("Could not add label {:?}: {:?}", label.text, e);
            }
        }

        self.shown = labels.to_vec();
    }

    fn terminate(&mut self) {
        if let Some(overlay) = &self.overlay {
            overlay.set_text_content(None);
        }
        self.shown.clear();
        log::info!("Session terminated");
    }
}

pub async fn run() -> Result<(), PlatformError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| PlatformError::Logger(e.to_string()))?;

    log::info!("Retro Arcade starting...");

    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let document = window.document().ok_or(PlatformError::NoDocument)?;

    let mut settings = Settings::load();
    if let Ok(query) = window.location().search() {
        // Remember a game picked by URL for the next visit
        if settings.apply_query(&query) {
            if let Err(e) = settings.save() {
                log::warn!("Could not save settings: {}", e);
            }
        }
    }
    document.set_title(settings.game.title());

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| PlatformError::NoCanvas(CANVAS_ID.to_string()))?;

    // Backing store at device resolution, playfield aspect
    let dpr = window.device_pixel_ratio();
    let width = (WIDTH as f64 * dpr) as u32;
    let height = (HEIGHT as f64 * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;
    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, width, height).await?;
    let audio = WebAudio::new(Mixer::from_settings(&settings));
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let cabinet = app::build(&settings, seed, render_state, audio);

    let overlay = find_or_create_overlay(&document, &canvas);
    let runner = Rc::new(RefCell::new(Runner {
        cabinet,
        pacer: FramePacer::new(),
        controls: Controls::default(),
        canvas: canvas.clone(),
        overlay,
        shown: Vec::new(),
    }));

    setup_input_handlers(&canvas, runner.clone())?;
    request_animation_frame(runner);

    log::info!("{} running!", settings.game.title());
    Ok(())
}

/// Text layer stacked over the canvas; the page may provide `#overlay`
fn find_or_create_overlay(
    document: &web_sys::Document,
    canvas: &HtmlCanvasElement,
) -> Option<Element> {
    let overlay = match document.get_element_by_id(OVERLAY_ID) {
        Some(el) => el,
        None => {
            let parent = canvas.parent_element()?;
            let overlay = document.create_element("div").ok()?;
            overlay.set_id(OVERLAY_ID);
            parent.append_child(&overlay).ok()?;
            overlay
        }
    };
    fit_overlay(&overlay, canvas);
    Some(overlay)
}

/// Cover the canvas's layout box
fn fit_overlay(overlay: &Element, canvas: &HtmlCanvasElement) {
    let style = overlay_css(
        canvas.offset_left(),
        canvas.offset_top(),
        canvas.offset_width(),
        canvas.offset_height(),
    );
    if let Err(e) = overlay.set_attribute("style", &style) {
        log::debug!("Overlay style rejected: {:?}", e);
    }
}

fn setup_input_handlers(
    canvas: &HtmlCanvasElement,
    runner: Rc<RefCell<Runner>>,
) -> Result<(), PlatformError> {
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;

    // Mouse move - absolute position over the canvas
    {
        let runner = runner.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut r = runner.borrow_mut();
            let p = r.to_playfield(event.offset_x() as f32, event.offset_y() as f32);
            r.controls.pointer = Some(p);
        });
        let _ = canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse down - audio can only start after a user gesture
    {
        let runner = runner.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            runner.borrow_mut().cabinet.audio_mut().resume();
        });
        let _ = canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch start/move
    for kind in ["touchstart", "touchmove"] {
        let runner = runner.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            let rect = canvas_clone.get_bounding_client_rect();
            let x = touch.client_x() as f32 - rect.left() as f32;
            let y = touch.client_y() as f32 - rect.top() as f32;

            let mut r = runner.borrow_mut();
            let p = r.to_playfield(x, y);
            r.controls.pointer = Some(p);
            if kind == "touchstart" {
                r.cabinet.audio_mut().resume();
            }
        });
        let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Keyboard
    {
        let runner = runner.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut r = runner.borrow_mut();
            match event.key().as_str() {
                " " => {
                    event.prevent_default();
                    r.controls.restart = true;
                }
                "Escape" => r.controls.quit = true,
                _ => {}
            }
        });
        let _ = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Layout changes move the canvas; keep the text layer on top of it
    {
        let runner = runner.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut r = runner.borrow_mut();
            if let Some(overlay) = &r.overlay {
                fit_overlay(overlay, &r.canvas);
            }
            // Font sizes follow the canvas height
            r.shown.clear();
            r.sync_labels();
        });
        let _ = window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Page going away counts as closing the window
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            runner.borrow_mut().controls.quit = true;
        });
        let _ = window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame(runner: Rc<RefCell<Runner>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(runner, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(runner: Rc<RefCell<Runner>>, time: f64) {
    let running = {
        let mut r = runner.borrow_mut();
        let running = r.update(time);
        if !running {
            r.terminate();
        }
        running
    };

    if running {
        request_animation_frame(runner);
    }
}
