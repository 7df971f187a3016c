/*
 * Application Module
 *
 * This module defines the nannou model for the scene window and its event
 * handlers. Each update records one frame of the scene into a command
 * buffer; the view replays it. Losing focus pauses the scene loop the way a
 * browser pauses animation in a background tab, and regaining focus resumes
 * it. Resize events are debounced before the scene rebuilds its starfield.
 */

use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::CommandBuffer;
use crate::debug::DebugInfo;
use crate::renderer::view;
use crate::resize::ResizeDebouncer;
use crate::scene::{Scene, SceneError};
use crate::settings::Settings;
use crate::ui;

// Used when the primary monitor cannot be queried
const FALLBACK_WINDOW_SIZE: (u32, u32) = (1280, 800);

pub struct Model {
    pub scene: Option<Scene>,
    pub settings: Settings,
    pub egui: Option<Egui>,
    pub debug_info: DebugInfo,
    pub frame: CommandBuffer,
    pub resize: ResizeDebouncer,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let settings = Settings::from_env();

    let (window_width, window_height) = match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            (
                (size.width as f32 * settings.window.monitor_fraction) as u32,
                (size.height as f32 * settings.window.monitor_fraction) as u32,
            )
        }
        None => {
            log::warn!("no primary monitor reported, using a {}x{} window", FALLBACK_WINDOW_SIZE.0, FALLBACK_WINDOW_SIZE.1);
            FALLBACK_WINDOW_SIZE
        }
    };

    let window_id = app
        .new_window()
        .title(settings.window.title.as_str())
        .size(window_width, window_height)
        .view(view)
        .resized(resized)
        .focused(focused)
        .unfocused(unfocused)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the scene window");

    let (scene, egui) = match build_scene(app, window_id, &settings) {
        Ok((scene, egui)) => (Some(scene), Some(egui)),
        Err(err) => {
            log::error!("scene disabled: {err}");
            (None, None)
        }
    };

    let frame = scene
        .as_ref()
        .map(|scene| CommandBuffer::new(scene.width(), scene.height()))
        .unwrap_or_default();

    Model {
        scene,
        resize: ResizeDebouncer::new(settings.window.resize_debounce()),
        settings,
        egui,
        debug_info: DebugInfo::default(),
        frame,
    }
}

// Look up the window, size the scene to it and start the loop
fn build_scene(app: &App, window_id: nannou::window::Id, settings: &Settings) -> Result<(Scene, Egui), SceneError> {
    let window = app
        .window(window_id)
        .ok_or_else(|| SceneError::MissingWindow(format!("{:?}", window_id)))?;
    let rect = window.rect();

    let mut scene = Scene::new(
        rect.w(),
        rect.h(),
        settings.scene.clone(),
        settings.stars.clone(),
        StdRng::from_entropy(),
    )?;
    scene.enable();

    Ok((scene, Egui::from_window(&window)))
}

// Update the model
pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = if update.since_last.as_secs_f32() > 0.0 {
        1.0 / update.since_last.as_secs_f32()
    } else {
        0.0
    };
    model.debug_info.frame_time = update.since_last;

    let Some(scene) = model.scene.as_mut() else {
        return;
    };

    if let Some((width, height)) = model.resize.poll(Instant::now()) {
        if let Err(err) = scene.resize(width, height) {
            log::warn!("ignoring resize: {err}");
        }
    }

    if scene.is_running() {
        model.frame.reset(scene.width(), scene.height());
        let time = update.since_start.as_secs_f64() * 1000.0;
        if let Some(stats) = scene.animate(time, &mut model.frame) {
            model.debug_info.record(stats);
        }
    }
    model.debug_info.loop_state = Some(scene.state());

    if model.settings.window.show_debug {
        if let Some(egui) = model.egui.as_mut() {
            egui.set_elapsed_time(update.since_start);
            ui::update_ui(egui, &model.debug_info);
        }
    }
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.resize.notify(size.x, size.y, Instant::now());
}

// Window focused event handler
pub fn focused(app: &App, model: &mut Model) {
    if let Some(scene) = model.scene.as_mut() {
        scene.enable();
        app.set_loop_mode(LoopMode::RefreshSync);
    }
}

// Window unfocused event handler
pub fn unfocused(app: &App, model: &mut Model) {
    if let Some(scene) = model.scene.as_mut() {
        scene.disable();
        app.set_loop_mode(LoopMode::Wait);
    }
}

// Pass raw window events to egui when the overlay is shown
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    if model.settings.window.show_debug {
        if let Some(egui) = model.egui.as_mut() {
            egui.handle_raw_event(event);
        }
    }
}
