/*
 * Application Module
 *
 * This module defines the nannou host for the particle field: the model,
 * start-up and the per-frame update. The window is the drawing surface;
 * input events are forwarded to the field from the input module and the
 * recorded frame is replayed by the renderer.
 *
 * Each displayed frame runs the ticks the clock asks for (one per frame by
 * default) into a DrawList, which the view then draws.
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::clock::{TickClock, TickRate};
use crate::config::FieldConfig;
use crate::debug::DebugInfo;
use crate::field::ParticleField;
use crate::input;
use crate::renderer;
use crate::surface::DrawList;
use crate::ui;
use crate::DEFAULT_WINDOW_SIZE;

/// Everything the binary decides before the event loop starts
#[derive(Debug, Clone, Default)]
pub struct Launch {
    pub config: FieldConfig,
    pub seed: Option<u64>,
}

// nannou's model function takes no arguments beyond the app
static LAUNCH: OnceLock<Launch> = OnceLock::new();

// View toggles that are not part of the field itself
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub show_panel: bool,
    pub show_debug: bool,
    pub paused: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_panel: true,
            show_debug: false,
            paused: false,
        }
    }
}

// Main model for the application
pub struct Model {
    pub field: ParticleField,
    pub frame: DrawList,
    pub clock: TickClock,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub options: ViewOptions,
}

/// Run the windowed particle field until the window is closed
pub fn run(launch: Launch) {
    if LAUNCH.set(launch).is_err() {
        log::warn!("particle field already launched, keeping the first settings");
    }

    nannou::app(model).update(update).exit(exit).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let launch = LAUNCH.get().cloned().unwrap_or_default();
    let (width, height) = DEFAULT_WINDOW_SIZE;

    let window_id = app
        .new_window()
        .title("Particle Field")
        .size(width, height)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .key_pressed(input::key_pressed)
        .resized(input::resized)
        .closed(input::closed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to create the particle field window");

    let window = app
        .window(window_id)
        .expect("window disappeared right after creation");

    let egui = Egui::from_window(&window);
    let clock = TickClock::new(TickRate::from_hz(launch.config.fixed_rate_hz));

    let mut field = match launch.seed {
        Some(seed) => ParticleField::with_seed(launch.config, seed),
        None => ParticleField::new(launch.config),
    };

    // A zero sized window is retried on the first resize
    let rect = window.rect();
    if let Err(err) = field.initialize(rect.w(), rect.h()) {
        log::debug!("waiting for a usable window: {err}");
    }

    Model {
        field,
        frame: DrawList::new(),
        clock,
        egui,
        debug_info: DebugInfo::default(),
        options: ViewOptions::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let burst_requested = ui::update_ui(
        &mut model.egui,
        &mut model.field,
        &mut model.options,
        &model.debug_info,
    );

    if burst_requested {
        if let Some(surface) = model.field.surface() {
            model.field.burst(surface.width / 2.0, surface.height / 2.0);
        }
    }

    let ticks = if model.options.paused {
        model.clock.reset();
        0
    } else {
        model.clock.ticks_due(update.since_last)
    };

    for _ in 0..ticks {
        model.field.tick(&mut model.frame);
    }

    model.debug_info.ticks_this_frame = ticks;
    model.debug_info.sample(&model.field);
}

// Stop the field when the app shuts down
pub fn exit(_app: &App, mut model: Model) {
    model.field.teardown();
}
