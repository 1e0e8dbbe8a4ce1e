/*
 * Input Module
 *
 * This module forwards window events to the particle field.
 * nannou reports positions with the origin at the window centre and y up;
 * the field works in surface space (origin top-left, y down), so every
 * pointer position is translated before it is handed over.
 *
 * Features:
 * - Pointer tracking for the pointer links
 * - Left click spawns a burst, unless the click lands on the control panel
 * - Resize and close events keep the field's surface in sync
 * - Keyboard toggles for the panel, debug overlay and pause
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;

/// Translate a window position into surface space
pub fn window_to_surface(window_rect: Rect, pos: Point2) -> Point2 {
    pt2(pos.x - window_rect.left(), window_rect.top() - pos.y)
}

/// Translate a surface-space position back into window coordinates
pub fn surface_to_window(window_rect: Rect, pos: Point2) -> Point2 {
    pt2(pos.x + window_rect.left(), window_rect.top() - pos.y)
}

pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let surface_pos = window_to_surface(app.window_rect(), pos);
    model.field.pointer_moved(surface_pos.x, surface_pos.y);
}

pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let surface_pos = window_to_surface(app.window_rect(), app.mouse.position());
    model.field.burst(surface_pos.x, surface_pos.y);
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::H => model.options.show_panel = !model.options.show_panel,
        Key::D => model.options.show_debug = !model.options.show_debug,
        Key::Space => model.options.paused = !model.options.paused,
        _ => {}
    }
}

pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.field.resize(size.x, size.y);
}

// The window is going away: stop ticking for good
pub fn closed(_app: &App, model: &mut Model) {
    model.field.teardown();
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
