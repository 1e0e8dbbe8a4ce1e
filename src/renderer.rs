/*
 * Renderer Module
 *
 * This module draws the particle field. The field records its frame into a
 * DrawList during update; the view replays those commands with nannou,
 * translating surface-space positions into window coordinates, then adds
 * the debug overlay and the egui panel on top.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::input::surface_to_window;
use crate::surface::DrawCommand;
use crate::ui;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    // Nothing recorded yet (surface pending): still clear the window
    if model.frame.is_empty() {
        draw.background().color(model.field.config().background.0);
    }

    replay(&draw, model.frame.commands(), window_rect);

    if model.options.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to render particle field: {err:?}");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to render control panel: {err:?}");
    }
}

/// Draw recorded commands onto a nannou `Draw`
pub fn replay(draw: &Draw, commands: &[DrawCommand], window_rect: Rect) {
    for command in commands {
        match *command {
            DrawCommand::Clear { color } => {
                draw.background().color(color);
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                draw.ellipse()
                    .xy(surface_to_window(window_rect, center))
                    .radius(radius)
                    .color(with_alpha(color, alpha));
            }
            DrawCommand::Line {
                from,
                to,
                color,
                alpha,
                weight,
            } => {
                draw.line()
                    .start(surface_to_window(window_rect, from))
                    .end(surface_to_window(window_rect, to))
                    .weight(weight)
                    .color(with_alpha(color, alpha));
            }
        }
    }
}

#[inline]
fn with_alpha(color: Rgb<u8>, alpha: f32) -> Rgba {
    rgba(
        color.red as f32 / 255.0,
        color.green as f32 / 255.0,
        color.blue as f32 / 255.0,
        alpha.clamp(0.0, 1.0),
    )
}
