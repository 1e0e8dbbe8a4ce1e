/*
 * UI Module
 *
 * This module contains functions for creating and updating the control panel
 * using nannou_egui, and for drawing the debug overlay. The panel edits the
 * field's configuration in place; changes apply from the next tick or burst.
 */

use nannou_egui::{egui, Egui};

use crate::app::ViewOptions;
use crate::config::FieldConfig;
use crate::debug::DebugInfo;
use crate::field::ParticleField;

// Update the UI and return whether a burst at the centre was requested
pub fn update_ui(
    egui: &mut Egui,
    field: &mut ParticleField,
    options: &mut ViewOptions,
    debug_info: &DebugInfo,
) -> bool {
    let mut burst_requested = false;

    let ctx = egui.begin_frame();
    if !options.show_panel {
        return false;
    }

    egui::Window::new("Particle Field")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Links", |ui| {
                let config = field.config_mut();
                ui.add(egui::Slider::new(&mut config.link_distance, FieldConfig::get_link_distance_range()).text("Link Distance"));
                ui.add(egui::Slider::new(&mut config.link_alpha, FieldConfig::get_alpha_range()).text("Link Strength"));
                ui.add(egui::Slider::new(&mut config.pointer_link_distance, FieldConfig::get_link_distance_range()).text("Pointer Distance"));
                ui.add(egui::Slider::new(&mut config.pointer_link_alpha, FieldConfig::get_alpha_range()).text("Pointer Strength"));
                ui.checkbox(&mut config.spatial_grid, "Use Spatial Grid");
            });

            ui.collapsing("Bursts", |ui| {
                let config = field.config_mut();
                ui.add(egui::Slider::new(&mut config.burst_size, FieldConfig::get_burst_size_range()).text("Burst Size"));
                if ui.button("Burst at Centre").clicked() {
                    burst_requested = true;
                }
            });

            ui.collapsing("Stats", |ui| {
                for line in debug_info.lines() {
                    ui.label(line);
                }
            });

            ui.separator();
            ui.checkbox(&mut options.show_debug, "Show Debug Overlay");
            ui.checkbox(&mut options.paused, "Pause");
            ui.label("H: hide panel, D: overlay, Space: pause");
        });

    burst_requested
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = debug_info.lines();

    // Background panel in the top-right corner
    let panel_width = 240.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_y = window_rect.top() - margin;
    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(panel_x, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
