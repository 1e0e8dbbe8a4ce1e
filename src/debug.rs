/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and particle counts to be displayed in the control panel and overlay.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - Ticks run during the last frame
 * - Live ambient and transient particles
 * - Connective lines drawn
 */

use std::time::Duration;

use crate::field::{ParticleField, TickStats};

#[derive(Debug, Default, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_this_frame: u32,
    pub ambient: usize,
    pub transient: usize,
    pub last_tick: TickStats,
}

impl DebugInfo {
    // Refresh the particle counters from the field
    pub fn sample(&mut self, field: &ParticleField) {
        self.ambient = field.ambient_count();
        self.transient = field.transient_count();
        self.last_tick = field.last_stats();
    }

    pub fn lines(&self) -> [String; 6] {
        [
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks this frame: {}", self.ticks_this_frame),
            format!("Ambient: {}", self.ambient),
            format!("Transient: {}", self.transient),
            format!(
                "Links: {} (+{} pointer)",
                self.last_tick.links, self.last_tick.pointer_links
            ),
        ]
    }
}
