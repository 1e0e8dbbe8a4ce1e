/*
 * Particle Field - Module Definitions
 *
 * An animated particle-network background: drifting ambient particles,
 * click bursts that fade out, and fading lines between nearby particles
 * and towards the pointer.
 *
 * The simulator (field, particle, config, surface) has no windowing
 * dependencies of its own beyond nannou's math and color types; the app,
 * input, renderer and ui modules host it in a nannou window.
 */

// Re-export key components for easier access
pub use app::{Launch, Model};
pub use clock::{TickClock, TickRate};
pub use config::FieldConfig;
pub use debug::DebugInfo;
pub use error::{ConfigError, SurfaceError};
pub use field::{FieldState, ParticleField, TickStats};
pub use particle::{Particle, ParticleKind};
pub use spatial_grid::SpatialGrid;
pub use surface::{Canvas, DrawCommand, DrawList, SurfaceSize};

// Define modules
pub mod app;
pub mod clock;
pub mod config;
pub mod debug;
pub mod error;
pub mod field;
pub mod input;
pub mod particle;
pub mod renderer;
pub mod spatial_grid;
pub mod surface;
pub mod ui;

// Constants
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 800);
