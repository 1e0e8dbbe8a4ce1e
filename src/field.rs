/*
 * Particle Field Module
 *
 * This module defines ParticleField, the simulator behind the background.
 * It exclusively owns the live particle set, the surface dimensions, the
 * last known pointer position and its random source. Hosts drive it through
 * plain method calls:
 *
 * - initialize / resize when the drawing surface appears or changes size
 * - pointer_moved and burst for user input
 * - tick once per frame to advance and render
 * - teardown when the hosting view goes away
 *
 * Every call runs to completion on the caller's thread, so input is always
 * visible to the next tick and can never interleave with one.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::error::SurfaceError;
use crate::particle::Particle;
use crate::spatial_grid::SpatialGrid;
use crate::surface::{Canvas, SurfaceSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Waiting for a usable surface
    Pending,
    Running,
    /// Stopped for good
    TornDown,
}

/// Counters from the most recent tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    pub particles: usize,
    pub links: usize,
    pub pointer_links: usize,
    pub expired: usize,
}

/// Opacity of the line joining two particles `distance` apart, or `None`
/// when they are too far apart to be joined
#[inline]
pub fn link_alpha(distance: f32, threshold: f32, strength: f32, opacity_a: f32, opacity_b: f32) -> Option<f32> {
    (distance < threshold).then(|| strength * (1.0 - distance / threshold) * opacity_a * opacity_b)
}

pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    surface: Option<SurfaceSize>,
    pointer: Option<Point2>,
    state: FieldState,
    rng: StdRng,
    grid: Option<SpatialGrid>,
    // Scratch buffers reused between ticks
    pairs: Vec<(usize, usize, f32)>,
    nearby: Vec<usize>,
    stats: TickStats,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic field, for tests and benchmarks
    pub fn with_seed(config: FieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: StdRng) -> Self {
        Self {
            particles: Vec::with_capacity(config.ambient_count + config.burst_size),
            config,
            surface: None,
            pointer: None,
            state: FieldState::Pending,
            rng,
            grid: None,
            pairs: Vec::new(),
            nearby: Vec::new(),
            stats: TickStats::default(),
        }
    }

    /// Start the field on a surface of the given size.
    ///
    /// An unusable surface leaves the field pending so the call can be
    /// retried later. Once running, further calls only update the surface
    /// dimensions.
    pub fn initialize(&mut self, width: f32, height: f32) -> Result<(), SurfaceError> {
        match self.state {
            FieldState::TornDown => Ok(()),
            FieldState::Running => {
                self.resize(width, height);
                Ok(())
            }
            FieldState::Pending => {
                let surface = SurfaceSize::new(width, height).map_err(|err| {
                    log::debug!("particle field not started: {err}");
                    err
                })?;

                self.surface = Some(surface);
                for _ in 0..self.config.ambient_count {
                    let particle = Particle::random_ambient(&mut self.rng, surface, &self.config);
                    self.particles.push(particle);
                }
                self.state = FieldState::Running;

                log::info!(
                    "particle field started on {}x{} surface with {} ambient particles",
                    width,
                    height,
                    self.config.ambient_count
                );
                Ok(())
            }
        }
    }

    /// Track a new surface size. Live particles stay where they are; the new
    /// size only applies to wrapping and to later ambient placement.
    pub fn resize(&mut self, width: f32, height: f32) {
        match self.state {
            FieldState::TornDown => {}
            // Surface may have become usable
            FieldState::Pending => {
                let _ = self.initialize(width, height);
            }
            FieldState::Running => match SurfaceSize::new(width, height) {
                Ok(surface) => {
                    log::debug!("surface resized to {}x{}", width, height);
                    self.surface = Some(surface);
                }
                Err(err) => log::debug!("ignoring resize: {err}"),
            },
        }
    }

    /// Spawn a burst of transient particles at a surface-space coordinate
    pub fn burst(&mut self, x: f32, y: f32) {
        if self.state == FieldState::TornDown {
            return;
        }

        let origin = pt2(x, y);
        self.particles.reserve(self.config.burst_size);
        for _ in 0..self.config.burst_size {
            let particle = Particle::random_transient(&mut self.rng, origin, &self.config);
            self.particles.push(particle);
        }

        log::debug!("burst of {} particles at ({x:.1}, {y:.1})", self.config.burst_size);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.state != FieldState::TornDown {
            self.pointer = Some(pt2(x, y));
        }
    }

    /// Stop the field for good. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.state == FieldState::TornDown {
            return;
        }
        self.state = FieldState::TornDown;
        self.pointer = None;
        self.grid = None;
        log::info!("particle field torn down with {} live particles", self.particles.len());
    }

    /// Advance every particle by one tick and draw the frame.
    ///
    /// Returns false without touching anything when the field is not running.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> bool {
        let surface = match (self.state, self.surface) {
            (FieldState::Running, Some(surface)) => surface,
            _ => return false,
        };

        canvas.clear(self.config.background.0);

        // Age, move and wrap; expired particles drop out before drawing
        let before = self.particles.len();
        self.particles.retain_mut(|particle| {
            if !particle.age() {
                return false;
            }
            particle.advance(surface);
            true
        });

        let mut stats = TickStats {
            particles: self.particles.len(),
            expired: before - self.particles.len(),
            ..TickStats::default()
        };

        for particle in &self.particles {
            canvas.circle(particle.position, particle.radius, particle.color, particle.opacity);
        }

        self.collect_links(surface);
        for &(i, j, distance) in &self.pairs {
            let (a, b) = (&self.particles[i], &self.particles[j]);
            if let Some(alpha) = link_alpha(
                distance,
                self.config.link_distance,
                self.config.link_alpha,
                a.opacity,
                b.opacity,
            ) {
                canvas.line(a.position, b.position, a.color, alpha, self.config.link_weight);
                stats.links += 1;
            }
        }

        if let Some(pointer) = self.pointer {
            for particle in &self.particles {
                let distance = particle.position.distance(pointer);
                if let Some(alpha) = link_alpha(
                    distance,
                    self.config.pointer_link_distance,
                    self.config.pointer_link_alpha,
                    particle.opacity,
                    1.0,
                ) {
                    canvas.line(
                        particle.position,
                        pointer,
                        particle.color,
                        alpha,
                        self.config.pointer_link_weight,
                    );
                    stats.pointer_links += 1;
                }
            }
        }

        self.stats = stats;
        true
    }

    // Fill `self.pairs` with every unordered pair (i < j) closer than the link distance
    fn collect_links(&mut self, surface: SurfaceSize) {
        self.pairs.clear();
        let threshold = self.config.link_distance;

        if !self.config.spatial_grid {
            for (i, a) in self.particles.iter().enumerate() {
                for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                    let distance = a.position.distance(b.position);
                    if distance < threshold {
                        self.pairs.push((i, j, distance));
                    }
                }
            }
            return;
        }

        // Rebuild when the link distance or the surface changed
        if !matches!(&self.grid, Some(grid) if grid.fits(threshold, surface.width, surface.height)) {
            self.grid = Some(SpatialGrid::new(threshold, surface.width, surface.height));
        }
        let Some(grid) = self.grid.as_mut() else {
            return;
        };

        grid.clear();
        for (i, particle) in self.particles.iter().enumerate() {
            grid.insert(i, particle.position);
        }

        for (i, a) in self.particles.iter().enumerate() {
            grid.nearby(a.position, &mut self.nearby);
            for &j in &self.nearby {
                if j <= i {
                    continue;
                }
                let distance = a.position.distance(self.particles[j].position);
                if distance < threshold {
                    self.pairs.push((i, j, distance));
                }
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn ambient_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_transient()).count()
    }

    pub fn transient_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_transient()).count()
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    pub fn pointer(&self) -> Option<Point2> {
        self.pointer
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FieldState::Running
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Adjust tunables at runtime. Takes effect from the next tick or burst;
    /// already-live particles keep their attributes.
    pub fn config_mut(&mut self) -> &mut FieldConfig {
        &mut self.config
    }

    pub fn last_stats(&self) -> TickStats {
        self.stats
    }
}
