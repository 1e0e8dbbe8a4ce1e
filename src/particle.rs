/*
 * Particle Module
 *
 * This module defines the Particle struct and its per-tick behavior.
 * There are two kinds of particle:
 * 1. Ambient: spawned once at start-up, drifts slowly and never expires
 * 2. Transient: spawned by a burst, moves faster and fades out over its lifespan
 */

use nannou::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::FieldConfig;
use crate::surface::SurfaceSize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Ambient,
    Transient { age: u32, max_age: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgb<u8>,
    /// Opacity at age zero
    pub base_opacity: f32,
    pub opacity: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn ambient(position: Point2, velocity: Vec2, radius: f32, color: Rgb<u8>, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            base_opacity: opacity,
            opacity,
            kind: ParticleKind::Ambient,
        }
    }

    pub fn transient(
        position: Point2,
        velocity: Vec2,
        radius: f32,
        color: Rgb<u8>,
        opacity: f32,
        max_age: u32,
    ) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            base_opacity: opacity,
            opacity,
            kind: ParticleKind::Transient { age: 0, max_age },
        }
    }

    // Random ambient particle somewhere on the surface
    pub fn random_ambient<R: Rng + ?Sized>(rng: &mut R, surface: SurfaceSize, config: &FieldConfig) -> Self {
        let x = rng.gen_range(0.0..surface.width);
        let y = rng.gen_range(0.0..surface.height);

        Self::ambient(
            pt2(x, y),
            random_velocity(rng, config.ambient_speed),
            uniform(rng, config.ambient_radius),
            random_color(rng, config),
            uniform(rng, config.ambient_opacity),
        )
    }

    // Random burst particle at the given origin
    pub fn random_transient<R: Rng + ?Sized>(rng: &mut R, origin: Point2, config: &FieldConfig) -> Self {
        let (min_life, max_life) = config.burst_lifetime;

        Self::transient(
            origin,
            random_velocity(rng, config.burst_speed),
            uniform(rng, config.burst_radius),
            random_color(rng, config),
            config.burst_opacity,
            rng.gen_range(min_life..=max_life),
        )
    }

    pub fn is_transient(&self) -> bool {
        matches!(self.kind, ParticleKind::Transient { .. })
    }

    /// Age the particle by one tick. Returns false once it has expired.
    pub fn age(&mut self) -> bool {
        if let ParticleKind::Transient { age, max_age } = &mut self.kind {
            *age += 1;
            if *age >= *max_age {
                return false;
            }
            self.opacity = self.base_opacity * (1.0 - *age as f32 / *max_age as f32);
        }
        true
    }

    // Move by one tick's velocity and wrap around the surface edges
    pub fn advance(&mut self, surface: SurfaceSize) {
        self.position += self.velocity;
        surface.wrap(&mut self.position);
    }
}

// Uniform sample from [min, max), collapsing to min for an empty range
fn uniform<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    vec2(uniform(rng, (-speed, speed)), uniform(rng, (-speed, speed)))
}

fn random_color<R: Rng + ?Sized>(rng: &mut R, config: &FieldConfig) -> Rgb<u8> {
    config
        .palette
        .choose(rng)
        .map(|c| c.0)
        .unwrap_or_else(|| rgb(255, 255, 255))
}
