/*
 * Configuration Module
 *
 * This module defines the FieldConfig struct that holds every tunable of the
 * particle field: population sizes, the random ranges new particles are drawn
 * from, connective line thresholds, the color palette and the tick rate.
 * Values can be loaded from a TOML file; anything missing falls back to the
 * defaults below. It also exposes slider ranges for the control panel.
 */

use std::fs;
use std::path::Path;

use nannou::color::{rgb, Rgb};
use serde::Deserialize;

use crate::error::ConfigError;

/// A `#rrggbb` color as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub Rgb<u8>);

impl HexColor {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_string());

        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self(rgb(channel(0)?, channel(2)?, channel(4)?)))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Shortest allowed link distance, bounds the spatial grid cell count
pub const MIN_LINK_DISTANCE: f32 = 1.0;

const DEFAULT_PALETTE: [(u8, u8, u8); 4] = [
    (0xc1, 0x00, 0x00),
    (0xff, 0x00, 0x00),
    (0xff, 0x33, 0x33),
    (0xff, 0x66, 0x66),
];

// All tunables of the particle field, adjustable via config file and UI
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Number of permanent particles spawned at start-up
    pub ambient_count: usize,
    /// Per-axis velocity range is `-ambient_speed..ambient_speed`
    pub ambient_speed: f32,
    pub ambient_radius: (f32, f32),
    pub ambient_opacity: (f32, f32),

    /// Number of particles spawned by one burst
    pub burst_size: usize,
    pub burst_speed: f32,
    pub burst_radius: (f32, f32),
    pub burst_opacity: f32,
    /// Lifespan in ticks, both ends inclusive
    pub burst_lifetime: (u32, u32),

    /// Particles closer than this are joined by a line
    pub link_distance: f32,
    pub link_alpha: f32,
    pub link_weight: f32,

    /// Particles closer than this to the pointer are joined to it
    pub pointer_link_distance: f32,
    pub pointer_link_alpha: f32,
    pub pointer_link_weight: f32,

    pub palette: Vec<HexColor>,
    pub background: HexColor,

    /// Use the uniform grid instead of the all-pairs scan for links
    pub spatial_grid: bool,
    /// Ticks per second; `None` ticks once per displayed frame
    pub fixed_rate_hz: Option<f32>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            ambient_count: 100,
            ambient_speed: 0.35,
            ambient_radius: (0.5, 3.5),
            ambient_opacity: (0.1, 0.4),
            burst_size: 20,
            burst_speed: 2.0,
            burst_radius: (1.0, 5.0),
            burst_opacity: 0.8,
            burst_lifetime: (30, 90),
            link_distance: 120.0,
            link_alpha: 0.15,
            link_weight: 0.6,
            pointer_link_distance: 150.0,
            pointer_link_alpha: 0.2,
            pointer_link_weight: 0.8,
            palette: DEFAULT_PALETTE
                .iter()
                .map(|&(r, g, b)| HexColor(rgb(r, g, b)))
                .collect(),
            background: HexColor(rgb(0, 0, 0)),
            spatial_grid: false,
            fixed_rate_hz: None,
        }
    }
}

impl FieldConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::invalid("palette", "at least one color is required"));
        }

        check_speed("ambient_speed", self.ambient_speed)?;
        check_speed("burst_speed", self.burst_speed)?;
        check_radius("ambient_radius", self.ambient_radius)?;
        check_radius("burst_radius", self.burst_radius)?;
        check_opacity_range("ambient_opacity", self.ambient_opacity)?;
        check_opacity_range("burst_opacity", (self.burst_opacity, self.burst_opacity))?;

        let (min_life, max_life) = self.burst_lifetime;
        if min_life == 0 || min_life > max_life {
            return Err(ConfigError::invalid(
                "burst_lifetime",
                format!("expected 1 <= min <= max, got ({min_life}, {max_life})"),
            ));
        }

        check_at_least("link_distance", self.link_distance, MIN_LINK_DISTANCE)?;
        check_at_least("pointer_link_distance", self.pointer_link_distance, MIN_LINK_DISTANCE)?;
        check_opacity_range("link_alpha", (self.link_alpha, self.link_alpha))?;
        check_opacity_range("pointer_link_alpha", (self.pointer_link_alpha, self.pointer_link_alpha))?;

        if let Some(hz) = self.fixed_rate_hz {
            if !Self::get_tick_rate_range().contains(&hz) {
                return Err(ConfigError::invalid(
                    "fixed_rate_hz",
                    format!("expected a rate between 1 and 1000 Hz, got {hz}"),
                ));
            }
        }

        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_link_distance_range() -> std::ops::RangeInclusive<f32> {
        20.0..=300.0
    }

    pub fn get_alpha_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_tick_rate_range() -> std::ops::RangeInclusive<f32> {
        1.0..=1000.0
    }

    pub fn get_burst_size_range() -> std::ops::RangeInclusive<usize> {
        1..=200
    }
}

fn check_at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected a number >= {min}, got {value}")))
    }
}

fn check_speed(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected a non-negative number, got {value}")))
    }
}

fn check_radius(field: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min > 0.0 && min <= max {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected 0 < min <= max, got ({min}, {max})")))
    }
}

fn check_opacity_range(field: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max) && min <= max {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected values in [0, 1], got ({min}, {max})")))
    }
}
