/*
 * Surface Module
 *
 * The drawing side of the particle field. Coordinates here are surface-space:
 * origin at the top-left pixel, x to the right, y down.
 *
 * The simulator only talks to the Canvas trait. The DrawList canvas records
 * every command so a frame can be produced in the update step and replayed
 * later by the renderer (or inspected by tests).
 */

use nannou::prelude::*;

use crate::error::SurfaceError;

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// Both dimensions must be finite and greater than zero
    pub fn new(width: f32, height: f32) -> Result<Self, SurfaceError> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if usable(width) && usable(height) {
            Ok(Self { width, height })
        } else {
            Err(SurfaceError::Unavailable { width, height })
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..self.width).contains(&point.x) && (0.0..self.height).contains(&point.y)
    }

    /// Toroidal wrap, one axis at a time
    #[inline]
    pub fn wrap(&self, point: &mut Vec2) {
        point.x = wrap_axis(point.x, self.width);
        point.y = wrap_axis(point.y, self.height);
    }
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value >= extent {
        0.0
    } else {
        value
    }
}

/// Anything the particle field can draw onto
pub trait Canvas {
    fn clear(&mut self, color: Rgb<u8>);

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgb<u8>, alpha: f32);

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb<u8>, alpha: f32, weight: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Rgb<u8>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb<u8>,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgb<u8>,
        alpha: f32,
        weight: f32,
    },
}

/// A recorded frame
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Canvas for DrawList {
    // Clearing the surface also discards the previous frame's commands
    fn clear(&mut self, color: Rgb<u8>) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgb<u8>, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb<u8>, alpha: f32, weight: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            weight,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unusable_sizes() {
        assert!(SurfaceSize::new(800.0, 600.0).is_ok());
        assert_eq!(
            SurfaceSize::new(0.0, 600.0),
            Err(SurfaceError::Unavailable { width: 0.0, height: 600.0 })
        );
        assert!(SurfaceSize::new(800.0, -1.0).is_err());
        assert!(SurfaceSize::new(f32::NAN, 600.0).is_err());
        assert!(SurfaceSize::new(f32::INFINITY, 600.0).is_err());
    }

    #[test]
    fn wrap_treats_the_far_edge_as_outside() {
        let size = SurfaceSize::new(800.0, 600.0).unwrap();

        let mut p = vec2(800.0, 600.0);
        size.wrap(&mut p);
        assert_eq!(p, vec2(0.0, 0.0));

        let mut p = vec2(-0.5, 10.0);
        size.wrap(&mut p);
        assert_eq!(p, vec2(800.0, 10.0));

        let mut p = vec2(799.9, 0.0);
        size.wrap(&mut p);
        assert_eq!(p, vec2(799.9, 0.0));
    }

    #[test]
    fn contains_is_half_open() {
        let size = SurfaceSize::new(10.0, 10.0).unwrap();
        assert!(size.contains(vec2(0.0, 0.0)));
        assert!(size.contains(vec2(9.99, 9.99)));
        assert!(!size.contains(vec2(10.0, 5.0)));
        assert!(!size.contains(vec2(5.0, -0.1)));
    }

    #[test]
    fn clear_starts_a_new_frame() {
        let mut list = DrawList::new();
        let red = nannou::color::rgb(255u8, 0, 0);

        list.circle(vec2(1.0, 1.0), 2.0, red, 0.5);
        list.line(vec2(0.0, 0.0), vec2(1.0, 1.0), red, 0.1, 0.6);
        assert_eq!(list.len(), 2);

        list.clear(red);
        assert_eq!(list.commands(), &[DrawCommand::Clear { color: red }]);
        assert_eq!(list.circles().count(), 0);
    }
}
