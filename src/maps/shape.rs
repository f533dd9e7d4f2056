//! Rounded-rectangle (pill) signed distance field in pixel space.
//!
//! Sign convention: positive inside, negative outside, zero on the boundary, so the
//! value grows with penetration depth. The gradient therefore points into the shape.

use glam::DVec2;

use super::params::ShapeParameters;

/// Added to the gradient length before normalizing; a flat gradient yields the zero vector.
pub const NORMAL_EPSILON: f64 = 1e-4;

/// Step used by [`ShapeField::normal`], one pixel.
pub const PIXEL_STEP: f64 = 1.0;

#[derive(Clone, Copy, Debug)]
pub struct ShapeField {
    center: DVec2,
    // half extents of the straight edges (half size minus the corner radius)
    inner_half: DVec2,
    radius: f64,
}

impl ShapeField {
    pub fn new(params: &ShapeParameters) -> Self {
        let half = DVec2::new(params.width as f64, params.height as f64) / 2.0;
        Self {
            center: half,
            inner_half: half - DVec2::splat(params.corner_radius),
            radius: params.corner_radius,
        }
    }

    pub fn distance(&self, x: f64, y: f64) -> f64 {
        let q = (DVec2::new(x, y) - self.center).abs() - self.inner_half;
        let outside = q.max(DVec2::ZERO).length();
        let inside = q.x.max(q.y).min(0.0);
        -(outside + inside - self.radius)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance(x, y) >= 0.0
    }

    /// Unit gradient estimate: forward difference along x, backward difference along y.
    pub fn normal_with_step(&self, x: f64, y: f64, step: f64) -> DVec2 {
        let d = self.distance(x, y);
        let grad = DVec2::new(
            (self.distance(x + step, y) - d) / step,
            (d - self.distance(x, y - step)) / step,
        );
        grad / (grad.length() + NORMAL_EPSILON)
    }

    pub fn normal(&self, x: f64, y: f64) -> DVec2 {
        self.normal_with_step(x, y, PIXEL_STEP)
    }
}
