//! Specular rim highlight from two opposing lights.

use glam::DVec2;

use super::field::ScalarField2D;
use super::params::{ShapeParameters, SpecularParameters};
use super::shape::ShapeField;

/// Hermite smoothstep on an already clamped value.
#[inline]
pub fn smoothstep(i: f64) -> f64 {
    i * i * (3.0 - 2.0 * i)
}

/// Light direction for `angle_degrees` in image space (0 = right, 90 = up, y grows downward).
pub fn light_direction(angle_degrees: f64) -> DVec2 {
    let a = angle_degrees.to_radians();
    DVec2::new(a.cos(), -a.sin())
}

#[derive(Clone, Copy, Debug)]
pub struct SpecularField {
    sdf: ShapeField,
    lights: [DVec2; 2],
    params: SpecularParameters,
}

impl SpecularField {
    pub fn new(shape: &ShapeParameters, params: &SpecularParameters) -> Self {
        Self {
            sdf: ShapeField::new(shape),
            lights: [
                light_direction(params.angle_degrees),
                light_direction(params.angle_degrees + 180.0),
            ],
            params: *params,
        }
    }

    /// Sharpened alignment of the surface normal with the closer of the two lights.
    pub fn alignment(&self, normal: DVec2) -> f64 {
        let [a, b] = self.lights.map(|l| normal.dot(l).max(0.0));
        a.max(b).powf(self.params.angular_sharpness_power)
    }

    /// `None` outside the shape, `Some(0.0)` beyond the edge band.
    pub fn intensity_at(&self, x: f64, y: f64) -> Option<f64> {
        let distance = self.sdf.distance(x, y);
        if distance < 0.0 {
            return None;
        }
        if distance >= self.params.edge_width {
            return Some(0.0);
        }
        let alignment = self.alignment(self.sdf.normal(x, y));
        let edge = (1.0 - distance / self.params.edge_width).powf(self.params.edge_falloff_power);
        Some(smoothstep((alignment * edge).clamp(0.0, 1.0)))
    }

    pub fn generate(&self, width: u32, height: u32) -> ScalarField2D {
        ScalarField2D::from_fn(width, height, |x, y| self.intensity_at(x as f64, y as f64))
    }
}

/// Convenience wrapper sized to the shape.
pub fn generate(shape: &ShapeParameters, params: &SpecularParameters) -> ScalarField2D {
    SpecularField::new(shape, params).generate(shape.width, shape.height)
}
