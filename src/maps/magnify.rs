//! Center magnification: a large parabolic lens whose gentle middle is cropped out.

use glam::DVec2;

use super::field::VectorField;
use super::params::OpticalParameters;

#[derive(Clone, Copy, Debug)]
pub struct MagnificationField {
    diameter: u32,
    radius_of_curvature: f64,
    max_displacement: f64,
}

impl MagnificationField {
    pub fn new(optics: &OpticalParameters) -> Self {
        Self {
            diameter: optics.lens_diameter,
            radius_of_curvature: optics.radius_of_curvature(),
            max_displacement: optics.max_lens_displacement,
        }
    }

    /// Physical displacement in pixels at lens-space pixel `(x, y)`, pointing at the center.
    pub fn displacement_at(&self, x: f64, y: f64) -> DVec2 {
        let center = DVec2::splat(self.diameter as f64 / 2.0);
        let offset = DVec2::new(x, y) - center;
        let r = offset.length();
        if r >= self.diameter as f64 / 2.0 || r == 0.0 {
            return DVec2::ZERO;
        }
        let slope = r / self.radius_of_curvature;
        -(offset / r) * (slope * self.max_displacement)
    }

    /// Full `diameter x diameter` lens, components divided by the max displacement.
    pub fn lens(&self) -> VectorField {
        VectorField::from_fn(self.diameter, self.diameter, |x, y| {
            self.displacement_at(x as f64, y as f64) / self.max_displacement
        })
    }

    /// Lens center-cropped to the output size. `None` when the lens is smaller than the output.
    pub fn generate(&self, width: u32, height: u32) -> Option<VectorField> {
        self.lens().crop_center(width, height)
    }

    pub fn max_displacement(&self) -> f64 {
        self.max_displacement
    }
}
