//! Edge refraction map.
//!
//! Built in two stages. [`measure`] walks every pixel inside the pill, asks the refraction
//! solver for a raw magnitude and records the normal's angle, reducing the field maximum
//! per row. [`BezelMeasurements::normalize`] is then a pure map from that intermediate
//! grid to unit-range vectors. Global normalization needs the maximum before any pixel
//! can be finalized, hence the split.

use glam::DVec2;
use rayon::prelude::*;

use super::field::{Field2D, VectorField};
use super::params::{OpticalParameters, ShapeParameters};
use super::refraction;
use super::shape::ShapeField;

/// Raw stage-one result for one pixel inside the shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezelSample {
    /// Signed displacement from the refraction solver, in pixels.
    pub magnitude: f64,
    /// `atan2` of the inward normal, radians.
    pub angle: f64,
}

#[derive(Clone, Debug)]
pub struct BezelMeasurements {
    /// `None` outside the shape.
    pub samples: Field2D<Option<BezelSample>>,
    /// Largest `|magnitude|` over the field.
    pub max_magnitude: f64,
    /// Bezel width in pixels used for the solver.
    pub bezel_width: f64,
}

/// Stage one.
pub fn measure(shape: &ShapeParameters, optics: &OpticalParameters) -> BezelMeasurements {
    let sdf = ShapeField::new(shape);
    let bezel_width = shape.half_min_extent() * optics.bezel_width_fraction;

    let rows: Vec<(Vec<Option<BezelSample>>, f64)> = (0..shape.height)
        .into_par_iter()
        .map(|y| {
            let mut row_max = 0.0f64;
            let row = (0..shape.width)
                .map(|x| {
                    let (fx, fy) = (x as f64, y as f64);
                    let distance = sdf.distance(fx, fy);
                    if distance < 0.0 {
                        return None;
                    }
                    let magnitude = refraction::displacement(
                        distance,
                        bezel_width,
                        optics.glass_thickness,
                        optics.refractive_index,
                    );
                    row_max = row_max.max(magnitude.abs());
                    let n = sdf.normal(fx, fy);
                    Some(BezelSample { magnitude, angle: n.y.atan2(n.x) })
                })
                .collect();
            (row, row_max)
        })
        .collect();

    let max_magnitude = rows.iter().map(|(_, m)| *m).fold(0.0, f64::max);
    let data = rows.into_iter().flat_map(|(row, _)| row).collect();
    BezelMeasurements {
        samples: Field2D::from_vec(shape.width, shape.height, data),
        max_magnitude,
        bezel_width,
    }
}

impl BezelMeasurements {
    /// Stage two: magnitudes divided by the field maximum, rotated by the stored angle.
    /// Outside pixels and an all-zero field give the zero vector.
    pub fn normalize(&self) -> VectorField {
        let max = self.max_magnitude;
        self.samples.map(|sample| match sample {
            Some(s) if max > 0.0 => {
                let m = s.magnitude / max;
                DVec2::new(s.angle.cos(), s.angle.sin()) * m
            }
            _ => DVec2::ZERO,
        })
    }

    /// Pixel coordinates reaching the field maximum.
    pub fn argmax(&self) -> Vec<(u32, u32)> {
        self.samples
            .enumerate()
            .filter_map(|(x, y, s)| match s {
                Some(s) if self.max_magnitude > 0.0 && s.magnitude.abs() == self.max_magnitude => {
                    Some((x, y))
                }
                _ => None,
            })
            .collect()
    }
}

/// Stage one followed by stage two; also returns the physical maximum in pixels.
pub fn generate(shape: &ShapeParameters, optics: &OpticalParameters) -> (VectorField, f64) {
    let measured = measure(shape, optics);
    (measured.normalize(), measured.max_magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> ShapeParameters {
        ShapeParameters { width: 200, height: 60, corner_radius: 30.0 }
    }

    fn optics() -> OpticalParameters {
        OpticalParameters {
            refractive_index: 1.5,
            glass_thickness: 8.0,
            bezel_width_fraction: 0.3,
            lens_diameter: 400,
            radius_of_curvature_factor: 1.5,
            max_lens_displacement: 20.0,
        }
    }

    #[test]
    fn bezel_width_is_fraction_of_half_min_side() {
        let m = measure(&shape(), &optics());
        assert!((m.bezel_width - 9.0).abs() < 1e-12);
        assert!(m.max_magnitude > 0.0);
    }

    #[test]
    fn argmax_pixels_normalize_to_unit_length() {
        let m = measure(&shape(), &optics());
        let field = m.normalize();
        let peaks = m.argmax();
        assert!(!peaks.is_empty());
        for (x, y) in peaks {
            let v = field.get(x, y).copied().unwrap_or_default();
            assert!((v.length() - 1.0).abs() < 1e-12, "({x},{y}) -> {v:?}");
        }
        assert!(field.values().iter().all(|v| v.length() <= 1.0 + 1e-12));
    }

    #[test]
    fn outside_and_flat_interior_are_zero() {
        let (field, _) = generate(&shape(), &optics());
        assert_eq!(field.get(0, 0), Some(&DVec2::ZERO));
        assert_eq!(field.get(100, 30), Some(&DVec2::ZERO));
    }

    #[test]
    fn vectors_point_into_the_shape() {
        let (field, _) = generate(&shape(), &optics());
        // right flat cap edge pulls left, top edge pulls down (image y grows downward)
        let right = field.get(199, 30).copied().unwrap_or_default();
        assert!(right.x < 0.0);
        let top = field.get(100, 1).copied().unwrap_or_default();
        assert!(top.y > 0.0);
    }

    #[test]
    fn zero_maximum_normalizes_to_zero() {
        let m = BezelMeasurements {
            samples: Field2D::from_vec(1, 1, vec![Some(BezelSample { magnitude: 0.0, angle: 1.0 })]),
            max_magnitude: 0.0,
            bezel_width: 1.0,
        };
        assert_eq!(m.normalize().values(), &[DVec2::ZERO]);
        assert!(m.argmax().is_empty());
    }
}
