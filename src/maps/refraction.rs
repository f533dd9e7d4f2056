//! Simplified optics for one ray crossing the bezel.
//!
//! The solver answers a single question: how far (in pixels, along the direction away
//! from the edge normal) does a vertical ray shift after refracting through the glass
//! surface at a given distance from the edge. It returns a magnitude only; callers own
//! the 2D direction.

use glam::DVec2;

use super::profile::squircle_slope;

/// Air on the incident side.
pub const AIR_INDEX: f64 = 1.0;

/// Step of the central difference taken on the normalized bezel position.
pub const SLOPE_DELTA: f64 = 1e-3;

// below this the refracted ray is treated as horizontal
const VERTICAL_EPSILON: f64 = 1e-9;

/// Horizontal displacement for a ray hitting the bezel `distance_from_edge` pixels in.
///
/// Zero in the flat interior (`distance_from_edge >= bezel_width`), on total internal
/// reflection and whenever a denominator collapses.
pub fn displacement(
    distance_from_edge: f64,
    bezel_width: f64,
    glass_thickness: f64,
    refractive_index: f64,
) -> f64 {
    if !(bezel_width > 0.0) || distance_from_edge >= bezel_width {
        return 0.0;
    }
    let t = (distance_from_edge / bezel_width).max(0.0);
    // height is scaled by the thickness, position by the bezel width
    let slope = squircle_slope(t, SLOPE_DELTA) * glass_thickness / bezel_width;

    let normal = DVec2::new(-slope, 1.0).normalize_or_zero();
    let incident = DVec2::Y;

    let eta = AIR_INDEX / refractive_index;
    let cos_i = incident.dot(normal);
    let sin_i = (1.0 - cos_i * cos_i).max(0.0).sqrt();
    let sin_t = eta * sin_i;
    if sin_t.abs() > 1.0 {
        return 0.0;
    }
    let cos_t = (1.0 - sin_t * sin_t).sqrt();

    let refracted = eta * incident + (eta * cos_i - cos_t) * normal;
    if refracted.y.abs() < VERTICAL_EPSILON {
        return 0.0;
    }
    let shift = refracted.x * glass_thickness / refracted.y;
    if shift.is_finite() {
        shift
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::params::DEFAULT_REFRACTIVE_INDEX;

    const N: f64 = DEFAULT_REFRACTIVE_INDEX;

    #[test]
    fn flat_interior_is_zero() {
        assert_eq!(displacement(9.0, 9.0, 8.0, N), 0.0);
        assert_eq!(displacement(9.0001, 9.0, 8.0, N), 0.0);
        assert_eq!(displacement(1e6, 9.0, 8.0, N), 0.0);
    }

    #[test]
    fn degenerate_bezel_is_zero() {
        assert_eq!(displacement(0.0, 0.0, 8.0, N), 0.0);
        assert_eq!(displacement(1.0, -3.0, 8.0, N), 0.0);
    }

    #[test]
    fn finite_over_the_whole_bezel() {
        for bezel in [0.5, 3.0, 9.0, 40.0] {
            for thickness in [0.1, 1.0, 8.0, 200.0] {
                for i in 0..=200 {
                    let d = bezel * i as f64 / 200.0;
                    let v = displacement(d, bezel, thickness, N);
                    assert!(v.is_finite(), "d={d} bezel={bezel} t={thickness} -> {v}");
                    assert!(v >= 0.0);
                }
            }
        }
    }

    #[test]
    fn grows_towards_the_edge() {
        let bezel = 9.0;
        let mut last = 0.0;
        // t = 0 itself sits on the one-sided slope sample and is checked separately
        for i in (1..90).rev() {
            let d = bezel * i as f64 / 90.0;
            let v = displacement(d, bezel, 8.0, N);
            assert!(v + 1e-12 >= last, "not monotone at d={d}: {v} < {last}");
            last = v;
        }
        assert!(last > 0.0);
        assert!(displacement(0.0, bezel, 8.0, N) > 0.0);
    }

    #[test]
    fn stronger_glass_bends_more() {
        let weak = displacement(1.0, 9.0, 8.0, 1.2);
        let strong = displacement(1.0, 9.0, 8.0, 1.9);
        assert!(strong > weak);
    }
}
