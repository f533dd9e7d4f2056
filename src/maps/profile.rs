//! Cross-section of the glass bezel: a convex squircle rising from the edge (t = 0) to the
//! flat interior (t = 1).

/// `(1 - (1 - t)^4)^(1/4)`; exact at both ends. Callers clamp `t` to `[0, 1]`.
#[inline]
pub fn squircle_height(t: f64) -> f64 {
    (1.0 - (1.0 - t).powi(4)).powf(0.25)
}

/// Central difference of [`squircle_height`]. Samples are clamped to `[0, 1]`, the
/// denominator stays `2 * delta`.
pub fn squircle_slope(t: f64, delta: f64) -> f64 {
    let lo = squircle_height((t - delta).max(0.0));
    let hi = squircle_height((t + delta).min(1.0));
    (hi - lo) / (2.0 * delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(squircle_height(0.0), 0.0);
        assert_eq!(squircle_height(1.0), 1.0);
    }

    #[test]
    fn monotone_non_decreasing() {
        let mut last = squircle_height(0.0);
        for i in 1..=1000 {
            let h = squircle_height(i as f64 / 1000.0);
            assert!(h >= last, "dropped at t={}", i as f64 / 1000.0);
            last = h;
        }
    }

    #[test]
    fn steep_at_edge_flat_inside() {
        assert!(squircle_slope(0.0, 1e-3) > 100.0);
        assert!(squircle_slope(0.9, 1e-3) < 0.01);
        assert!(squircle_slope(1.0, 1e-3) >= 0.0);
    }
}
