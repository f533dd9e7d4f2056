//! Statistics over an encoded map, used by the inspect tool and tests.

use image::RgbaImage;

use crate::maps::encode::{decode_component, MARKER_BLUE, NEUTRAL};

#[derive(Clone, Debug, PartialEq)]
pub struct MapStats {
    pub width: u32,
    pub height: u32,
    /// Pixels equal to the zero-displacement encoding.
    pub neutral: u64,
    /// Pixels with alpha 0.
    pub transparent: u64,
    /// Pixels carrying the blue marker of a displacement map.
    pub marked: u64,
    /// Longest decoded `(R, G)` vector among marked pixels.
    pub max_vector: f64,
    pub mean_alpha: f64,
}

impl MapStats {
    pub fn from_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut stats = MapStats {
            width,
            height,
            neutral: 0,
            transparent: 0,
            marked: 0,
            max_vector: 0.0,
            mean_alpha: 0.0,
        };
        let mut alpha_sum = 0u64;
        for p in img.pixels() {
            let [r, g, b, a] = p.0;
            alpha_sum += a as u64;
            if *p == NEUTRAL {
                stats.neutral += 1;
            }
            if a == 0 {
                stats.transparent += 1;
            }
            if b == MARKER_BLUE {
                stats.marked += 1;
                let v = decode_component(r).hypot(decode_component(g));
                stats.max_vector = stats.max_vector.max(v);
            }
        }
        let total = width as u64 * height as u64;
        if total > 0 {
            stats.mean_alpha = alpha_sum as f64 / total as f64;
        }
        stats
    }

    pub fn total(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when every pixel carries the displacement marker.
    pub fn is_displacement_map(&self) -> bool {
        self.total() > 0 && self.marked == self.total()
    }
}
