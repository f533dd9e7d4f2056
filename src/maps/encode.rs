//! Packing fields into 8-bit RGBA rasters and writing them out.
//!
//! Vector maps: `R = 128 + dx * 127`, `G = 128 + dy * 127` (clamped, truncated),
//! `B = 130` marker, `A = 255`. Specular maps: solid white with the intensity in alpha,
//! fully transparent black outside the shape.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};

use super::field::{ScalarField2D, VectorField};

pub const NEUTRAL_CHANNEL: u8 = 128;
pub const MARKER_BLUE: u8 = 130;
/// Zero displacement.
pub const NEUTRAL: Rgba<u8> = Rgba([NEUTRAL_CHANNEL, NEUTRAL_CHANNEL, MARKER_BLUE, 255]);
/// Peak alpha of the highlight as a fraction of 255.
pub const SPECULAR_PEAK: f64 = 0.95;

/// Maps `[-1, 1]` onto `[1, 255]` around 128. Non-finite input encodes as neutral.
#[inline]
pub fn encode_component(v: f64) -> u8 {
    if !v.is_finite() {
        return NEUTRAL_CHANNEL;
    }
    (NEUTRAL_CHANNEL as f64 + v * 127.0).clamp(0.0, 255.0) as u8
}

/// Inverse of [`encode_component`] up to quantization.
#[inline]
pub fn decode_component(c: u8) -> f64 {
    (c as f64 - NEUTRAL_CHANNEL as f64) / 127.0
}

pub fn encode_vector_field(field: &VectorField) -> RgbaImage {
    let (w, h) = field.dimensions();
    let mut img = RgbaImage::from_pixel(w, h, NEUTRAL);
    for (x, y, v) in field.enumerate() {
        img.put_pixel(x, y, Rgba([encode_component(v.x), encode_component(v.y), MARKER_BLUE, 255]));
    }
    img
}

#[inline]
pub fn encode_intensity(i: f64) -> u8 {
    if !i.is_finite() {
        return 0;
    }
    (255.0 * i * SPECULAR_PEAK).clamp(0.0, 255.0) as u8
}

pub fn encode_specular(field: &ScalarField2D) -> RgbaImage {
    let (w, h) = field.dimensions();
    let mut img = RgbaImage::new(w, h);
    for (x, y, v) in field.enumerate() {
        let px = match v {
            Some(i) => Rgba([255, 255, 255, encode_intensity(*i)]),
            None => Rgba([0, 0, 0, 0]),
        };
        img.put_pixel(x, y, px);
    }
    img
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Writes `img` as PNG through a sibling temp file renamed into place, so a failed write
/// never leaves a truncated map behind.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    create_parent(path)?;
    let tmp = temp_path(path);
    img.save_with_format(&tmp, ImageFormat::Png)
        .with_context(|| format!("encode {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

/// Same temp-then-rename sequence as [`write_png`] for arbitrary bytes.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    create_parent(path)?;
    let tmp = temp_path(path);
    fs::write(&tmp, contents).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}
