//! Procedural generation of the three liquid-glass maps.

pub mod bezel;
pub mod encode;
pub mod field;
pub mod magnify;
pub mod params;
pub mod profile;
pub mod refraction;
pub mod shape;
pub mod specular;

use image::RgbaImage;
use tracing::debug;

pub use field::{Field2D, ScalarField2D, VectorField};
pub use params::{MapParameters, OpticalParameters, ShapeParameters, SpecularParameters};

use crate::error::ConfigError;
use magnify::MagnificationField;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapKind {
    Magnify,
    Displacement,
    Specular,
}

impl MapKind {
    pub const ALL: [MapKind; 3] = [MapKind::Magnify, MapKind::Displacement, MapKind::Specular];

    pub fn file_name(self) -> &'static str {
        match self {
            MapKind::Magnify => "liquid-glass-magnify.png",
            MapKind::Displacement => "liquid-glass-displacement.png",
            MapKind::Specular => "liquid-glass-specular.png",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MapKind::Magnify => "magnification",
            MapKind::Displacement => "bezel displacement",
            MapKind::Specular => "specular",
        }
    }
}

/// Encoded rasters plus the physical scale a renderer needs to undo the normalization.
#[derive(Clone, Debug)]
pub struct GeneratedMaps {
    pub magnify: RgbaImage,
    pub displacement: RgbaImage,
    pub specular: RgbaImage,
    /// Lens displacement in pixels that a normalized magnitude of 1 stands for.
    pub magnify_max_displacement: f64,
    /// Largest bezel displacement in pixels found in the field.
    pub bezel_max_displacement: f64,
}

impl GeneratedMaps {
    pub fn image(&self, kind: MapKind) -> &RgbaImage {
        match kind {
            MapKind::Magnify => &self.magnify,
            MapKind::Displacement => &self.displacement,
            MapKind::Specular => &self.specular,
        }
    }
}

/// Fails with [`ConfigError::LensTooSmall`] when the lens cannot cover the map; parameters
/// assembled by hand skip the check in [`MapParameters::new`].
pub fn generate_magnify(params: &MapParameters) -> Result<(RgbaImage, f64), ConfigError> {
    let (width, height) = (params.shape.width, params.shape.height);
    let lens = MagnificationField::new(&params.optics);
    let field = lens.generate(width, height).ok_or(ConfigError::LensTooSmall {
        diameter: params.optics.lens_diameter,
        width,
        height,
    })?;
    Ok((encode::encode_vector_field(&field), lens.max_displacement()))
}

pub fn generate_displacement(params: &MapParameters) -> (RgbaImage, f64) {
    let (field, max) = bezel::generate(&params.shape, &params.optics);
    (encode::encode_vector_field(&field), max)
}

pub fn generate_specular(params: &MapParameters) -> RgbaImage {
    encode::encode_specular(&specular::generate(&params.shape, &params.specular))
}

/// Runs the three independent pipelines concurrently and returns only when all are done.
pub fn generate_all(params: &MapParameters) -> Result<GeneratedMaps, ConfigError> {
    let (magnify, ((displacement, bezel_max), specular)) = rayon::join(
        || generate_magnify(params),
        || rayon::join(|| generate_displacement(params), || generate_specular(params)),
    );
    let (magnify, magnify_max) = magnify?;
    debug!(
        magnify_max,
        bezel_max,
        width = params.shape.width,
        height = params.shape.height,
        "maps generated"
    );
    Ok(GeneratedMaps {
        magnify,
        displacement,
        specular,
        magnify_max_displacement: magnify_max,
        bezel_max_displacement: bezel_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlassMapsConfig;

    #[test]
    fn hand_built_small_lens_is_rejected() {
        let mut params = GlassMapsConfig::default().to_params().unwrap();
        params.optics.lens_diameter = 100;
        assert_eq!(
            generate_magnify(&params).unwrap_err(),
            ConfigError::LensTooSmall { diameter: 100, width: 200, height: 60 }
        );
        assert!(matches!(generate_all(&params), Err(ConfigError::LensTooSmall { .. })));
    }

    #[test]
    fn generated_maps_match_configured_size() {
        let params = GlassMapsConfig::default().to_params().unwrap();
        let maps = generate_all(&params).unwrap();
        for kind in MapKind::ALL {
            assert_eq!(maps.image(kind).dimensions(), (200, 60), "{}", kind.label());
        }
        assert_eq!(maps.magnify_max_displacement, 20.0);
        assert!(maps.bezel_max_displacement > 0.0);
    }
}
