//! Immutable parameter bundles threaded through every generator call.
//! Constructors validate; once built, generators assume the values are in range.

use crate::error::ConfigError;

/// Refractive index of the glass when the config does not set one.
pub const DEFAULT_REFRACTIVE_INDEX: f64 = 1.5;

/// Pill silhouette sized to the output map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParameters {
    pub width: u32,
    pub height: u32,
    pub corner_radius: f64,
}

impl ShapeParameters {
    pub fn new(width: u32, height: u32, corner_radius: f64) -> Result<Self, ConfigError> {
        ConfigError::require_positive("maps.width", width as f64)?;
        ConfigError::require_positive("maps.height", height as f64)?;
        if !(corner_radius >= 0.0 && corner_radius.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "selector.cornerRadius",
                value: corner_radius,
                range: "[0, min(width, height) / 2]",
            });
        }
        if corner_radius > width.min(height) as f64 / 2.0 {
            return Err(ConfigError::DegenerateCorner {
                radius: corner_radius,
                width: width as f64,
                height: height as f64,
            });
        }
        Ok(Self { width, height, corner_radius })
    }

    /// Half of the smaller side; the bezel width is a fraction of this.
    pub fn half_min_extent(&self) -> f64 {
        self.width.min(self.height) as f64 / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpticalParameters {
    pub refractive_index: f64,
    pub glass_thickness: f64,
    pub bezel_width_fraction: f64,
    pub lens_diameter: u32,
    pub radius_of_curvature_factor: f64,
    pub max_lens_displacement: f64,
}

impl OpticalParameters {
    /// Checks every optical constant and that the lens covers a `map_width x map_height` crop.
    pub fn validate(&self, map_width: u32, map_height: u32) -> Result<(), ConfigError> {
        if !(self.refractive_index > 1.0 && self.refractive_index.is_finite()) {
            return Err(ConfigError::RefractiveIndex(self.refractive_index));
        }
        ConfigError::require_positive("bezel.glassThickness", self.glass_thickness)?;
        if !(self.bezel_width_fraction > 0.0 && self.bezel_width_fraction <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "bezel.widthFraction",
                value: self.bezel_width_fraction,
                range: "(0, 1]",
            });
        }
        ConfigError::require_positive("magnification.lensDiameter", self.lens_diameter as f64)?;
        ConfigError::require_positive(
            "magnification.radiusOfCurvatureFactor",
            self.radius_of_curvature_factor,
        )?;
        ConfigError::require_positive("magnification.maxDisplacement", self.max_lens_displacement)?;
        if self.lens_diameter < map_width || self.lens_diameter < map_height {
            return Err(ConfigError::LensTooSmall {
                diameter: self.lens_diameter,
                width: map_width,
                height: map_height,
            });
        }
        Ok(())
    }

    pub fn radius_of_curvature(&self) -> f64 {
        self.lens_diameter as f64 * self.radius_of_curvature_factor
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpecularParameters {
    pub angle_degrees: f64,
    pub edge_width: f64,
    pub edge_falloff_power: f64,
    pub angular_sharpness_power: f64,
}

impl SpecularParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..360.0).contains(&self.angle_degrees) {
            return Err(ConfigError::OutOfRange {
                field: "specular.angle",
                value: self.angle_degrees,
                range: "[0, 360)",
            });
        }
        ConfigError::require_positive("specular.edgeWidth", self.edge_width)?;
        ConfigError::require_positive("specular.edgeFalloffPower", self.edge_falloff_power)?;
        ConfigError::require_positive("specular.angularSharpnessPower", self.angular_sharpness_power)
    }
}

/// Everything the three generators need, validated as a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapParameters {
    pub shape: ShapeParameters,
    pub optics: OpticalParameters,
    pub specular: SpecularParameters,
}

impl MapParameters {
    pub fn new(
        shape: ShapeParameters,
        optics: OpticalParameters,
        specular: SpecularParameters,
    ) -> Result<Self, ConfigError> {
        optics.validate(shape.width, shape.height)?;
        specular.validate()?;
        Ok(Self { shape, optics, specular })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn corner_radius_bounded_by_half_min_side() {
        assert!(ShapeParameters::new(200, 60, 30.0).is_ok());
        assert!(ShapeParameters::new(200, 60, 0.0).is_ok());
        assert!(matches!(
            ShapeParameters::new(200, 60, 30.5),
            Err(ConfigError::DegenerateCorner { .. })
        ));
        assert!(ShapeParameters::new(0, 60, 0.0).is_err());
        assert!(ShapeParameters::new(200, 60, -1.0).is_err());
    }

    #[test]
    fn optics_rejects_out_of_range_values() {
        assert!(optics().validate(200, 60).is_ok());
        let cases = [
            OpticalParameters { refractive_index: 1.0, ..optics() },
            OpticalParameters { glass_thickness: -1.0, ..optics() },
            OpticalParameters { bezel_width_fraction: 0.0, ..optics() },
            OpticalParameters { bezel_width_fraction: 1.2, ..optics() },
            OpticalParameters { lens_diameter: 0, ..optics() },
            OpticalParameters { radius_of_curvature_factor: 0.0, ..optics() },
            OpticalParameters { max_lens_displacement: f64::NAN, ..optics() },
        ];
        for c in cases {
            assert!(c.validate(200, 60).is_err(), "expected error for {c:?}");
        }
        assert!(matches!(
            optics().validate(500, 60),
            Err(ConfigError::LensTooSmall { .. })
        ));
    }

    #[test]
    fn specular_angle_half_open() {
        let base = SpecularParameters {
            angle_degrees: 0.0,
            edge_width: 6.0,
            edge_falloff_power: 2.0,
            angular_sharpness_power: 3.0,
        };
        assert!(base.validate().is_ok());
        assert!(SpecularParameters { angle_degrees: 359.9, ..base }.validate().is_ok());
        assert!(SpecularParameters { angle_degrees: 360.0, ..base }.validate().is_err());
        assert!(SpecularParameters { edge_width: 0.0, ..base }.validate().is_err());
    }
}
