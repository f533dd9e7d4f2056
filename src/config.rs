use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::ConfigError;
use crate::maps::params::{
    MapParameters, OpticalParameters, ShapeParameters, SpecularParameters,
    DEFAULT_REFRACTIVE_INDEX,
};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Size of the hovered selector the maps are drawn for.
    pub hover_width: f64,
    pub hover_height: f64,
    pub corner_radius: f64,
}
impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            hover_width: 200.0,
            hover_height: 60.0,
            corner_radius: 30.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapsConfig {
    pub width: u32,
    pub height: u32,
}
impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MagnificationConfig {
    pub lens_diameter: u32,
    /// Radius of curvature as a multiple of the lens diameter; larger is gentler.
    pub radius_of_curvature_factor: f64,
    pub max_displacement: f64,
}
impl Default for MagnificationConfig {
    fn default() -> Self {
        Self {
            lens_diameter: 600,
            radius_of_curvature_factor: 1.5,
            max_displacement: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BezelConfig {
    /// Fraction of half the smaller map side covered by the sloped rim.
    pub width_fraction: f64,
    pub glass_thickness: f64,
    pub refractive_index: f64,
}
impl Default for BezelConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.3,
            glass_thickness: 8.0,
            refractive_index: DEFAULT_REFRACTIVE_INDEX,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecularConfig {
    /// Degrees, 0 = right, 90 = top. The opposite side is lit as well.
    pub angle: f64,
    pub edge_width: f64,
    pub edge_falloff_power: f64,
    pub angular_sharpness_power: f64,
}
impl Default for SpecularConfig {
    fn default() -> Self {
        Self {
            angle: 45.0,
            edge_width: 6.0,
            edge_falloff_power: 2.0,
            angular_sharpness_power: 3.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GlassMapsConfig {
    pub selector: SelectorConfig,
    pub maps: MapsConfig,
    pub magnification: MagnificationConfig,
    pub bezel: BezelConfig,
    pub specular: SpecularConfig,
}

impl GlassMapsConfig {
    /// JSON when the extension is `.json`, RON otherwise.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| format!("read config: {e}"))?;
        if is_json(path) {
            serde_json::from_str(&data).map_err(|e| format!("parse JSON: {e}"))
        } else {
            ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
        }
    }

    /// Merges RON documents key by key, later files winning. Returns the config, the paths
    /// that were used and any errors met on the way.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        match existing {
                            Some(ev) => merge_value(ev, v),
                            None => {
                                bm.insert(k, v);
                            }
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GlassMapsConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!("failed to deserialize merged config; using defaults: {e}"));
                    (GlassMapsConfig::default(), used, errors)
                }
            },
            None => (GlassMapsConfig::default(), used, errors),
        }
    }

    /// Builds the validated parameter bundle; any out-of-range value is fatal.
    pub fn to_params(&self) -> Result<MapParameters, ConfigError> {
        let shape =
            ShapeParameters::new(self.maps.width, self.maps.height, self.selector.corner_radius)?;
        let optics = OpticalParameters {
            refractive_index: self.bezel.refractive_index,
            glass_thickness: self.bezel.glass_thickness,
            bezel_width_fraction: self.bezel.width_fraction,
            lens_diameter: self.magnification.lens_diameter,
            radius_of_curvature_factor: self.magnification.radius_of_curvature_factor,
            max_lens_displacement: self.magnification.max_displacement,
        };
        let specular = SpecularParameters {
            angle_degrees: self.specular.angle,
            edge_width: self.specular.edge_width,
            edge_falloff_power: self.specular.edge_falloff_power,
            angular_sharpness_power: self.specular.angular_sharpness_power,
        };
        MapParameters::new(shape, optics, specular)
    }

    /// Soft warnings: values that generate valid but probably unintended maps.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        let (mw, mh) = (self.maps.width as f64, self.maps.height as f64);
        if (self.selector.hover_width - mw).abs() > f64::EPSILON
            || (self.selector.hover_height - mh).abs() > f64::EPSILON
        {
            w.push(format!(
                "selector {}x{} differs from maps {}x{}; the renderer will stretch the maps",
                self.selector.hover_width, self.selector.hover_height, mw, mh
            ));
        }
        let largest = mw.max(mh);
        if (self.magnification.lens_diameter as f64) < largest * 1.5 {
            w.push(format!(
                "magnification.lensDiameter {} under 1.5x the map ({}); crop reaches the steep rim",
                self.magnification.lens_diameter, largest
            ));
        }
        if self.magnification.radius_of_curvature_factor > 0.0
            && self.magnification.radius_of_curvature_factor < 0.5
        {
            w.push(format!(
                "magnification.radiusOfCurvatureFactor {} < 0.5; normalized vectors will clip",
                self.magnification.radius_of_curvature_factor
            ));
        }
        let half_min = mw.min(mh) / 2.0;
        if self.specular.edge_width > half_min {
            w.push(format!(
                "specular.edgeWidth {} wider than half the map ({}); highlight covers the whole shape",
                self.specular.edge_width, half_min
            ));
        }
        if self.bezel.glass_thickness > half_min * 4.0 {
            w.push(format!(
                "bezel.glassThickness {} very large relative to the map",
                self.bezel.glass_thickness
            ));
        }
        if self.bezel.refractive_index > 2.5 {
            w.push(format!(
                "bezel.refractiveIndex {} beyond common glass (1.4..1.9)",
                self.bezel.refractive_index
            ));
        }
        if self.selector.corner_radius < half_min && self.selector.corner_radius >= 0.0 {
            w.push(format!(
                "selector.cornerRadius {} below {}; shape is a rounded rectangle rather than a pill",
                self.selector.corner_radius, half_min
            ));
        }
        w
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_sample_json_config() {
        let sample = r#"{
            "selector": { "hoverWidth": 200, "hoverHeight": 60, "cornerRadius": 30 },
            "maps": { "width": 200, "height": 60 },
            "magnification": { "lensDiameter": 600, "radiusOfCurvatureFactor": 1.5, "maxDisplacement": 20 },
            "bezel": { "widthFraction": 0.3, "glassThickness": 8 },
            "specular": { "angle": 45, "edgeWidth": 6, "edgeFalloffPower": 2, "angularSharpnessPower": 3 }
        }"#;
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("tmp file");
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = GlassMapsConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.maps.width, 200);
        assert_eq!(cfg.magnification.lens_diameter, 600);
        assert_eq!(cfg.bezel.glass_thickness, 8.0);
        // not in the document, default kept
        assert_eq!(cfg.bezel.refractive_index, DEFAULT_REFRACTIVE_INDEX);
        assert!(cfg.to_params().is_ok());
        assert!(cfg.validate().is_empty(), "unexpected warnings: {:?}", cfg.validate());
    }

    #[test]
    fn parse_sample_ron_config() {
        let sample = r"(
            selector: (hoverWidth: 240.0, hoverHeight: 64.0, cornerRadius: 32.0),
            maps: (width: 240, height: 64),
            bezel: (widthFraction: 0.25, refractiveIndex: 1.7),
            specular: (angle: 120.0),
        )";
        let mut file = tempfile::NamedTempFile::new().expect("tmp file");
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = GlassMapsConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.maps.width, 240);
        assert_eq!(cfg.selector.corner_radius, 32.0);
        assert_eq!(cfg.bezel.refractive_index, 1.7);
        assert_eq!(cfg.specular.angle, 120.0);
        assert_eq!(cfg.specular.edge_width, SpecularConfig::default().edge_width);
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = GlassMapsConfig::default();
        let params = cfg.to_params().expect("defaults must validate");
        assert_eq!(params.shape.width, 200);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn to_params_surfaces_config_errors() {
        let mut cfg = GlassMapsConfig::default();
        cfg.bezel.refractive_index = 1.0;
        assert_eq!(cfg.to_params(), Err(ConfigError::RefractiveIndex(1.0)));

        let mut cfg = GlassMapsConfig::default();
        cfg.selector.corner_radius = 45.0;
        assert!(matches!(cfg.to_params(), Err(ConfigError::DegenerateCorner { .. })));

        let mut cfg = GlassMapsConfig::default();
        cfg.magnification.lens_diameter = 100;
        assert!(matches!(cfg.to_params(), Err(ConfigError::LensTooSmall { .. })));

        let mut cfg = GlassMapsConfig::default();
        cfg.bezel.glass_thickness = -2.0;
        assert!(matches!(
            cfg.to_params(),
            Err(ConfigError::NonPositive { field: "bezel.glassThickness", .. })
        ));
    }

    #[test]
    fn validate_detects_warnings() {
        let mut cfg = GlassMapsConfig::default();
        cfg.selector.hover_width = 180.0;
        cfg.magnification.lens_diameter = 220;
        cfg.specular.edge_width = 40.0;
        cfg.bezel.refractive_index = 3.0;
        cfg.selector.corner_radius = 10.0;
        let joined = cfg.validate().join(" | ");
        assert!(joined.contains("differs from maps"));
        assert!(joined.contains("magnification.lensDiameter"));
        assert!(joined.contains("specular.edgeWidth"));
        assert!(joined.contains("bezel.refractiveIndex"));
        assert!(joined.contains("rather than a pill"));
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r"(
            maps: (width: 300, height: 80),
            bezel: (glassThickness: 10.0),
        )";
        let override_one = r"(
            bezel: (widthFraction: 0.5),
            specular: (angle: 10.0),
        )";
        let mut f1 = tempfile::NamedTempFile::new().unwrap();
        let mut f2 = tempfile::NamedTempFile::new().unwrap();
        f1.write_all(base.as_bytes()).unwrap();
        f2.write_all(override_one.as_bytes()).unwrap();
        let (cfg, used, errors) = GlassMapsConfig::load_layered([f1.path(), f2.path()]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.maps.width, 300); // from base
        assert_eq!(cfg.bezel.glass_thickness, 10.0); // kept from base
        assert_eq!(cfg.bezel.width_fraction, 0.5); // overridden
        assert_eq!(cfg.specular.angle, 10.0);
        assert_eq!(cfg.magnification, MagnificationConfig::default());
    }

    #[test]
    fn layered_reports_missing_layers() {
        let (cfg, used, errors) = GlassMapsConfig::load_layered(["no/such/layer.ron"]);
        assert!(used.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(cfg, GlassMapsConfig::default());
    }
}
