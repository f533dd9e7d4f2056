//! Writing generated maps plus the JSON manifest describing them.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::config::GlassMapsConfig;
use crate::maps::{encode, GeneratedMaps, MapKind};

pub const MANIFEST_FILE: &str = "liquid-glass-maps.json";
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Clone, Debug)]
pub struct OutputConfig {
    pub out_dir: PathBuf,
    pub overwrite: bool,
    pub write_manifest: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { out_dir: PathBuf::from("public"), overwrite: false, write_manifest: true }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub kind: String,
    pub file: String,
    /// Pixels represented by a normalized vector of length 1.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_displacement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub angle: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapManifest {
    pub version: u32,
    pub map_width: u32,
    pub map_height: u32,
    pub selector_width: f64,
    pub selector_height: f64,
    pub corner_radius: f64,
    pub maps: Vec<ManifestEntry>,
}

impl MapManifest {
    pub fn new(cfg: &GlassMapsConfig, maps: &GeneratedMaps) -> Self {
        let entry = |kind: MapKind| ManifestEntry {
            kind: kind.label().to_string(),
            file: kind.file_name().to_string(),
            max_displacement: match kind {
                MapKind::Magnify => Some(maps.magnify_max_displacement),
                MapKind::Displacement => Some(maps.bezel_max_displacement),
                MapKind::Specular => None,
            },
            angle: (kind == MapKind::Specular).then_some(cfg.specular.angle),
        };
        Self {
            version: MANIFEST_VERSION,
            map_width: cfg.maps.width,
            map_height: cfg.maps.height,
            selector_width: cfg.selector.hover_width,
            selector_height: cfg.selector.hover_height,
            corner_radius: cfg.selector.corner_radius,
            maps: MapKind::ALL.into_iter().map(entry).collect(),
        }
    }

    /// Pretty JSON through a temp file, like the maps.
    pub fn write(&self, path: &Path) -> Result<()> {
        let js = serde_json::to_string_pretty(self)?;
        encode::write_atomic(path, js.as_bytes())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&txt).with_context(|| format!("parse manifest {}", path.display()))
    }
}

pub fn map_path(out: &OutputConfig, kind: MapKind) -> PathBuf {
    out.out_dir.join(kind.file_name())
}

/// Every file a run would produce, maps first.
pub fn planned_paths(out: &OutputConfig) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = MapKind::ALL.iter().map(|k| map_path(out, *k)).collect();
    if out.write_manifest {
        paths.push(out.out_dir.join(MANIFEST_FILE));
    }
    paths
}

/// Refuses before touching anything when a target exists and overwrite is off.
pub fn check_targets(out: &OutputConfig) -> Result<()> {
    if out.overwrite {
        return Ok(());
    }
    for p in planned_paths(out) {
        if p.exists() {
            bail!("Refusing to overwrite {} (use --overwrite)", p.display());
        }
    }
    Ok(())
}

pub fn write_outputs(
    maps: &GeneratedMaps,
    cfg: &GlassMapsConfig,
    out: &OutputConfig,
) -> Result<Vec<PathBuf>> {
    check_targets(out)?;
    fs::create_dir_all(&out.out_dir)
        .with_context(|| format!("create {}", out.out_dir.display()))?;
    let mut written = Vec::new();
    for kind in MapKind::ALL {
        let path = map_path(out, kind);
        encode::write_png(maps.image(kind), &path)?;
        let (w, h) = maps.image(kind).dimensions();
        match kind {
            MapKind::Magnify => info!(
                "Generated {} map ({}x{}) with max displacement: {:.2}px",
                kind.label(), w, h, maps.magnify_max_displacement
            ),
            MapKind::Displacement => info!(
                "Generated {} map ({}x{}) with max displacement: {:.2}px",
                kind.label(), w, h, maps.bezel_max_displacement
            ),
            MapKind::Specular => info!(
                "Generated {} map ({}x{}) with smooth gradient at {}° angle",
                kind.label(), w, h, cfg.specular.angle
            ),
        }
        written.push(path);
    }
    if out.write_manifest {
        let path = out.out_dir.join(MANIFEST_FILE);
        MapManifest::new(cfg, maps).write(&path)?;
        written.push(path);
    }
    Ok(written)
}
