pub mod config;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod maps;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

// Curated re-exports
pub use config::GlassMapsConfig;
pub use error::ConfigError;
pub use maps::{generate_all, GeneratedMaps, MapKind, MapParameters};
pub use output::{OutputConfig, MapManifest};

/// Validates, generates every map in memory, then writes them. Nothing is written when
/// validation fails or a target exists without `overwrite`.
pub fn generate_and_write(cfg: &GlassMapsConfig, out: &OutputConfig) -> Result<Vec<PathBuf>> {
    let params = cfg.to_params()?;
    for w in cfg.validate() {
        warn!("config: {w}");
    }
    output::check_targets(out)?;
    info!(
        "Map size: {}x{}, Selector: {}x{}",
        cfg.maps.width, cfg.maps.height, cfg.selector.hover_width, cfg.selector.hover_height
    );
    let maps = generate_all(&params)?;
    output::write_outputs(&maps, cfg, out)
}
