//! Liquid-glass map generator CLI
//!
//! Subcommands:
//!   generate  Build the magnification, bezel displacement and specular maps (PNG + JSON manifest)
//!   inspect   Print statistics for existing maps
//!
//! Example:
//!   cargo run -- generate --config liquid-glass-config.json --out-dir public --overwrite

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glass_maps::{
    generate_and_write, inspect::MapStats, logging::init_logging, GlassMapsConfig, MapManifest,
    OutputConfig,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate liquid-glass displacement maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate all three maps and the manifest
    Generate(GenerateArgs),
    /// Print statistics for map PNGs (or every map listed in a manifest)
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// JSON or RON config. A missing file falls back to built-in defaults with a warning.
    #[arg(long, default_value = "liquid-glass-config.json")]
    config: PathBuf,
    /// Extra RON layers merged over defaults in order (replaces --config when given)
    #[arg(long)]
    overlay: Vec<PathBuf>,
    #[arg(long, default_value = "public")]
    out_dir: PathBuf,
    #[arg(long)]
    overwrite: bool,
    #[arg(long)]
    skip_manifest: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Map PNGs to inspect
    maps: Vec<PathBuf>,
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn load_config(a: &GenerateArgs) -> Result<GlassMapsConfig> {
    if !a.overlay.is_empty() {
        let (cfg, used, errors) = GlassMapsConfig::load_layered(&a.overlay);
        if !errors.is_empty() {
            anyhow::bail!("config layers failed: {}", errors.join("; "));
        }
        info!("config layers: {}", used.join(", "));
        return Ok(cfg);
    }
    if !a.config.exists() {
        warn!("{} not found; using built-in defaults", a.config.display());
        return Ok(GlassMapsConfig::default());
    }
    GlassMapsConfig::load_from_file(&a.config)
        .map_err(|e| anyhow::anyhow!("{}: {e}", a.config.display()))
}

fn cmd_generate(a: GenerateArgs) -> Result<()> {
    let cfg = load_config(&a)?;
    let out = OutputConfig {
        out_dir: a.out_dir,
        overwrite: a.overwrite,
        write_manifest: !a.skip_manifest,
    };
    info!("Generating displacement and specular maps...");
    let written = generate_and_write(&cfg, &out)?;
    info!("Wrote {} files to {}", written.len(), out.out_dir.display());
    Ok(())
}

fn cmd_inspect(a: InspectArgs) -> Result<()> {
    let mut paths = a.maps;
    if let Some(manifest_path) = &a.manifest {
        let manifest = MapManifest::load(manifest_path)?;
        let base = manifest_path.parent().map(PathBuf::from).unwrap_or_default();
        paths.extend(manifest.maps.iter().map(|m| base.join(&m.file)));
    }
    if paths.is_empty() {
        anyhow::bail!("nothing to inspect (pass map paths or --manifest)");
    }
    for p in paths {
        let img = image::open(&p).with_context(|| format!("open {}", p.display()))?.to_rgba8();
        let s = MapStats::from_image(&img);
        let total = s.total().max(1) as f64;
        println!(
            "{}: {}x{} neutral={:.1}% transparent={:.1}% displacement={} max_vec={:.3} mean_alpha={:.1}",
            p.display(),
            s.width,
            s.height,
            s.neutral as f64 / total * 100.0,
            s.transparent as f64 / total * 100.0,
            s.is_displacement_map(),
            s.max_vector,
            s.mean_alpha
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(a) => cmd_generate(a),
        Commands::Inspect(a) => cmd_inspect(a),
    }
}
