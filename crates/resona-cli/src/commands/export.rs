//! State blob to preset conversion.

use super::common;
use anyhow::Context;
use clap::Args;
use resona_config::{Preset, paths};
use std::path::PathBuf;

#[derive(Args)]
pub struct ExportArgs {
    /// State blob to read
    #[arg(value_name = "BLOB")]
    blob: PathBuf,

    /// Preset file to write (defaults to the user presets directory)
    #[arg(value_name = "PRESET")]
    preset: Option<PathBuf>,

    /// Preset name (defaults to the output file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Preset description
    #[arg(short, long)]
    description: Option<String>,

    /// Overwrite an existing preset file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let table = common::table()?;
    let state = common::read_state(&args.blob, &table)?;

    let name = args
        .name
        .or_else(|| args.preset.as_deref().and_then(paths::preset_name_from_path))
        .or_else(|| paths::preset_name_from_path(&args.blob))
        .unwrap_or_else(|| "Untitled".to_string());

    let path = match args.preset {
        Some(path) => path,
        None => paths::ensure_user_presets_dir()?.join(format!("{name}.toml")),
    };
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let mut preset = Preset::from_state(name, &table, &state);
    if let Some(description) = args.description {
        preset = preset.with_description(description);
    }
    preset
        .save(&path)
        .with_context(|| format!("failed to export to {}", path.display()))?;

    println!("Exported '{}' to {}", preset.name, path.display());

    Ok(())
}
