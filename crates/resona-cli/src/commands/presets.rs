//! User preset listing.

use clap::Args;
use resona_config::{Preset, paths, user_config_dir};
use std::path::PathBuf;

#[derive(Args)]
pub struct PresetsArgs {
    /// Directory to list instead of the user presets directory
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Show preset directories only
    #[arg(long)]
    paths: bool,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let dir = args.dir.unwrap_or_else(paths::user_presets_dir);

    if args.paths {
        println!("Config directory:  {}", user_config_dir().display());
        println!("Presets directory: {}", dir.display());
        return Ok(());
    }

    let presets = paths::list_presets_in(&dir);
    println!("Presets in {}", dir.display());
    println!();

    if presets.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for path in &presets {
        match Preset::load(path) {
            Ok(preset) => match &preset.description {
                Some(description) => println!("  {:20} - {description}", preset.name),
                None => println!("  {}", preset.name),
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable preset");
            }
        }
    }

    Ok(())
}
