//! Preset to state blob conversion.

use super::common;
use clap::Args;
use resona_config::ConfigError;
use std::path::PathBuf;

#[derive(Args)]
pub struct ImportArgs {
    /// Preset file path or user preset name
    #[arg(value_name = "PRESET")]
    preset: String,

    /// State blob to write
    #[arg(value_name = "BLOB")]
    blob: PathBuf,

    /// Override a parameter (`string_id=value`, scaled units)
    #[arg(short = 'p', long = "param", value_parser = common::parse_key_val)]
    params: Vec<(String, f64)>,

    /// Overwrite an existing blob
    #[arg(long)]
    force: bool,
}

pub fn run(args: ImportArgs) -> anyhow::Result<()> {
    let table = common::table()?;
    let mut preset = common::load_preset(&args.preset)?;

    for (key, value) in args.params {
        if table.by_string_id(&key).is_none() {
            return Err(ConfigError::UnknownParameter(key).into());
        }
        preset.params.insert(key, value);
    }

    if args.blob.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            args.blob.display()
        );
    }

    let state = preset.to_state(&table)?;
    common::write_state(&args.blob, &state)?;

    println!(
        "Imported '{}' ({} parameters) to {}",
        preset.name,
        preset.params.len(),
        args.blob.display()
    );

    Ok(())
}
