//! State blob inspection command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use super::common;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectArgs {
    /// State blob to decode
    #[arg(value_name = "BLOB")]
    blob: PathBuf,

    /// Only show parameters that differ from their initial value
    #[arg(long)]
    changed: bool,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let table = common::table()?;
    let state = common::read_state(&args.blob, &table)?;

    println!("State: {}", args.blob.display());
    println!("  version: {}", state.version());
    println!("  bypass:  {}", if state.bypass() { "on" } else { "off" });
    println!();
    println!(
        "  {:>3}  {:20}  {:>10}  {}",
        "ID", "String ID", "Normalized", "Value"
    );
    println!(
        "  {:>3}  {:20}  {:>10}  {}",
        "--", "---------", "----------", "-----"
    );

    let mut shown = 0;
    for (spec, &normalized) in table.iter().zip(state.values()) {
        if args.changed && normalized == spec.initial_normalized() {
            continue;
        }
        println!(
            "  {:>3}  {:20}  {:>10.6}  {}",
            spec.id.0,
            spec.string_id,
            normalized,
            spec.display(spec.to_scaled(normalized)),
        );
        shown += 1;
    }

    if args.changed && shown == 0 {
        println!("  (all parameters at their initial values)");
    }

    Ok(())
}
