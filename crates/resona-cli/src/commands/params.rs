//! Parameter table listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use super::common;
use clap::Args;
use resona_core::{ParamFlags, ParamKind, ParamSpec};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for one parameter (string id or numeric id)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let table = common::table()?;

    if let Some(key) = &args.param {
        let spec = match key.parse::<u32>() {
            Ok(id) => table.get(id.into())?,
            Err(_) => table
                .by_string_id(key)
                .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {key}"))?,
        };
        print_details(spec);
        return Ok(());
    }

    println!(
        "Resonator parameters ({} + bypass, state version {})",
        table.len(),
        table.state_version()
    );
    println!();
    println!(
        "  {:>3}  {:20}  {:22}  {:>12}  {:>12}  {}",
        "ID", "String ID", "Name", "Default", "Initial", "Range"
    );
    println!(
        "  {:>3}  {:20}  {:22}  {:>12}  {:>12}  {}",
        "--", "---------", "----", "-------", "-------", "-----"
    );
    for spec in &table {
        let read_only = if spec.is_read_only() { "  (read-only)" } else { "" };
        println!(
            "  {:>3}  {:20}  {:22}  {:>12}  {:>12}  {}{read_only}",
            spec.id.0,
            spec.string_id,
            spec.name,
            spec.display(spec.default).to_string(),
            spec.display(spec.initial).to_string(),
            range(spec),
        );
    }
    println!();
    println!("Use 'resona params <string id>' for details.");

    Ok(())
}

fn range(spec: &ParamSpec) -> String {
    match spec.kind {
        ParamKind::StringList(labels) => labels.join(" | "),
        _ => format!("{} .. {}", spec.display(spec.min), spec.display(spec.max)),
    }
}

fn print_details(spec: &ParamSpec) {
    println!("{} ({})", spec.name, spec.short_name);
    println!("{}", "=".repeat(spec.name.len() + spec.short_name.len() + 3));
    println!();
    println!("  id:         {}", spec.id);
    println!("  string id:  {}", spec.string_id);
    println!("  kind:       {}", kind_name(spec.kind));
    println!("  range:      {}", range(spec));
    println!("  default:    {}", spec.display(spec.default));
    println!("  initial:    {}", spec.display(spec.initial));
    if spec.kind.is_stepped() {
        println!("  steps:      {}", spec.step_count());
    }
    println!("  read-only:  {}", spec.is_read_only());
    println!("  automate:   {}", spec.flags.contains(ParamFlags::AUTOMATABLE));
}

fn kind_name(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::Linear => "linear",
        ParamKind::Logarithmic => "logarithmic",
        ParamKind::Discrete => "discrete",
        ParamKind::StringList(_) => "string list",
    }
}
