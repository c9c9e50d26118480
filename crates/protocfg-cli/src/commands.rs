use colored::Colorize;
use protocfg_types::{KeyId, KeyRegistry};
use serde::Serialize;

use crate::cli::*;
use crate::fleet::{self, CarView, StoreKeys};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let registry = fleet::registry()?;
    match cli.command {
        Command::Show(args) => cmd_show(args, cli.format),
        Command::Keys(args) => cmd_keys(args, &registry, cli.format),
        Command::Registry => cmd_registry(&registry, cli.format),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_show(args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let company = fleet::company(&args.fleet.make);
    let cars = fleet::cars(&company, args.fleet.golf_make.as_deref());

    let mut views = Vec::new();
    for car in &cars {
        if args.car.as_deref().is_some_and(|wanted| wanted != car.label) {
            continue;
        }
        views.push(car.resolve()?);
    }
    if let Some(wanted) = &args.car {
        anyhow::ensure!(!views.is_empty(), "unknown car: {wanted}");
    }

    match format {
        OutputFormat::Json => print_json(&views),
        OutputFormat::Text => {
            for view in &views {
                print_car(view);
            }
            Ok(())
        }
    }
}

fn print_car(view: &CarView) {
    let make = if view.make_overridden {
        format!("{} (local)", view.make.yellow())
    } else {
        view.make.normal().to_string()
    };
    println!(
        "{}  make: {}, model: {}, year: {}",
        view.car.bold(),
        make,
        view.model.cyan(),
        view.year
    );
}

fn cmd_keys(args: FleetArgs, registry: &KeyRegistry, format: OutputFormat) -> anyhow::Result<()> {
    let company = fleet::company(&args.make);
    let cars = fleet::cars(&company, args.golf_make.as_deref());

    let mut summaries = vec![StoreKeys::of("company", &company, registry)];
    summaries.extend(
        cars.iter()
            .map(|car| StoreKeys::of(car.label, &car.config, registry)),
    );

    match format {
        OutputFormat::Json => print_json(&summaries),
        OutputFormat::Text => {
            for summary in &summaries {
                let names: Vec<String> = summary
                    .keys
                    .iter()
                    .map(|key| match key.name {
                        Some(name) => format!("{name}#{}", key.id),
                        None => format!("#{}", key.id),
                    })
                    .collect();
                println!(
                    "{}  own: {}  resolved: [{}]",
                    summary.store.bold(),
                    summary.own_entries,
                    names.join(", ").dimmed()
                );
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct RegistryEntry {
    id: KeyId,
    name: &'static str,
    value_type: &'static str,
}

fn cmd_registry(registry: &KeyRegistry, format: OutputFormat) -> anyhow::Result<()> {
    let entries: Vec<RegistryEntry> = registry
        .iter()
        .map(|d| RegistryEntry {
            id: d.id,
            name: d.name,
            value_type: d.type_name,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => {
            for entry in &entries {
                println!(
                    "{:>4}  {}: {}",
                    entry.id.to_string().yellow(),
                    entry.name.bold(),
                    entry.value_type
                );
            }
            println!(
                "{} {} keys registered, no id collisions",
                "✓".green().bold(),
                entries.len()
            );
            Ok(())
        }
    }
}
