//! Scenario calculator entry point: CLI wiring and table-driven setup.

use std::path::{Path, PathBuf};
use std::process;

use log::info;

use modeshift::config::LeverSettings;
use modeshift::engine::ScenarioEngine;
use modeshift::io::export::export_csv;
use modeshift::io::load::load_dir;
use modeshift::model::DerivedConstants;
use modeshift::projects::ProjectEffectTable;
use modeshift::summary::SummaryReport;

/// Parsed CLI arguments.
struct CliArgs {
    data_dir: PathBuf,
    levers_path: Option<String>,
    preset: Option<String>,
    out: Option<String>,
}

fn print_help() {
    eprintln!("modeshift: what-if scenario calculator for regional transport emissions");
    eprintln!();
    eprintln!("Usage: modeshift [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data-dir <path>   Directory with the three input CSVs (default: data)");
    eprintln!("  --levers <path>     Load lever settings from a TOML file");
    eprintln!("  --preset <name>     Use a built-in lever preset ({})", LeverSettings::PRESETS.join(", "));
    eprintln!("  --out <path>        Export the computed dataset as CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --levers or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        data_dir: PathBuf::from("data"),
        levers_path: None,
        preset: None,
        out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--data-dir" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --data-dir requires a path argument");
                    process::exit(1);
                }
                cli.data_dir = PathBuf::from(&args[i]);
            }
            "--levers" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --levers requires a path argument");
                    process::exit(1);
                }
                cli.levers_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out requires a path argument");
                    process::exit(1);
                }
                cli.out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.levers_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --levers and --preset are mutually exclusive; choose one source");
        process::exit(1);
    }

    cli
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    // Lever settings: --levers takes priority, then --preset, then baseline
    let levers = if let Some(ref path) = cli.levers_path {
        match LeverSettings::from_toml_file(Path::new(path)) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match LeverSettings::from_preset(name) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        LeverSettings::baseline()
    };

    let errors = levers.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Static inputs: tables, derived constants, project effects
    let tables = match load_dir(&cli.data_dir) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let constants = match DerivedConstants::from_dataset(&tables.dataset) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let effects = match ProjectEffectTable::compute(&tables.projects, &tables.dataset, &constants) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    info!(
        "tables ready: {} candidate project(s), private baseline pkt {:.0}",
        effects.len(),
        constants.private_pkt_total
    );

    // Evaluate
    let engine = ScenarioEngine::new(&tables.dataset, &constants, &effects, &tables.factors);
    let result = match engine.evaluate(&levers) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Per-mode table, then the headline summary
    println!("{result}");
    println!("\n{}", SummaryReport::from_dataset(&result, &constants));

    // Export CSV if requested
    if let Some(ref path) = cli.out {
        if let Err(e) = export_csv(&result, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Dataset written to {path}");
    }
}
