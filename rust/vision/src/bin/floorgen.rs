// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: generate floor plans, curate them and derive first floors
//!
//! Usage:
//!   floorgen [options]

use floorgen_vision::{run_pipeline, PipelineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "info,floorgen_layout=debug,floorgen_vision=debug".into()
        }))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = PipelineConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--count" => {
                i += 1;
                config.plan_count = parse_value(&args, i, "count");
            }
            "--bedrooms" => {
                i += 1;
                config.generator.program.bedrooms = parse_in_range(&args, i, "bedrooms", 1, 3);
            }
            "--washrooms" => {
                i += 1;
                config.generator.program.washrooms = parse_in_range(&args, i, "washrooms", 1, 3);
            }
            "--garage" => {
                config.generator.program.garage = true;
            }
            "--no-garage" => {
                config.generator.program.garage = false;
            }
            "--attached-washroom" => {
                config.generator.program.attached_washroom = true;
            }
            "--plan" => {
                i += 1;
                config.plan_index = parse_value(&args, i, "plan");
                if config.plan_index == 0 {
                    fail("--plan is 1-based");
                }
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_value(&args, i, "seed"));
            }
            "--thickness" => {
                i += 1;
                config.carve.thickness = parse_value(&args, i, "thickness");
            }
            "--work-dir" => {
                i += 1;
                config.work_dir = PathBuf::from(required(&args, i, "work-dir"));
            }
            "--font" => {
                i += 1;
                config.curation.label.font_path =
                    Some(PathBuf::from(required(&args, i, "font")));
            }
            other => fail(&format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    tracing::info!(
        work_dir = %config.work_dir.display(),
        plans = config.plan_count,
        bedrooms = config.generator.program.bedrooms,
        washrooms = config.generator.program.washrooms,
        garage = config.generator.program.garage,
        seed = ?config.seed,
        "Starting floorgen"
    );

    match run_pipeline(&config, &mut rng) {
        Ok(report) => {
            println!(
                "Generated:   {} plans ({} failed)",
                report.generated.len(),
                report.failed_plans
            );
            println!(
                "Curated:     {} images ({} labeled)",
                report.curation.selected.len(),
                report.curation.labeled
            );
            println!("Connected:   {} plans", report.ranking.len());
            match &report.chosen_plan {
                Some(plan) => println!(
                    "First floor: {} variants from {}",
                    report.first_floor.len(),
                    plan
                ),
                None => println!("First floor: skipped"),
            }
            println!("Report:      {}", config.report_path().display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn required<'a>(args: &'a [String], i: usize, name: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value.as_str(),
        None => fail(&format!("Missing value for --{}", name)),
    }
}

fn parse_value<T: FromStr>(args: &[String], i: usize, name: &str) -> T {
    let raw = required(args, i, name);
    raw.parse()
        .unwrap_or_else(|_| fail(&format!("Invalid {} value: {}", name, raw)))
}

fn parse_in_range(args: &[String], i: usize, name: &str, min: u8, max: u8) -> u8 {
    let value: u8 = parse_value(args, i, name);
    if !(min..=max).contains(&value) {
        fail(&format!("--{} must be between {} and {}", name, min, max));
    }
    value
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    std::process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: floorgen [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --count <N>            Base layouts to generate (default: 40)");
    eprintln!("  --bedrooms <1-3>       Bedrooms per plan (default: 1)");
    eprintln!("  --washrooms <1-3>      Washrooms per plan (default: 1)");
    eprintln!("  --garage               Include a garage (default)");
    eprintln!("  --no-garage            Leave the garage out");
    eprintln!("  --attached-washroom    Attach washrooms to bedrooms");
    eprintln!("  --plan <K>             Use the K-th ranked plan for the first floor (default: 1)");
    eprintln!("  --seed <N>             Seed the random source");
    eprintln!("  --thickness <T>        Balcony depth in floor units (default: 1.0)");
    eprintln!("  --work-dir <DIR>       Output root (default: .)");
    eprintln!("  --font <PATH>          TrueType font for labels");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLOORGEN_WORK_DIR, FLOORGEN_PLAN_COUNT, FLOORGEN_BALCONY_THICKNESS,");
    eprintln!("  FLOORGEN_LABEL_FONT, FLOORGEN_SEED, RUST_LOG");
}
