//! Headless runner: loads a catalog directory, classifies it, prints the new
//! materials, and optionally appends them to the material lists.
//!
//! Run with: `cargo run --package smeltery-data --example headless_classify -- [DIR] [--write] [--json]`
//!
//! `DIR` defaults to the bundled `data/honed_metal` catalog. `--json` dumps
//! the raw classification instead of the table. Set `RUST_LOG`
//! (e.g. `RUST_LOG=smeltery_core=debug`) for per-promotion detail.

use std::path::{Path, PathBuf};

use smeltery_core::emit::emit;
use smeltery_core::id::ItemId;
use smeltery_core::pipeline::{ClassificationReport, classify};
use smeltery_data::{DataLoadError, MaterialListFile, load_dataset};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<(), DataLoadError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/honed_metal"));
    let mut write = false;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--write" => write = true,
            "--json" => json = true,
            other => dir = PathBuf::from(other),
        }
    }

    let data = load_dataset(&dir)?;
    let report = classify(&data.registry, data.seeds.clone(), &data.config);

    let name = |id: ItemId| data.registry.item_name(id).unwrap_or("<unknown>");

    if json {
        match serde_json::to_string_pretty(&report.classification) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("cannot serialize classification: {e}"),
        }
    } else {
        print_table(&dir, &report, name);
    }

    if write {
        let mut file = MaterialListFile::open(&data.materials_path, &data.registry)?;
        let summary = emit(&report.classification, &mut file)?;
        file.save()?;
        if summary.wrote_anything() {
            println!("Updated {}", file.path().display());
        } else {
            println!("Nothing to write.");
        }
    }

    Ok(())
}

fn print_table<'a>(dir: &Path, report: &ClassificationReport, name: impl Fn(ItemId) -> &'a str) {
    println!("=== {} ===", dir.display());
    println!(
        "In-scope recipes: {}, candidates: {}, ingredients: {}, outputs: {}",
        report.in_scope_recipes,
        report.candidate_recipes,
        report.ingredient_universe,
        report.candidate_outputs
    );
    println!("Passes: {}\n", report.passes());

    for p in report.promotions() {
        let because: Vec<&str> = p.justification.iter().map(|&i| name(i)).collect();
        println!(
            "  pass {:>2}  {:<6} {:<24} <- [{}]",
            p.pass,
            format!("{:?}", p.tier),
            name(p.item),
            because.join(", ")
        );
    }
    for (item, _) in report.unclassified.iter() {
        println!("  unclassified     {}", name(item));
    }

    println!(
        "\nFound {} new basic and {} new rare materials.",
        report.newly_basic().len(),
        report.newly_rare().len()
    );
}
