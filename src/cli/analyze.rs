use std::collections::BTreeMap;
use std::path::PathBuf;

use comfy_table::{presets::UTF8_FULL, Cell, Table};
use log::info;

use crate::analyzer::{Analyzer, AnalyzerOptions};
use crate::error::{Error, Result};
use crate::metrics::PackageMetrics;
use crate::scanner;

/// Arguments for the analyze subcommand
pub struct AnalyzeArgs {
    pub root: PathBuf,
    pub packages: Vec<String>,
    pub format: String,
    pub sequential: bool,
}

/// Run the analyze subcommand
pub fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let packages = if args.packages.is_empty() {
        let discovered = scanner::discover_packages(&args.root)?;
        info!(
            "Discovered {} packages under {}",
            discovered.len(),
            args.root.display()
        );
        discovered.into_iter().collect()
    } else {
        args.packages.clone()
    };

    let analyzer = Analyzer::with_options(AnalyzerOptions {
        parallel: !args.sequential,
        builtin_prefixes: None,
    });
    let metrics = analyzer.analyze(&args.root, &packages)?;

    match args.format.as_str() {
        "json" => print_json(&metrics),
        "table" => {
            print_table(&metrics);
            Ok(())
        }
        other => Err(Error::internal(format!("Unknown output format: {}", other))),
    }
}

fn print_json(metrics: &BTreeMap<String, PackageMetrics>) -> Result<()> {
    match serde_json::to_string_pretty(metrics) {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(_) => Err(Error::internal("Failed to serialize metrics to JSON")),
    }
}

fn print_table(metrics: &BTreeMap<String, PackageMetrics>) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Package", "Ce", "Ca", "Classes", "Abstract", "I", "A", "D",
    ]);
    for m in metrics.values() {
        table.add_row(vec![
            Cell::new(&m.package_name),
            Cell::new(m.ce),
            Cell::new(m.ca),
            Cell::new(m.total_classes),
            Cell::new(m.abstract_classes),
            Cell::new(format!("{:.4}", m.instability)),
            Cell::new(format!("{:.4}", m.abstractness)),
            Cell::new(format!("{:.4}", m.distance)),
        ]);
    }
    println!("{table}");
}
