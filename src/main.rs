use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use socio_dashboard::config::{self, init_tracing};
use socio_dashboard::{
    export_table_to_path, load_dataset, render_topic, validate, ExportTable, LoadedDataset, Selection, Severity, Topic,
};

const USAGE: &str = "usage: socio-dashboard [--config <path>] [summary | topic <name> | validate | export <table> <out.csv>]";

/// Command line after `--config` has been pulled out.
struct Cli {
    config: Option<PathBuf>,
    command: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Cli> {
    let mut config = None;
    let mut command = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config needs a path")?;
            config = Some(PathBuf::from(path));
        } else {
            command.push(arg.clone());
        }
    }
    Ok(Cli { config, command })
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let config = config::load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    let data_path = config::dataset_path(&config, env::var(config::DATA_ENV).ok());
    let loaded = load_dataset(&data_path)?;
    let selection = config.initial_selection();

    let command: Vec<&str> = cli.command.iter().map(String::as_str).collect();
    match command.as_slice() {
        [] | ["summary"] => run_summary(&loaded),
        ["topic", name] => run_topic(&loaded, &selection, name),
        ["validate"] => run_validate(&loaded),
        ["export", table, out] => run_export(&loaded, &selection, table, Path::new(out)),
        _ => bail!("{}", USAGE),
    }
}

fn run_summary(loaded: &LoadedDataset) -> Result<()> {
    println!("📊 Socioeconomic Dashboard v{}", socio_dashboard::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Source:  {}", loaded.source.origin);
    println!("SHA-256: {}", loaded.source.sha256);
    println!();

    for card in socio_dashboard::transforms::home::scorecards(&loaded.dataset) {
        let year = card.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        println!("  {:<28} {:>10}{}", card.label, card.display_value(), year);
    }
    Ok(())
}

fn run_topic(loaded: &LoadedDataset, selection: &Selection, name: &str) -> Result<()> {
    let topic: Topic = name.parse()?;
    let view = render_topic(&loaded.dataset, selection, topic)?;
    let json = serde_json::to_string_pretty(&view).context("Failed to serialize topic view")?;
    println!("{}", json);
    Ok(())
}

fn run_validate(loaded: &LoadedDataset) -> Result<()> {
    println!("🔍 Dataset validation");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let report = validate(loaded);
    for count in &report.collections {
        println!("  {:<34} {:>6} rows", count.collection, count.loaded_rows);
    }
    println!();
    for issue in &report.issues {
        let icon = match issue.severity {
            Severity::Critical => "❌",
            Severity::Warning => "⚠️ ",
            Severity::Info => "ℹ️ ",
        };
        println!("  {} {}: {}", icon, issue.collection, issue.issue);
    }

    println!("\n{}", report.summary());
    if report.has_critical_issues() {
        bail!("dataset has critical issues");
    }
    if report.is_clean() {
        println!("✅ All validations passed!");
    } else {
        println!("⚠️  Some issues found - check details above");
    }
    Ok(())
}

fn run_export(loaded: &LoadedDataset, selection: &Selection, table: &str, out: &Path) -> Result<()> {
    let table: ExportTable = table.parse()?;
    let rows = export_table_to_path(&loaded.dataset, selection, table, out)?;
    println!("✓ Wrote {} rows of {} to {}", rows, table, out.display());
    Ok(())
}
