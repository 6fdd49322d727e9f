use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use equipment_migration::{
    generate_from_source, open_source, write_migration, write_report, DEFAULT_INPUT,
    DEFAULT_OUTPUT,
};

/// Turn an equipment spreadsheet into a goose SQL migration
#[derive(Parser, Debug)]
#[command(name = "equipment-migration")]
#[command(author, version, about, long_about = None)]
struct MigrationConfig {
    /// Spreadsheet to read (xlsx, xlsm, xlsb, xls, ods or csv)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Migration file to write
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Worksheet to read (default: first worksheet)
    #[arg(short, long, value_name = "NAME")]
    sheet: Option<String>,

    /// Also write the import report as JSON
    #[arg(short, long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Log progress, not only warnings
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let config = MigrationConfig::parse();

    // Warnings are always shown: they are the only trace of skipped rows
    let default_level = if config.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&config)
}

fn run(config: &MigrationConfig) -> Result<()> {
    println!("🗄️  Equipment import: spreadsheet → SQL migration");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Open + read the sheet
    println!("\n📂 Reading {}...", config.input.display());
    let source = open_source(&config.input, config.sheet.clone())
        .with_context(|| format!("Cannot use input {}", config.input.display()))?;
    let generated = generate_from_source(&*source)
        .with_context(|| format!("Cannot read rows from {}", source.describe()))?;
    println!("✓ {} data rows", generated.report.data_rows);

    // 2. Write the migration
    println!("\n💾 Writing {}...", config.output.display());
    write_migration(&config.output, &generated.script)
        .with_context(|| format!("Cannot write migration {}", config.output.display()))?;
    println!("✓ Migration written");

    // 3. Optional report
    if let Some(report_path) = &config.report {
        write_report(report_path, &generated.report)
            .with_context(|| format!("Cannot write report {}", report_path.display()))?;
        println!("✓ Report written to {}", report_path.display());
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", generated.report.summary());
    if !generated.report.is_clean() {
        println!("⚠️  {} issue(s) logged above", generated.report.issues.len());
    }

    Ok(())
}
