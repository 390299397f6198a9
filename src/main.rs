use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use governor_stats::{
    load_snapshot, write_requirements_csv, write_stats_csv, ReconciliationEngine, RowLayout,
    SnapshotPair,
};

#[derive(Debug, Parser)]
#[command(name = "governor-stats", version)]
#[command(about = "Kill/death requirements and stat deltas for alliance governors")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute per-governor deltas between scans and score them against requirements
    Reconcile {
        /// Scan at the start of a window (repeat with --after for more windows)
        #[arg(long, required = true)]
        before: Vec<PathBuf>,

        /// Scan at the end of a window, paired with the --before at the same position
        #[arg(long, required = true)]
        after: Vec<PathBuf>,

        /// Column layout of the scan files
        #[arg(long, value_enum, default_value_t = RowLayout::Compact)]
        layout: RowLayout,

        /// Where to write the delta CSV
        #[arg(long, default_value = "output.csv")]
        output: PathBuf,

        /// Optional JSON run report (window summaries, not-found ids)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Compute kill and dead requirements for every governor in a scan
    Requirements {
        /// Scan containing the governors' stats
        #[arg(long)]
        stats: PathBuf,

        /// Where to write the requirements CSV
        #[arg(long)]
        output: PathBuf,

        /// Column layout of the scan file
        #[arg(long, value_enum, default_value_t = RowLayout::Named)]
        layout: RowLayout,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Reconcile {
            before,
            after,
            layout,
            output,
            report,
        } => run_reconcile(&before, &after, layout, &output, report.as_deref()),
        Command::Requirements {
            stats,
            output,
            layout,
        } => run_requirements(&stats, &output, layout),
    }
}

fn load(path: &Path, layout: RowLayout) -> Result<Vec<governor_stats::Governor>> {
    load_snapshot(path, layout).with_context(|| format!("Failed to load scan {}", path.display()))
}

fn run_reconcile(
    before: &[PathBuf],
    after: &[PathBuf],
    layout: RowLayout,
    output: &Path,
    report_path: Option<&Path>,
) -> Result<()> {
    if before.len() != after.len() {
        bail!(
            "every --before needs a matching --after ({} before, {} after)",
            before.len(),
            after.len()
        );
    }

    // 1. Load every scan before writing anything
    println!("📂 Loading {} window(s)...", before.len());
    let mut pairs = Vec::with_capacity(before.len());
    for (before_path, after_path) in before.iter().zip(after) {
        let pair = SnapshotPair::new(load(before_path, layout)?, load(after_path, layout)?);
        println!(
            "✓ {} → {}: {} / {} governors",
            before_path.display(),
            after_path.display(),
            pair.before.len(),
            pair.after.len()
        );
        pairs.push(pair);
    }

    // 2. Reconcile
    let engine = ReconciliationEngine::new();
    let report = engine.reconcile(&pairs);
    log::info!("{}", report.summary());

    for window in &report.windows {
        if !window.not_found.is_empty() {
            println!(
                "⚠️  Window {}: {} governor(s) not found in both scans",
                window.window,
                window.not_found.len()
            );
        }
    }

    // 3. Write
    write_stats_csv(output, &report.deltas)?;
    println!("✓ Wrote {} governors to {}", report.deltas.len(), output.display());

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("✓ Wrote run report to {}", path.display());
    }

    println!("✅ {}", report.summary());

    Ok(())
}

fn run_requirements(stats: &Path, output: &Path, layout: RowLayout) -> Result<()> {
    let governors = load(stats, layout)?;
    log::info!("computing requirements for {} governors", governors.len());

    write_requirements_csv(output, &governors)?;
    println!(
        "✅ Wrote requirements for {} governors to {}",
        governors.len(),
        output.display()
    );

    Ok(())
}
