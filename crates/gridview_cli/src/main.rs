//! Gridview CLI
//!
//! Run the animated grid headlessly on a virtual clock and inspect it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridview_app::{EntrancePhase, FrameSnapshot, GridConfig, HeadlessHost, ItemSnapshot};
use gridview_core::ControlFlow;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gridview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animated grid simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Grid configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the screen and print the final snapshot
    Simulate {
        /// Virtual time to run for
        #[arg(short, long, default_value = "1000")]
        duration_ms: f32,

        /// Scroll to this offset before running
        #[arg(long)]
        scroll_to: Option<f32>,
    },

    /// Print the snapshot at a point in virtual time
    Snapshot {
        /// Virtual time of the snapshot
        #[arg(long, default_value = "0")]
        at_ms: f32,
    },

    /// Print one item's entrance as CSV samples
    Timeline {
        /// Item index
        #[arg(short, long, default_value = "0")]
        item: usize,

        /// Time between samples
        #[arg(short, long, default_value = "50")]
        step_ms: f32,

        /// Stop sampling after this much virtual time
        #[arg(long, default_value = "1000")]
        until_ms: f32,
    },

    /// Print the flattened render tree as JSON
    Tree {
        /// Virtual time to render at
        #[arg(long, default_value = "0")]
        at_ms: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            duration_ms,
            scroll_to,
        } => cmd_simulate(config, duration_ms, scroll_to),
        Commands::Snapshot { at_ms } => cmd_snapshot(config, at_ms),
        Commands::Timeline {
            item,
            step_ms,
            until_ms,
        } => cmd_timeline(config, item, step_ms, until_ms),
        Commands::Tree { at_ms } => cmd_tree(config, at_ms),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GridConfig> {
    match path {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(GridConfig::default()),
    }
}

fn create_host(config: GridConfig) -> Result<HeadlessHost> {
    HeadlessHost::new(config).context("Failed to start headless host")
}

fn print_json(snapshot: &FrameSnapshot) -> Result<()> {
    println!("{}", snapshot.to_json_pretty()?);
    Ok(())
}

fn cmd_simulate(config: GridConfig, duration_ms: f32, scroll_to: Option<f32>) -> Result<()> {
    if !(duration_ms.is_finite() && duration_ms >= 0.0) {
        anyhow::bail!("--duration-ms must be a finite, non-negative value");
    }
    let frame_ms = config.frame_interval_ms;
    let mut host = create_host(config)?;

    if let Some(offset) = scroll_to {
        host.scroll_by(offset - host.screen().scroll_offset())?;
        info!(
            "Scrolled to {} (max {})",
            host.screen().scroll_offset(),
            host.screen().max_scroll_offset()
        );
    }

    info!(
        "Simulating {}ms with {} mounted item(s)",
        duration_ms,
        host.screen().mounted_indices().len()
    );

    // Step frame by frame while anything animates so phase changes are
    // reported as they happen, then run out the rest in one call
    let end_ms = host.now_ms() + f64::from(duration_ms);
    let mut phases: BTreeMap<usize, EntrancePhase> = BTreeMap::new();
    report_phases(&host, &mut phases);
    while host.now_ms() < end_ms && host.screen().items().any(|item| item.is_animating()) {
        let step = (end_ms - host.now_ms()).min(f64::from(frame_ms)) as f32;
        if host.advance_by(step)? == ControlFlow::Exit {
            break;
        }
        report_phases(&host, &mut phases);
    }
    let rest = end_ms - host.now_ms();
    if rest > 0.0 {
        host.advance_by(rest as f32)?;
    }

    print_json(&host.snapshot())
}

fn report_phases(host: &HeadlessHost, phases: &mut BTreeMap<usize, EntrancePhase>) {
    for item in host.snapshot().items {
        if phases.insert(item.index, item.phase) != Some(item.phase) {
            info!(
                "{:>7.1}ms  item {:>2} -> {:?}",
                host.now_ms(),
                item.index,
                item.phase
            );
        }
    }
}

fn cmd_snapshot(config: GridConfig, at_ms: f32) -> Result<()> {
    let mut host = create_host(config)?;
    host.advance_by(at_ms)?;
    print_json(&host.snapshot())
}

fn cmd_timeline(config: GridConfig, item: usize, step_ms: f32, until_ms: f32) -> Result<()> {
    if !(step_ms.is_finite() && step_ms > 0.0) {
        anyhow::bail!("--step-ms must be positive, got {}", step_ms);
    }
    if !until_ms.is_finite() {
        anyhow::bail!("--until-ms must be finite");
    }
    if item >= config.item_count {
        anyhow::bail!(
            "Item {} is out of range (grid has {} items)",
            item,
            config.item_count
        );
    }

    let mut host = create_host(config)?;

    // Bring the item into view; its entrance starts when it mounts
    let row_height = host.screen().grid().row_height();
    if let Some(cell) = host.screen().grid().cell(item) {
        let target = cell.row as f32 * row_height;
        host.scroll_by(target - host.screen().scroll_offset())?;
    }
    let start_ms = host.now_ms();

    println!("time_ms,offset_x,opacity,phase");
    let samples = (f64::from(until_ms.max(0.0)) / f64::from(step_ms)).ceil() as u64;
    for i in 0..=samples {
        let snapshot = host.snapshot();
        let Some(sample) = snapshot.item(item) else {
            anyhow::bail!("Item {} is not mounted", item);
        };
        println!("{}", csv_row(host.now_ms() - start_ms, sample));
        if i == samples || sample.phase == EntrancePhase::Settled {
            break;
        }
        let target = (i + 1) as f64 * f64::from(step_ms);
        let step = target.min(f64::from(until_ms)) - (host.now_ms() - start_ms);
        host.advance_by(step as f32)?;
    }
    Ok(())
}

fn csv_row(time_ms: f64, sample: &ItemSnapshot) -> String {
    format!(
        "{:.1},{:.3},{:.4},{:?}",
        time_ms, sample.offset_x, sample.opacity, sample.phase
    )
}

fn cmd_tree(config: GridConfig, at_ms: f32) -> Result<()> {
    let mut host = create_host(config)?;
    host.advance_by(at_ms)?;
    let tree = host.render_tree().context("Failed to render screen")?;
    println!("{}", serde_json::to_string_pretty(&tree.nodes())?);
    Ok(())
}
