//! RunPlan - Running Training Plan Builder
//!
//! Command-line entry point: summarize and chart plan snapshots, export the
//! built-in session and show the active configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use runplan::plan::snapshot::{load_snapshot_file, ImportPayload, Snapshot};
use runplan::plan::{library, AlwaysConfirm, PlanStore};
use runplan::storage::config::{get_config_path, load_config, AppConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Running training plan builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print total duration, distance and average pace of a plan
    Summary(PlanArgs),
    /// Print the bar chart of a plan
    Graph(PlanArgs),
    /// Write the built-in default session as JSON
    ExportDefault {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Export every built-in training as an example set
        #[arg(long)]
        all: bool,
    },
    /// Show the configuration file path and values
    Config,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Plan snapshot or example set (JSON)
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    plan: PathBuf,
    /// Threshold pace as m:ss per km (defaults to the configured one)
    #[arg(long)]
    pace: Option<String>,
    /// Training to load from an example set, by key or 1-based index
    #[arg(long)]
    example: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting RunPlan v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = load_config().context("loading configuration")?;

    match cli.command {
        Command::Summary(args) => {
            let store = load_plan(&args, &config)?;
            let summary = store.compute_summary();
            println!("Threshold pace: {} min/km", store.threshold());
            println!("Total duration: {}", summary.formatted_duration());
            println!("Total distance: {}", summary.formatted_distance());
            println!("Average pace:   {}", summary.formatted_pace());
        }
        Command::Graph(args) => {
            let store = load_plan(&args, &config)?;
            for bar in store.graph() {
                println!(
                    "{:<32} {:>6} {:>5.1}% |{:<20}| {}",
                    bar.label,
                    runplan::metrics::format_duration(bar.duration_seconds),
                    bar.width_pct,
                    "#".repeat((bar.height / 5.0).round() as usize),
                    bar.pace_label
                );
            }
        }
        Command::ExportDefault { out, all } => {
            let pretty = config.export.pretty;
            let json = if all {
                library::example_set(config.plan.threshold()).to_json(pretty)?
            } else {
                let store = PlanStore::with_collection(library::default_training(), config.plan.clone());
                Snapshot::capture(&store).to_json(pretty)?
            };
            match out {
                Some(path) => write_output(&path, &json)?,
                None => println!("{}", json),
            }
        }
        Command::Config => {
            println!("Config file: {}", get_config_path().display());
            print!("{}", toml::to_string_pretty(&config).context("serializing configuration")?);
        }
    }

    Ok(())
}

fn load_plan(args: &PlanArgs, config: &AppConfig) -> Result<PlanStore> {
    let payload = load_snapshot_file(&args.plan).with_context(|| format!("reading {}", args.plan.display()))?;
    if let ImportPayload::Examples(set) = &payload {
        tracing::info!("{} contains {} example trainings", args.plan.display(), set.len());
    }

    let mut store = PlanStore::new(config.plan.clone());
    store.import_payload(payload, args.example.as_deref(), &mut AlwaysConfirm)?;
    if let Some(pace) = &args.pace {
        store.set_threshold_pace(pace)?;
    }
    Ok(store)
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
