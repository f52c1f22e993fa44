mod config;
mod harness;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use config::ScenarioConfig;
use harness::HeadlessRun;
use report::RunReport;

#[derive(Parser)]
#[command(version, about = "Run the corridor-shooter simulation headless")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a seeded simulation for a fixed tick budget and emit a JSON report.
    Simulate(SimulateArgs),
    /// Pretty-print an existing run report.
    Report(ReportArgs),
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Queue one shot every N ticks (0 disables autofire).
    #[arg(long, default_value_t = 20)]
    fire_every: u32,
    /// Scenario TOML overriding the flags above.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate(args) => handle_simulate(args),
        Commands::Report(args) => handle_report(args),
    }
}

fn handle_simulate(args: SimulateArgs) -> Result<()> {
    let scenario = match args.config.as_deref() {
        Some(path) => ScenarioConfig::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioConfig {
            seed: args.seed,
            ticks: args.ticks,
            fire_every: args.fire_every,
            ..Default::default()
        },
    };

    let run_id = args
        .id
        .unwrap_or_else(|| format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S")));
    let outcome = HeadlessRun::new(&scenario).execute();
    let report = RunReport::new(run_id, &scenario, outcome);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(path) = args.out {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let data = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let report: RunReport = serde_json::from_str(&data)?;
    println!(
        "Run {} -> {:?} (score {}, {} ticks)",
        report.id, report.outcome, report.score, report.ticks_run
    );
    Ok(())
}
