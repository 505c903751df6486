//! ALGOLAB CLI
//!
//! Generate, inspect and play back algorithm traces from the terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]

use algolab_core::{Algorithm, Step};
use algolab_replay::{Action, LabConfig, LabSession, PlaybackStatus, Player};
use algolab_trace::{AlgorithmInfo, RawParams};
use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use console::style;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "algolab")]
#[command(about = "ALGOLAB - step-by-step algorithm traces and playback", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Algorithm tag, e.g. bubble-sort or lcs
    algorithm: String,
    /// Input parameter as key=value, repeatable
    #[arg(short, long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
    /// Use a seeded random input instead of the default one
    #[arg(short, long, conflicts_with = "params")]
    seed: Option<u64>,
    /// Use a random input seeded from the config file
    #[arg(short, long, conflicts_with_all = ["params", "seed"])]
    random: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available algorithms
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the steps of a trace
    Trace {
        #[command(flatten)]
        input: InputArgs,
        /// Print the full trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the visual description of one step as JSON
    Render {
        #[command(flatten)]
        input: InputArgs,
        /// Step index; the trace length shows the completed state
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },
    /// Play a trace in real time
    Play {
        #[command(flatten)]
        input: InputArgs,
        /// Speed dial, 1 (slow) to 100 (fast)
        #[arg(long)]
        speed: Option<i64>,
    },
}

fn parse_param(text: &str) -> Result<(String, String), String> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{text}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{text}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[derive(Serialize)]
struct ListEntry {
    tag: Algorithm,
    family: String,
    name: &'static str,
    summary: &'static str,
    complexity: &'static [&'static str],
}

fn session_for(config: &LabConfig, input: &InputArgs) -> Result<LabSession> {
    let mut session = LabSession::new(config.clone())?;
    session.select_algorithm(&input.algorithm)?;
    if let Some(seed) = input.seed {
        session.randomize(seed)?;
    } else if input.random {
        session.apply(Action::Randomize(None))?;
    } else if !input.params.is_empty() {
        let params: RawParams = input.params.iter().cloned().collect();
        session.set_input_parameters(&params)?;
    }
    debug!(algorithm = %session.algorithm(), steps = session.trace().len(), "input ready");
    Ok(session)
}

fn print_step(step: &Step, total: usize) {
    println!(
        "{} {}",
        style(format!("[{:>3}/{}]", step.index + 1, total)).dim(),
        step.description
    );
}

fn list(json: bool) -> Result<()> {
    let entries: Vec<ListEntry> = Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let info = AlgorithmInfo::of(algorithm);
            ListEntry {
                tag: algorithm,
                family: algorithm.family().to_string(),
                name: info.name,
                summary: info.summary,
                complexity: info.complexity,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{:<20} {:<20} {}",
            style(entry.tag).cyan().bold(),
            style(&entry.family).dim(),
            entry.name
        );
    }
    Ok(())
}

fn trace(config: &LabConfig, input: &InputArgs, json: bool) -> Result<()> {
    let session = session_for(config, input)?;
    let trace = session.trace();
    if json {
        println!("{}", serde_json::to_string_pretty(trace.as_ref())?);
        return Ok(());
    }
    if trace.is_empty() {
        println!("{}", style("Nothing to show").yellow());
        return Ok(());
    }
    for step in trace.iter() {
        print_step(step, trace.len());
    }
    println!("{}", style(format!("{} steps", trace.len())).green());
    Ok(())
}

fn render(config: &LabConfig, input: &InputArgs, index: usize) -> Result<()> {
    let mut session = session_for(config, input)?;
    session.seek(index);
    let description = session.render(&session.default_layout())?;
    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}

async fn play(config: &LabConfig, input: &InputArgs, speed: Option<i64>) -> Result<()> {
    let session = session_for(config, input)?;
    let trace = std::sync::Arc::clone(session.trace());
    if trace.is_empty() {
        println!("{}", style("Nothing to show").yellow());
        return Ok(());
    }

    let player = Player::spawn(session);
    if let Some(dial) = speed {
        player.apply(Action::SetSpeed(dial)).await?;
    }
    let mut updates = player.subscribe();
    let model = player.apply(Action::Play).await?;
    println!(
        "{} {} at {} ms/step",
        style("Playing").green().bold(),
        model.algorithm,
        model.speed.interval_ms()
    );
    if let Some(step) = trace.get(model.current_index) {
        print_step(step, trace.len());
    }

    let mut shown = model.current_index;
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let model = updates.borrow_and_update().clone();
                if model.current_index != shown {
                    shown = model.current_index;
                    if let Some(step) = trace.get(shown) {
                        print_step(step, trace.len());
                    }
                }
                if model.status == PlaybackStatus::Completed {
                    println!("{}", style(format!("Completed ({} steps)", trace.len())).green());
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                player.apply(Action::Pause).await?;
                println!("{}", style("Paused").yellow());
                break;
            }
        }
    }

    player.shutdown().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("algolab=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => LabConfig::load(path)?,
        None => LabConfig::default(),
    };

    match cli.command {
        Commands::List { json } => list(json),
        Commands::Trace { input, json } => trace(&config, &input, json),
        Commands::Render { input, index } => render(&config, &input, index),
        Commands::Play { input, speed } => play(&config, &input, speed).await,
    }
}
