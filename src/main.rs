use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use async_reducer_cell::config::Config;
use async_reducer_cell::demo::{Counter, DelayedAdder, Delta};
use async_reducer_cell::logging::init_tracing;
use async_reducer_cell::AsyncReducerCell;

/// Run the delayed-counter scenario against an async reducer cell.
#[derive(Debug, Parser)]
#[command(name = "reducer-demo", version, about)]
struct Cli {
    /// Config file (default: platform config dir, async-reducer/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the starting count
    #[arg(long, allow_negative_numbers = true)]
    initial: Option<i64>,

    /// Delta to dispatch; repeat for several back-to-back dispatches
    #[arg(long = "delta", allow_negative_numbers = true)]
    deltas: Vec<i64>,

    /// Override the reducer delay per unit of delta, in milliseconds
    #[arg(long)]
    unit_ms: Option<u64>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::read_from(path)?,
        None => Config::read()?,
    };
    if let Some(initial) = cli.initial {
        config.demo.initial_count = initial;
    }
    if !cli.deltas.is_empty() {
        config.demo.deltas = cli.deltas.clone();
    }
    if let Some(unit_ms) = cli.unit_ms {
        config.demo.delay_per_unit_ms = unit_ms;
    }
    config.validate()?;

    init_tracing(&config.logging);

    let cell = AsyncReducerCell::new(
        DelayedAdder::from_config(&config.demo),
        Counter {
            count: config.demo.initial_count,
        },
    );

    let _observer = cell.store().subscribe(|state: &Counter, version| {
        println!("commit #{}: count = {}", version, state.count);
    });

    let handles: Vec<_> = config
        .demo
        .deltas
        .iter()
        .map(|&delta| (delta, cell.dispatch(Delta { delta })))
        .collect();

    let mut failed = 0usize;
    for (delta, handle) in handles {
        if let Err(err) = handle.await {
            failed += 1;
            eprintln!("dispatch of delta {} failed: {}", delta, err);
        }
    }

    let final_state = cell.state();
    if cli.json {
        let rendered =
            serde_json::to_string(&final_state).context("Failed to serialize final state")?;
        println!("{}", rendered);
    } else {
        println!("final count = {}", final_state.count);
    }

    if failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
