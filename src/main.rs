//! Headless blockfall runner (default binary).
//!
//! Plays one seeded session on a simulated clock and prints a summary, or the
//! full report as JSON with `--json`. Set `RUST_LOG=debug` to trace locks,
//! sweeps and spawns.

use std::io::{self, Write};

use anyhow::{anyhow, ensure, Context, Result};
use clap::Parser;

use blockfall::runner::{run, Policy, RunConfig, RunReport};

#[derive(Parser, Debug)]
#[command(name = "blockfall")]
struct Args {
    /// Piece generator seed.
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Simulated time budget in milliseconds.
    #[arg(long, default_value_t = 600_000)]
    max_ms: u64,

    /// Simulated milliseconds per loop iteration.
    #[arg(long, default_value_t = 16)]
    tick_ms: u32,

    /// Autopilot: idle | random
    #[arg(long, default_value = "random")]
    policy: String,

    /// Print the full report as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    ensure!(args.tick_ms > 0, "--tick-ms must be greater than zero");
    let policy = Policy::from_str(&args.policy)
        .ok_or_else(|| anyhow!("unknown policy {:?} (expected idle or random)", args.policy))?;

    let report = run(&RunConfig {
        seed: args.seed,
        max_ms: args.max_ms,
        tick_ms: args.tick_ms,
        policy,
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).context("serialize report")?;
        writeln!(out)?;
    } else {
        print_summary(&mut out, &report)?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, report: &RunReport) -> Result<()> {
    let outcome = if report.game_over {
        "game over"
    } else {
        "time limit"
    };
    writeln!(
        out,
        "seed {} policy {}: {} after {}ms",
        report.seed,
        report.policy.as_str(),
        outcome,
        report.elapsed_ms
    )?;
    writeln!(
        out,
        "score {}  rows {}  level {}  pieces {}",
        report.score, report.rows, report.level, report.pieces
    )?;

    for row in report.final_state.game.frame.iter() {
        let line: String = row
            .iter()
            .map(|cell| match cell.value {
                Some(kind) => kind.as_str().to_ascii_uppercase(),
                None => ".".to_string(),
            })
            .collect();
        writeln!(out, "{line}")?;
    }
    Ok(())
}
