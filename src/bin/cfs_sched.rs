//! cfs-sched - replays a task file through the fair-share scheduler and
//! prints one line per tick.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use llrb_collections::sched::{parse_tasks, Scheduler};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Fair-share scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "cfs-sched")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Task file of `identifier start duration` triples
    #[arg(value_name = "TASK_FILE")]
    task_file: PathBuf,

    /// Log scheduling decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Stop after this many ticks even if tasks remain
    #[arg(long, value_name = "N")]
    max_ticks: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = fs::read_to_string(&cli.task_file)
        .with_context(|| format!("failed to read task file {}", cli.task_file.display()))?;

    let tasks = parse_tasks(&input);
    tracing::debug!("loaded {} task(s)", tasks.len());

    let ticks = Scheduler::new(tasks);
    match cli.max_ticks {
        Some(n) => ticks.take(n as usize).for_each(|t| println!("{}", t)),
        None => ticks.for_each(|t| println!("{}", t)),
    }

    Ok(())
}
