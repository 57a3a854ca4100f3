use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use periodic_sched_sim::input::{self, ReaderOptions, DEFAULT_MAX_TASKS};
use periodic_sched_sim::report::{self, WriterSink};
use periodic_sched_sim::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    /// Rate monotonic
    Rm,
    /// Earliest deadline first
    Edf,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Rm => Algorithm::RateMonotonic,
            AlgorithmArg::Edf => Algorithm::EarliestDeadlineFirst,
        }
    }
}

/// Analyse and simulate a periodic task set under RM or EDF scheduling.
#[derive(Debug, Parser)]
#[command(name = "sched-sim", version)]
struct Cli {
    /// Task file with one `name, phase, period, wcet, deadline` record per line
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Scheduling algorithm
    #[arg(short = 'e', long = "algorithm", value_enum)]
    algorithm: AlgorithmArg,

    /// Report file (standard output if omitted)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Maximum number of task records read from the input
    #[arg(long = "max-tasks", default_value_t = DEFAULT_MAX_TASKS)]
    max_tasks: usize,
}

fn run(cli: &Cli) -> Result<()> {
    let options = ReaderOptions {
        max_tasks: cli.max_tasks,
    };
    let tasks = input::read_task_set(&cli.input, &options)
        .with_context(|| format!("failed to load tasks from {}", cli.input.display()))?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = WriterSink::new(BufWriter::new(writer));
    report::run(&tasks, cli.algorithm.into(), &mut sink).context("failed to write report")?;
    sink.into_inner().context("failed to flush report")?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
