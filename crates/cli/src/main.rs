//! Cache simulator CLI.
//!
//! This binary replays a memory-access trace against a set-associative LRU cache. It performs:
//! 1. **Configuration:** Geometry from `-s/-E/-b`, optionally layered over a JSON config file.
//! 2. **Replay:** Lazily reads the trace, skipping instruction fetches.
//! 3. **Reporting:** Prints `hits:<h> misses:<m> evictions:<e>`, or JSON, plus optional detail.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use csim_core::common::{Error, TraceError};
use csim_core::trace::TraceEntry;
use csim_core::{Config, SimStats, Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative LRU cache simulator",
    long_about = "Replay a memory trace against a cache of 2^s sets, E lines per set and 2^b-byte blocks.\n\nTrace lines look like ` L 10,4`, ` S 18,4`, ` M 20,1` or `I 0400d7d4,8`; instruction fetches are ignored.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 2 -E 2 -b 3 -t traces/trans.trace\n  csim --config cache.json -t traces/long.trace --json"
)]
struct Cli {
    /// Print the outcome of every operation.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set-index bits (2^s sets).
    #[arg(short = 's', value_name = "s", required_unless_present = "config")]
    set_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "E", required_unless_present = "config")]
    lines_per_set: Option<usize>,

    /// Number of block-offset bits (2^b-byte blocks).
    #[arg(short = 'b', value_name = "b", required_unless_present = "config")]
    block_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', value_name = "tracefile")]
    trace: PathBuf,

    /// JSON configuration file; -s/-E/-b override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the totals as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Also print the detailed statistics report.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("csim: {e}");
        process::exit(1);
    }
}

/// Builds the configuration, replays the trace and prints the report.
fn run(cli: &Cli) -> Result<(), Error> {
    let config = resolve_config(cli)?;
    debug!(?config, trace = %cli.trace.display(), "starting replay");
    let verbose = cli.verbose || config.general.verbose;

    let mut sim = Simulator::new(&config.cache)?;
    let reader = TraceReader::open(&cli.trace)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = replay(&mut sim, reader, verbose.then_some(&mut out))?;

    if cli.json {
        writeln!(out, "{}", serde_json::to_string(&stats)?)?;
    } else {
        writeln!(out, "{stats}")?;
    }
    if cli.stats {
        write!(out, "{}", stats.report())?;
    }
    out.flush()?;
    Ok(())
}

/// Replays `entries`, writing one line per operation to `verbose` if given.
///
/// The first failed verbose write is returned once the replay finishes.
fn replay<I, W>(
    sim: &mut Simulator,
    entries: I,
    mut verbose: Option<W>,
) -> Result<SimStats, Error>
where
    I: IntoIterator<Item = Result<TraceEntry, TraceError>>,
    W: Write,
{
    let mut write_error = None;
    let stats = sim.run(entries, |outcome| {
        if let Some(out) = verbose.as_mut().filter(|_| write_error.is_none()) {
            write_error = writeln!(out, "{outcome}").err();
        }
    })?;
    match write_error {
        Some(e) => Err(e.into()),
        None => Ok(stats),
    }
}

/// Layers command-line geometry over the optional config file.
///
/// Without a config file clap requires all of `-s`, `-E` and `-b`.
fn resolve_config(cli: &Cli) -> Result<Config, Error> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(s) = cli.set_bits {
        config.cache.set_bits = s;
    }
    if let Some(e) = cli.lines_per_set {
        config.cache.lines_per_set = e;
    }
    if let Some(b) = cli.block_bits {
        config.cache.block_bits = b;
    }
    config.cache.validate()?;
    Ok(config)
}
