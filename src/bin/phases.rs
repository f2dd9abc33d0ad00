use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustc_hash::FxHashSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use signal_phases::config::EnumerationConfig;
use signal_phases::error::InvalidPhaseShape;
use signal_phases::rules::Validator;
use signal_phases::space::PhaseFilter;
use signal_phases::Phase;

#[derive(Parser, Debug)]
#[command(name = "phases", version, about = "Classify traffic-signal phases at a four-arm intersection")]
struct Args {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the verdict of each phase (12 symbols from r, G, g). Reads stdin when none given.
    Classify {
        phases: Vec<String>,

        /// Report each distinct phase once.
        #[arg(long)]
        unique: bool,
    },
    /// Print the verdict of a phase and every rule it breaks.
    Explain { phase: String },
    /// List enumerated phases as `#index: phase verdict`.
    List {
        #[arg(long, default_value_t = PhaseFilter::All)]
        filter: PhaseFilter,

        /// Kept phases to skip.
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of phases to print.
        #[arg(long)]
        limit: Option<usize>,

        /// One JSON object per line.
        #[arg(long)]
        json: bool,

        #[arg(long)]
        parallel: bool,

        /// Worker threads for --parallel (0 = one per core).
        #[arg(long, requires = "parallel")]
        threads: Option<usize>,
    },
    /// Print total, safe and unsafe counts with per-rule failures.
    Census {
        #[arg(long)]
        json: bool,

        #[arg(long)]
        parallel: bool,

        #[arg(long, requires = "parallel")]
        threads: Option<usize>,
    },
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log filter {default_level:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn parse_phase(text: &str) -> Result<Phase> {
    text.trim()
        .parse()
        .with_context(|| format!("invalid phase {:?}", text.trim()))
}

fn classify(inputs: Vec<String>, unique: bool, out: &mut impl Write) -> Result<()> {
    let inputs = if inputs.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("failed to read phases from stdin")?
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect()
    } else {
        inputs
    };

    let validator = Validator::standard();
    let mut seen: FxHashSet<Phase> = FxHashSet::default();
    for text in &inputs {
        let phase = parse_phase(text)?;
        if unique && !seen.insert(phase) {
            debug!(%phase, "skipping repeated phase");
            continue;
        }
        writeln!(out, "{phase} {}", validator.classify(&phase))?;
    }
    Ok(())
}

fn explain(text: &str, out: &mut impl Write) -> Result<()> {
    let phase = parse_phase(text)?;
    let diagnosis = Validator::standard().diagnose(&phase);
    writeln!(out, "#{}: {phase} {}", phase.index(), diagnosis.verdict())?;
    for (movement, state) in phase.iter().filter(|(_, s)| s.is_active()) {
        writeln!(out, "  {movement}: {state:?}")?;
    }
    for rule in &diagnosis.failed {
        writeln!(out, "  fails {rule}")?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e:#}");
        let code = if e.downcast_ref::<InvalidPhaseShape>().is_some() {
            2
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    init_tracing(&args.log_level)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let validator = Validator::standard();

    match args.command {
        Command::Classify { phases, unique } => classify(phases, unique, &mut out)?,
        Command::Explain { phase } => explain(&phase, &mut out)?,
        Command::List {
            filter,
            offset,
            limit,
            json,
            parallel,
            threads,
        } => {
            let cfg = EnumerationConfig::default()
                .with_filter(filter)
                .with_window(offset, limit)
                .with_parallel(parallel, threads.unwrap_or(0));
            let items = cfg.select(validator)?;
            info!(count = items.len(), "listing phases");
            for item in items {
                if json {
                    serde_json::to_writer(&mut out, &item)?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "#{}: {} {}", item.index, item.phase, item.verdict)?;
                }
            }
        }
        Command::Census {
            json,
            parallel,
            threads,
        } => {
            let census = EnumerationConfig::default()
                .with_parallel(parallel, threads.unwrap_or(0))
                .census(validator)?;
            if json {
                serde_json::to_writer_pretty(&mut out, &census)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{census}")?;
            }
        }
    }

    out.flush().context("failed to flush output")?;
    Ok(())
}
