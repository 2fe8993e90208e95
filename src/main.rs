//! protscan - Protein composition, comparison and mutation reports
//!
//! ## Usage
//!
//! ```bash
//! protscan organism1.fasta organism2.fasta organism3.fasta organism4.fasta
//! protscan -o reports --seed 7 --all-pairs *.fasta
//! ```
//!
//! ## Outputs (per run, in the output directory)
//!
//! - `<name>-aminoacidos.txt`: composition table
//! - `<name>-histograma.svg`: residue count bar chart
//! - `comparacao_<a>_vs_<b>.txt`: substitutions between two inputs
//! - `<name>-mutacao.fasta`: sequence with one simulated point mutation
//! - `comparacao_<name>_vs_mutacao.txt`: the mutation as a diff

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use protscan::composition::CompositionAnalyzer;
use protscan::controller::{run_batch, write_summary, Config, PairMode};
use protscan::formats::fasta::DEFAULT_LINE_WIDTH;

/// protscan - Amino acid composition, pairwise diffs and point mutations
///
/// Each input file holds one protein record. Reports are written as
/// tab-separated text, charts as SVG, mutated sequences as FASTA.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Protein FASTA files, one record each. The first file is the reference for comparisons.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for all output files
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Seed for the mutation draws (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Line width of mutated FASTA output (0 = single line)
    #[arg(short = 'w', long = "line-width", default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: usize,

    /// Compare every pair of inputs instead of the first against the rest
    #[arg(long = "all-pairs")]
    all_pairs: bool,

    /// Do not write SVG bar charts
    #[arg(long = "no-chart")]
    no_chart: bool,

    /// Do not simulate point mutations
    #[arg(long = "no-mutation")]
    no_mutation: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long = "summary")]
    summary: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    fn to_config(&self) -> Config {
        Config {
            inputs: self.files.clone(),
            out_dir: self.out_dir.clone(),
            line_width: self.line_width,
            charts: !self.no_chart,
            pairs: if self.all_pairs {
                PairMode::All
            } else {
                PairMode::FirstVsRest
            },
            mutate: !self.no_mutation,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp_millis()
        .init();

    let config = args.to_config();
    let analyzer = CompositionAnalyzer::default();

    let summary = match args.seed {
        Some(seed) => {
            info!("Using mutation seed {}", seed);
            run_batch(&config, &analyzer, &mut StdRng::seed_from_u64(seed))?
        }
        None => run_batch(&config, &analyzer, &mut rand::rng())?,
    };

    if let Some(path) = &args.summary {
        write_summary(path, &summary)?;
        info!("Wrote summary to {}", path.display());
    }

    if summary.has_failures() {
        anyhow::bail!("{} step(s) failed; see the log above", summary.failures.len());
    }

    Ok(())
}
