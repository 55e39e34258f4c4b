mod logic;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use geocoin_game::GameConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{SeedReport, Simulation, resolve_seeds};

#[derive(Debug, Parser)]
#[command(name = "geocoin-tester", version)]
#[command(about = "Seeded random-walk checks for the Geocoin game core")]
struct Args {
    /// Seeds to run (comma-separated, decimal or 0x hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Walks per seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Player actions per walk
    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Override the cache spawn probability
    #[arg(long)]
    probability: Option<f64>,

    /// Override the neighborhood range in cells
    #[arg(long)]
    range: Option<u32>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;
    let seeds = resolve_seeds(&split_csv(&args.seeds))?;
    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let simulation = Simulation::new(config, args.steps, args.verbose);
    let reports: Vec<SeedReport> = seeds
        .iter()
        .map(|&seed| {
            log::info!("running {} walks for seed {seed}", args.iterations);
            simulation.run_seed(seed, args.iterations)
        })
        .collect();

    write_reports(&args, &reports, start_time)?;

    if reports.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🪙 Geocoin Simulation Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = GameConfig::load_from_static();
    if let Some(probability) = args.probability {
        config = config.with_cache_probability(probability);
    }
    if let Some(range) = args.range {
        config = config.with_neighborhood_range(range);
    }
    config.validate().context("invalid simulation settings")?;
    Ok(config)
}

fn write_reports(args: &Args, reports: &[SeedReport], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, reports)?,
        _ => logic::reports::generate_console_report(
            &mut output_target,
            reports,
            start_time.elapsed(),
        )?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
